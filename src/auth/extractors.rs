use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::dto::PublicUser;
use crate::{error::AuthError, state::AppState};

/// Extracts and validates the bearer token, returning the user it was issued for.
pub struct AuthUser(pub PublicUser);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Read Authorization header
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::TokenInvalid)?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(AuthError::TokenInvalid)?;

        let user = state.service.authenticate(token.trim()).await?;
        Ok(AuthUser(user))
    }
}
