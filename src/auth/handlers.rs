use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{
            BiometricLoginRequest, LoginData, LoginRequest, PublicUser, RegisterRequest,
            ResponseEnvelope,
        },
        extractors::AuthUser,
    },
    error::AuthError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/create", post(register))
        .route("/auth/login", post(login))
        .route("/auth/biometric-login", post(biometric_login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ResponseEnvelope<PublicUser>>, AuthError> {
    let user = state
        .service
        .register(&payload.email, &payload.password, payload.biometric_key)
        .await?;
    Ok(Json(ResponseEnvelope::success(user)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ResponseEnvelope<LoginData>>, AuthError> {
    let outcome = state
        .service
        .login_with_password(&payload.email, &payload.password)
        .await?;
    Ok(Json(ResponseEnvelope::success(outcome.into())))
}

#[instrument(skip(state, payload))]
pub async fn biometric_login(
    State(state): State<AppState>,
    Json(payload): Json<BiometricLoginRequest>,
) -> Result<Json<ResponseEnvelope<LoginData>>, AuthError> {
    let outcome = state
        .service
        .login_with_biometric(&payload.biometric_key)
        .await?;
    Ok(Json(ResponseEnvelope::success(outcome.into())))
}

#[instrument(skip_all)]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<ResponseEnvelope<PublicUser>> {
    Json(ResponseEnvelope::success(user))
}
