use async_graphql::ErrorExtensions;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

/// Every failure the credential service can report to a caller.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User already exist")]
    AlreadyExists,

    #[error("Biometric key not allowed")]
    BiometricConflict,

    #[error("User not found")]
    NotFound,

    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("Invalid Biometric key")]
    InvalidBiometric,

    #[error("Failed to sign token")]
    Signing,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    /// Unique constraint tripped inside the store after the lookup check passed.
    #[error("Record already exists")]
    Duplicate,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::AlreadyExists
            | AuthError::BiometricConflict
            | AuthError::InvalidCredentials
            | AuthError::Duplicate => StatusCode::BAD_REQUEST,
            AuthError::NotFound | AuthError::InvalidBiometric => StatusCode::NOT_FOUND,
            AuthError::TokenExpired | AuthError::TokenInvalid => StatusCode::UNAUTHORIZED,
            AuthError::Signing | AuthError::Configuration(_) | AuthError::Store(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::AlreadyExists => "already_exists",
            AuthError::BiometricConflict => "biometric_conflict",
            AuthError::NotFound => "not_found",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InvalidBiometric => "invalid_biometric",
            AuthError::Signing => "signing_error",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenInvalid => "token_invalid",
            AuthError::Duplicate => "duplicate",
            AuthError::Configuration(_) => "configuration_error",
            AuthError::Store(_) => "unprocessable",
        }
    }

    /// Message safe to hand back to a caller. Store internals stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::Store(_) => "Unprocessable request".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() && status != StatusCode::UNPROCESSABLE_ENTITY {
            warn!(kind = self.kind(), %status, "request rejected");
        } else {
            error!(kind = self.kind(), error = %self, "request failed");
        }

        (
            status,
            Json(serde_json::json!({
                "code": status.as_u16(),
                "message": self.public_message(),
            })),
        )
            .into_response()
    }
}

impl ErrorExtensions for AuthError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| {
            e.set("code", i32::from(self.status().as_u16()));
            e.set("kind", self.kind().to_string());
        })
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                warn!(constraint = ?db_err.constraint(), "unique violation on insert");
                return AuthError::Duplicate;
            }
        }
        error!(error = %err, "database error");
        AuthError::Store(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        error!(error = %err, "blocking task failed");
        AuthError::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_and_conflict_errors_are_bad_requests() {
        for err in [
            AuthError::AlreadyExists,
            AuthError::BiometricConflict,
            AuthError::InvalidCredentials,
            AuthError::Duplicate,
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn lookups_are_not_found() {
        assert_eq!(AuthError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::InvalidBiometric.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_errors_do_not_leak_details() {
        let err = AuthError::Store("connection refused on 10.0.0.3:5432".into());
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.public_message(), "Unprocessable request");
    }

    #[test]
    fn graphql_extension_carries_status_code() {
        let gql = AuthError::InvalidCredentials.extend();
        assert_eq!(gql.message, "Invalid Credentials");
        let ext = gql.extensions.expect("extensions set");
        assert_eq!(ext.get("code"), Some(&async_graphql::Value::from(400)));
    }
}
