use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::auth::repo_types::UserRecord;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub biometric_key: Option<String>,
}

/// Request body for password login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for biometric login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricLoginRequest {
    pub biometric_key: String,
}

/// Public part of the user returned to the client. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i32,
    pub email: String,
    pub biometric_key: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&UserRecord> for PublicUser {
    fn from(u: &UserRecord) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            biometric_key: u.biometric_key.clone(),
            created_at: iso8601(u.created_at),
            updated_at: iso8601(u.updated_at),
        }
    }
}

pub(crate) fn iso8601(ts: OffsetDateTime) -> String {
    // Rfc3339 formatting only fails for offsets with seconds, which the store never produces.
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}

/// Result of either login flow.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub access_token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBody {
    pub access_token: String,
}

/// `data` of the REST login responses: the user plus `token.accessToken`.
#[derive(Debug, Serialize)]
pub struct LoginData {
    #[serde(flatten)]
    pub user: PublicUser,
    pub token: TokenBody,
}

impl From<LoginOutcome> for LoginData {
    fn from(o: LoginOutcome) -> Self {
        Self {
            user: o.user,
            token: TokenBody {
                access_token: o.access_token,
            },
        }
    }
}

/// `{code, message, data?}` envelope of the REST surface.
#[derive(Debug, Serialize)]
pub struct ResponseEnvelope<T: Serialize> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ResponseEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: "success".into(),
            data: Some(data),
        }
    }
}
