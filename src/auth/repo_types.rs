use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    /// Assigned by the store.
    pub id: i32,
    pub email: String,
    /// PBKDF2 hex digest. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub biometric_key: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Insert payload for a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub biometric_key: Option<String>,
}
