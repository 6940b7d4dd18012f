use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::{NewUser, UserRecord};
use crate::error::AuthError;

/// Read/write operations the credential service needs from the user store.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError>;
    async fn find_by_biometric_key(&self, key: &str) -> Result<Option<UserRecord>, AuthError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<UserRecord>, AuthError>;
    /// Fails with `AuthError::Duplicate` when the store's unique indexes reject the row.
    async fn create(&self, user: NewUser) -> Result<UserRecord, AuthError>;
    async fn delete(&self, id: i32) -> Result<(), AuthError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, biometric_key, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_biometric_key(&self, key: &str) -> Result<Option<UserRecord>, AuthError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, biometric_key, created_at, updated_at
            FROM users
            WHERE biometric_key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserRecord>, AuthError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, biometric_key, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, AuthError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password_hash, biometric_key)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, biometric_key, created_at, updated_at
            "#,
        )
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.biometric_key)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn delete(&self, id: i32) -> Result<(), AuthError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AuthError::NotFound);
        }
        Ok(())
    }
}
