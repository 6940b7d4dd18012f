//! In-process `UserStore` used by the unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::auth::repo::UserStore;
use crate::auth::repo_types::{NewUser, UserRecord};
use crate::error::AuthError;

#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<UserRecord>>,
}

impl MemoryUserStore {
    /// Inserts a row as-is, bypassing the unique checks. Lets tests stage races.
    pub fn insert_raw(&self, record: UserRecord) {
        self.rows.lock().expect("store lock").push(record);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().expect("store lock").len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        let rows = self.rows.lock().expect("store lock");
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_biometric_key(&self, key: &str) -> Result<Option<UserRecord>, AuthError> {
        let rows = self.rows.lock().expect("store lock");
        Ok(rows
            .iter()
            .find(|u| u.biometric_key.as_deref() == Some(key))
            .cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserRecord>, AuthError> {
        let rows = self.rows.lock().expect("store lock");
        Ok(rows.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, AuthError> {
        let mut rows = self.rows.lock().expect("store lock");
        let clash = rows.iter().any(|u| {
            u.email == user.email
                || (user.biometric_key.is_some() && u.biometric_key == user.biometric_key)
        });
        if clash {
            return Err(AuthError::Duplicate);
        }
        let now = OffsetDateTime::now_utc();
        let record = UserRecord {
            id: rows.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            email: user.email,
            password_hash: user.password_hash,
            biometric_key: user.biometric_key,
            created_at: now,
            updated_at: now,
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: i32) -> Result<(), AuthError> {
        let mut rows = self.rows.lock().expect("store lock");
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(AuthError::NotFound);
        }
        Ok(())
    }
}
