use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::auth::{
    dto::{LoginOutcome, PublicUser},
    jwt::{JwtKeys, SignedClaim},
    password::{hash_password, verify_password},
    repo::UserStore,
    repo_types::{NewUser, UserRecord},
};
use crate::error::AuthError;

/// Registration and the two login flows on top of an injected user store.
pub struct CredentialService {
    store: Arc<dyn UserStore>,
    salt: String,
    keys: JwtKeys,
}

impl CredentialService {
    pub fn new(store: Arc<dyn UserStore>, salt: impl Into<String>, keys: JwtKeys) -> Self {
        Self {
            store,
            salt: salt.into(),
            keys,
        }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    #[instrument(skip(self, password, biometric_key))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        biometric_key: Option<String>,
    ) -> Result<PublicUser, AuthError> {
        let biometric_key = biometric_key.filter(|k| !k.is_empty());

        if self.store.find_by_email(email).await?.is_some() {
            warn!(email = %email, "email already registered");
            return Err(AuthError::AlreadyExists);
        }
        if let Some(key) = biometric_key.as_deref() {
            if self.store.find_by_biometric_key(key).await?.is_some() {
                warn!(email = %email, "biometric key already bound to another user");
                return Err(AuthError::BiometricConflict);
            }
        }

        let password_hash = self.hash(password).await?;
        let user = self
            .store
            .create(NewUser {
                email: email.to_owned(),
                password_hash,
                biometric_key,
            })
            .await?;

        info!(user_id = user.id, email = %user.email, "user registered");
        Ok(PublicUser::from(&user))
    }

    #[instrument(skip(self, password))]
    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, AuthError> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                warn!(email = %email, "login unknown email");
                AuthError::NotFound
            })?;

        if !self.verify(password, &user.password_hash).await? {
            warn!(user_id = user.id, "login invalid password");
            return Err(AuthError::InvalidCredentials);
        }

        let outcome = self.issue(&user)?;
        info!(user_id = user.id, "user logged in with password");
        Ok(outcome)
    }

    /// The key is looked up as stored; there is no second factor behind it.
    #[instrument(skip(self, biometric_key))]
    pub async fn login_with_biometric(
        &self,
        biometric_key: &str,
    ) -> Result<LoginOutcome, AuthError> {
        let user = self
            .store
            .find_by_biometric_key(biometric_key)
            .await?
            .ok_or_else(|| {
                warn!("login unknown biometric key");
                AuthError::InvalidBiometric
            })?;

        let outcome = self.issue(&user)?;
        info!(user_id = user.id, "user logged in with biometric key");
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_id(&self, id: i32) -> Result<PublicUser, AuthError> {
        let user = self.store.find_by_id(id).await?.ok_or(AuthError::NotFound)?;
        Ok(PublicUser::from(&user))
    }

    /// Administrative cleanup; not routed.
    #[instrument(skip(self))]
    pub async fn remove_user(&self, id: i32) -> Result<(), AuthError> {
        self.store.delete(id).await?;
        info!(user_id = id, "user removed");
        Ok(())
    }

    /// Resolves a bearer token to the user it was issued for.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> Result<PublicUser, AuthError> {
        let claim = self.keys.unseal(token)?;
        let user = self
            .store
            .find_by_email(&claim.email)
            .await?
            .ok_or(AuthError::TokenInvalid)?;
        if user.created_at != claim.created_at {
            warn!(user_id = user.id, "token issued for an earlier registration");
            return Err(AuthError::TokenInvalid);
        }
        Ok(PublicUser::from(&user))
    }

    fn issue(&self, user: &UserRecord) -> Result<LoginOutcome, AuthError> {
        let access_token = self.keys.seal(&SignedClaim {
            email: user.email.clone(),
            created_at: user.created_at,
        })?;
        Ok(LoginOutcome {
            access_token,
            user: PublicUser::from(user),
        })
    }

    // PBKDF2 is CPU-bound; keep it off the async workers.
    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let (password, salt) = (password.to_owned(), self.salt.clone());
        Ok(tokio::task::spawn_blocking(move || hash_password(&password, &salt)).await?)
    }

    async fn verify(&self, password: &str, expected: &str) -> Result<bool, AuthError> {
        let (password, salt) = (password.to_owned(), self.salt.clone());
        let expected = expected.to_owned();
        let matched = tokio::task::spawn_blocking(move || {
            verify_password(&password, &salt, &expected)
        })
        .await?;
        Ok(matched)
    }
}
