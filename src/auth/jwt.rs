use std::time::Duration;

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, error, warn};

use crate::{config::JwtConfig, error::AuthError};

/// What a bearer token vouches for. `created_at` pins the token to one
/// registration of the email, so a re-created account does not accept old tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedClaim {
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Wire payload of the JWT.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenClaims {
    email: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    iat: i64,
    exp: i64,
    iss: String,
    aud: String,
}

/// Signing secret plus the issuer, audience and default lifetime tokens are sealed with.
#[derive(Clone)]
pub struct JwtKeys {
    secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl JwtKeys {
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl,
        }
    }

    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self::new(
            cfg.secret.clone(),
            cfg.issuer.clone(),
            cfg.audience.clone(),
            Duration::from_secs((cfg.ttl_minutes as u64) * 60),
        )
    }

    /// Seals with the configured lifetime.
    pub fn seal(&self, claim: &SignedClaim) -> Result<String, AuthError> {
        self.seal_for(claim, self.ttl)
    }

    pub fn seal_for(&self, claim: &SignedClaim, ttl: Duration) -> Result<String, AuthError> {
        self.seal_at(claim, ttl, OffsetDateTime::now_utc())
    }

    fn seal_at(
        &self,
        claim: &SignedClaim,
        ttl: Duration,
        now: OffsetDateTime,
    ) -> Result<String, AuthError> {
        if self.secret.is_empty() {
            error!("refusing to sign with an empty secret");
            return Err(AuthError::Signing);
        }
        let exp = now + TimeDuration::seconds(ttl.as_secs() as i64);
        let payload = TokenClaims {
            email: claim.email.clone(),
            created_at: claim.created_at,
            iat: now.unix_timestamp(),
            exp: exp.unix_timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            error!(error = %e, "jwt encode failed");
            AuthError::Signing
        })?;
        debug!(email = %claim.email, ttl_secs = ttl.as_secs(), "jwt sealed");
        Ok(token)
    }

    /// Verifies signature, issuer, audience and expiry (no leeway).
    pub fn unseal(&self, token: &str) -> Result<SignedClaim, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        decode_claim(token, &self.secret, &validation)
    }
}

fn decode_claim(
    token: &str,
    secret: &str,
    validation: &Validation,
) -> Result<SignedClaim, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::Signing);
    }
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => {
            debug!("jwt expired");
            AuthError::TokenExpired
        }
        other => {
            warn!(reason = ?other, "jwt rejected");
            AuthError::TokenInvalid
        }
    })?;
    debug!(email = %data.claims.email, "jwt verified");
    Ok(SignedClaim {
        email: data.claims.email,
        created_at: data.claims.created_at,
    })
}

/// Seals `claim` for `ttl` with `secret` using the default issuer and audience.
pub fn seal(claim: &SignedClaim, ttl: Duration, secret: &str) -> Result<String, AuthError> {
    default_keys(secret, ttl).seal(claim)
}

/// Verifies signature and expiry only, so it accepts tokens from any [`JwtKeys`]
/// sharing `secret`, whatever issuer and audience they carry.
pub fn unseal(token: &str, secret: &str) -> Result<SignedClaim, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_aud = false;
    decode_claim(token, secret, &validation)
}

fn default_keys(secret: &str, ttl: Duration) -> JwtKeys {
    JwtKeys::new(secret, "authgate", "authgate-users", ttl)
}
