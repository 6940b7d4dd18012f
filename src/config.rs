use serde::Deserialize;

use crate::error::AuthError;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub password_salt: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Salt, secret and database URL
    /// must be present and non-empty before anything is hashed or sealed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AuthError::Configuration(format!("{key} is not set")))
        };

        let database_url = required("DATABASE_URL")?;
        let password_salt = required("PASSWORD_SALT")?;
        let jwt = JwtConfig {
            secret: required("SECRET_KEY")?,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "authgate".into()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "authgate-users".into()),
            ttl_minutes: ttl_minutes(lookup("JWT_TTL_MINUTES"))?,
        };
        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AuthError::Configuration(format!("PORT is not a valid port: {raw}"))
            })?,
            None => 5000,
        };

        Ok(Self {
            database_url,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            password_salt,
            jwt,
        })
    }
}

/// Token lifetime in minutes; 20 when unset. Anything else must be a positive integer.
fn ttl_minutes(raw: Option<String>) -> Result<i64, AuthError> {
    let Some(raw) = raw else {
        return Ok(20);
    };
    raw.parse::<i64>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            AuthError::Configuration(format!("JWT_TTL_MINUTES is not a positive number: {raw}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/auth"),
            ("PASSWORD_SALT", "pepper"),
            ("SECRET_KEY", "s3cret"),
        ]))
        .expect("config loads");
        assert_eq!(cfg.password_salt, "pepper");
        assert_eq!(cfg.jwt.secret, "s3cret");
        assert_eq!(cfg.jwt.ttl_minutes, 20);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.host, "0.0.0.0");
    }

    #[test]
    fn missing_salt_is_a_configuration_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/auth"),
            ("SECRET_KEY", "s3cret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AuthError::Configuration(ref m) if m.contains("PASSWORD_SALT")));
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/auth"),
            ("PASSWORD_SALT", "pepper"),
            ("SECRET_KEY", "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, AuthError::Configuration(ref m) if m.contains("SECRET_KEY")));
    }

    #[test]
    fn rejects_garbage_port() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/auth"),
            ("PASSWORD_SALT", "pepper"),
            ("SECRET_KEY", "s3cret"),
            ("PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AuthError::Configuration(_)));
    }

    #[test]
    fn rejects_garbage_ttl() {
        for ttl in ["abc", "0", "-5"] {
            let err = AppConfig::from_lookup(lookup_from(&[
                ("DATABASE_URL", "postgres://localhost/auth"),
                ("PASSWORD_SALT", "pepper"),
                ("SECRET_KEY", "s3cret"),
                ("JWT_TTL_MINUTES", ttl),
            ]))
            .unwrap_err();
            assert!(
                matches!(err, AuthError::Configuration(ref m) if m.contains("JWT_TTL_MINUTES")),
                "{ttl}"
            );
        }
    }

    #[test]
    fn reads_explicit_ttl() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/auth"),
            ("PASSWORD_SALT", "pepper"),
            ("SECRET_KEY", "s3cret"),
            ("JWT_TTL_MINUTES", "45"),
        ]))
        .expect("config loads");
        assert_eq!(cfg.jwt.ttl_minutes, 45);
    }
}
