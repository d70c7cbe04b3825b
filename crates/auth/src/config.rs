//! Authentication configuration

use std::fmt;

use campus_common::Config;

use crate::error::ConfigurationError;

/// HMAC key for session tokens. Never printed.
#[derive(Clone)]
pub struct SigningSecret(String);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigurationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigurationError::MissingSecret);
        }
        Ok(Self(secret))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Authentication configuration, built once at startup
#[derive(Debug, Clone)]
pub struct AuthConfig {
    secret: SigningSecret,
    issuer: String,
    default_ttl_seconds: i64,
}

impl AuthConfig {
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        default_ttl_seconds: i64,
    ) -> Result<Self, ConfigurationError> {
        if default_ttl_seconds <= 0 {
            return Err(ConfigurationError::InvalidTtl(default_ttl_seconds));
        }

        Ok(Self {
            secret: SigningSecret::new(secret)?,
            issuer: issuer.into(),
            default_ttl_seconds,
        })
    }

    pub fn secret(&self) -> &SigningSecret {
        &self.secret
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn default_ttl_seconds(&self) -> i64 {
        self.default_ttl_seconds
    }
}

impl TryFrom<&Config> for AuthConfig {
    type Error = ConfigurationError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        AuthConfig::new(
            config.jwt_secret.clone(),
            config.jwt_issuer.clone(),
            config.jwt_ttl_seconds,
        )
    }
}
