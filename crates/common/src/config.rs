//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::{anyhow, Result};
use std::env;

/// Default session lifetime: 24 hours
pub const DEFAULT_JWT_TTL_SECONDS: i64 = 86_400;

/// Default `iss` claim stamped into issued tokens
pub const DEFAULT_JWT_ISSUER: &str = "campus-api";

#[derive(Clone)]
pub struct Config {
    /// HMAC signing secret for session tokens
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,
    pub jwt_issuer: String,

    /// Comma-separated list; `None` means permissive CORS (local development)
    pub cors_allowed_origins: Option<String>,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_ttl_seconds", &self.jwt_ttl_seconds)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing or unparseable required settings are reported here so the
    /// process fails before it binds a socket.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow!("JWT_SECRET is required"))?;

        let jwt_ttl_seconds = match lookup("JWT_TTL_SECONDS") {
            Some(raw) => {
                let ttl: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("JWT_TTL_SECONDS must be an integer, got {:?}", raw))?;
                if ttl <= 0 {
                    return Err(anyhow!("JWT_TTL_SECONDS must be positive, got {}", ttl));
                }
                ttl
            }
            None => DEFAULT_JWT_TTL_SECONDS,
        };

        let config = Self {
            jwt_secret,
            jwt_ttl_seconds,
            jwt_issuer: lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_JWT_ISSUER.to_string()),

            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS").filter(|s| !s.trim().is_empty()),

            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "campus=debug".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}
