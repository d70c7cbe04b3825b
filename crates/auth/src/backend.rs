//! Token service backing the request guards
//!
//! Bundles the startup configuration with a clock. Issue and verify are
//! pure apart from the clock read, so one backend is shared by every request.

use std::sync::Arc;

use crate::claims::{Claims, Identity};
use crate::clock::{Clock, SystemClock};
use crate::config::AuthConfig;
use crate::error::{IssueError, VerificationResult};
use crate::jwt::{encode_token, verify_token};

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AuthBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthBackend")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            clock,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Issue a signed token valid for `ttl_seconds` from now
    pub fn issue(&self, identity: &Identity, ttl_seconds: i64) -> Result<String, IssueError> {
        if ttl_seconds <= 0 {
            return Err(IssueError::InvalidTtl(ttl_seconds));
        }

        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add(ttl_seconds)
            .ok_or(IssueError::InvalidTtl(ttl_seconds))?;

        let claims = Claims {
            issuer: self.config.issuer().to_string(),
            issued_at,
            expires_at,
            subject_id: identity.subject_id,
            email: identity.email.clone(),
            role: identity.role,
            display_name: identity.display_name.clone(),
        };

        let token = encode_token(&claims, &self.config)?;

        tracing::debug!(
            subject_id = identity.subject_id,
            role = %identity.role,
            expires_at,
            "Issued session token"
        );

        Ok(token)
    }

    /// Issue with the configured default lifetime
    pub fn issue_default(&self, identity: &Identity) -> Result<String, IssueError> {
        self.issue(identity, self.config.default_ttl_seconds())
    }

    /// Verify a token; the specific failure is logged, never returned to clients
    pub fn verify(&self, token: &str) -> VerificationResult {
        verify_token(token, &self.config, self.clock.now()).inspect_err(|reason| {
            tracing::debug!(reason = %reason, "Session token rejected");
        })
    }
}
