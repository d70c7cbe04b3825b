//! Session authentication for the Campus API
//!
//! Issues and verifies HS256-signed session tokens, gates requests by role,
//! and exposes axum extractors that work with any state implementing
//! `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod clock;
mod config;
mod error;
mod extractors;
mod gate;
mod jwt;

pub use backend::AuthBackend;
pub use claims::{Claims, Identity, Role};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AuthConfig, SigningSecret};
pub use error::{AuthError, ConfigurationError, InvalidToken, IssueError, VerificationResult};
pub use extractors::{Authorized, AuthUser, MaybeAuthUser};
pub use gate::{authorize, AdminOnly, AnyRole, Decision, RoleSet, Staff};
