//! Session introspection and refresh handlers
//!
//! Implements:
//! - GET /v1/auth/session — Anonymous-friendly session probe
//! - GET /v1/auth/whoami — Verified claims of the current caller
//! - POST /v1/auth/refresh — Re-issue a token for the current caller
//! - GET /v1/admin/session — Admin-only session probe

use axum::{extract::State, Json};
use campus_auth::{AdminOnly, AuthBackend, AuthUser, Authorized, Claims, MaybeAuthUser};
use campus_common::Result;
use serde::Serialize;

/// Response shape for the verified caller
#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub user_id: i64,
    pub email: String,
    pub role: String,
    pub name: String,
    pub issued_at: i64,
    pub expires_at: i64,
    /// Seconds of validity left when the response was built
    pub expires_in: i64,
}

impl WhoamiResponse {
    fn new(claims: Claims, now: i64) -> Self {
        Self {
            expires_in: claims.remaining_seconds(now),
            user_id: claims.subject_id,
            email: claims.email,
            role: claims.role.to_string(),
            name: claims.display_name,
            issued_at: claims.issued_at,
            expires_at: claims.expires_at,
        }
    }
}

/// Response shape for `GET /v1/auth/session`
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<WhoamiResponse>,
}

/// Response shape for `POST /v1/auth/refresh`
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// GET /v1/auth/session — `authenticated: false` for anonymous callers
pub async fn session(
    State(auth): State<AuthBackend>,
    MaybeAuthUser(claims): MaybeAuthUser,
) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: claims.is_some(),
        user: claims.map(|claims| WhoamiResponse::new(claims, auth.now())),
    })
}

/// GET /v1/auth/whoami — Return the verified claims of the current caller
pub async fn whoami(
    State(auth): State<AuthBackend>,
    AuthUser(claims): AuthUser,
) -> Json<WhoamiResponse> {
    Json(WhoamiResponse::new(claims, auth.now()))
}

/// POST /v1/auth/refresh — Issue a fresh token with the default lifetime
pub async fn refresh(
    State(auth): State<AuthBackend>,
    AuthUser(claims): AuthUser,
) -> Result<Json<RefreshResponse>> {
    let token = auth.issue_default(&claims.identity())?;

    tracing::info!(subject_id = claims.subject_id, "Session refreshed");

    Ok(Json(RefreshResponse {
        token,
        token_type: "Bearer",
        expires_in: auth.config().default_ttl_seconds(),
    }))
}

/// GET /v1/admin/session — Same as whoami, admins only
pub async fn admin_session(
    State(auth): State<AuthBackend>,
    admin: Authorized<AdminOnly>,
) -> Json<WhoamiResponse> {
    Json(WhoamiResponse::new(admin.into_claims(), auth.now()))
}
