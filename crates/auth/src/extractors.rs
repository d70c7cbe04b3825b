//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! These are the only readers of the Authorization header; handlers receive
//! verified `Claims`, never the raw token.

use std::marker::PhantomData;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::AuthBackend;
use crate::claims::Claims;
use crate::error::AuthError;
use crate::gate::{authorize, Decision, RoleSet};
use crate::jwt::extract_bearer_token;

/// Verify the bearer token in `parts`, if any
fn verify_request(parts: &Parts, backend: &AuthBackend) -> Result<Option<Claims>, AuthError> {
    let Some(auth_header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = extract_bearer_token(auth_header)?;
    let claims = backend.verify(&token)?;

    Ok(Some(claims))
}

/// Authenticated user extractor; 401 without a valid token
#[derive(Debug)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        verify_request(parts, &backend)?
            .map(AuthUser)
            .ok_or(AuthError::MissingAuthorization)
    }
}

/// Optional authentication.
///
/// No Authorization header means anonymous (`None`); a header that is present
/// but does not verify is still a 401.
#[derive(Debug)]
pub struct MaybeAuthUser(pub Option<Claims>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        Ok(MaybeAuthUser(verify_request(parts, &backend)?))
    }
}

/// Role-restricted user extractor.
///
/// Like `AuthUser` but rejects roles outside `R::ALLOWED` with 403 FORBIDDEN.
/// ```ignore
/// async fn list_programs(Authorized(claims, _): Authorized<Staff>) -> ... { }
/// ```
#[derive(Debug)]
pub struct Authorized<R: RoleSet>(pub Claims, pub PhantomData<R>);

impl<R: RoleSet> Authorized<R> {
    pub fn into_claims(self) -> Claims {
        self.0
    }
}

impl<S, R> FromRequestParts<S> for Authorized<R>
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
    R: RoleSet,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        match authorize(&claims, R::ALLOWED) {
            Decision::Accepted => Ok(Authorized(claims, PhantomData)),
            Decision::Rejected { role, required } => {
                let required: Vec<&str> = required.iter().map(|r| r.as_str()).collect();
                tracing::warn!(
                    subject_id = claims.subject_id,
                    role = %role,
                    required = ?required,
                    path = %parts.uri.path(),
                    "Role gate rejected request"
                );
                Err(AuthError::Forbidden)
            }
        }
    }
}
