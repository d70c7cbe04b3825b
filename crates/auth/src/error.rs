//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::claims::Claims;

/// Fatal startup error: the token service cannot be built
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("signing secret is empty or unset")]
    MissingSecret,

    #[error("default token ttl must be positive, got {0}")]
    InvalidTtl(i64),
}

/// Why a presented token was refused
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidToken {
    /// Wrong segment count, undecodable header, or undecodable claims
    #[error("malformed token")]
    Malformed,

    /// MAC does not match: tampered or signed with another secret
    #[error("bad signature")]
    BadSignature,

    #[error("token expired")]
    Expired,
}

/// Outcome of verifying a token
pub type VerificationResult = Result<Claims, InvalidToken>;

/// Per-call issuance failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IssueError {
    #[error("token ttl must be positive and representable, got {0}")]
    InvalidTtl(i64),

    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Request guard rejection.
///
/// Every 401 variant renders the same body so clients cannot tell which
/// check failed; the specific reason only reaches the server log.
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken(InvalidToken),
    Forbidden,
}

impl From<InvalidToken> for AuthError {
    fn from(reason: InvalidToken) -> Self {
        AuthError::InvalidToken(reason)
    }
}

impl From<IssueError> for campus_common::Error {
    fn from(error: IssueError) -> Self {
        campus_common::Error::Internal(error.to_string())
    }
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthorization
            | AuthError::InvalidAuthorizationFormat
            | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message) = match self {
            AuthError::MissingAuthorization
            | AuthError::InvalidAuthorizationFormat
            | AuthError::InvalidToken(_) => ("UNAUTHORIZED", "Invalid or expired session"),
            AuthError::Forbidden => ("FORBIDDEN", "Insufficient permissions"),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
