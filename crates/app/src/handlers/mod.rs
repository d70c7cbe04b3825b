//! HTTP handlers

pub mod auth;

use axum::http::Uri;
use campus_common::Error;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> Error {
    Error::NotFound(format!("no route for {}", uri.path()))
}
