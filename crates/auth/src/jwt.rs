//! HS256 token encoding, verification, and bearer extraction helpers

use axum::http::HeaderValue;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::{AuthError, InvalidToken, IssueError, VerificationResult};

/// Sign claims into the compact `header.payload.signature` form
pub(crate) fn encode_token(claims: &Claims, config: &AuthConfig) -> Result<String, IssueError> {
    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(config.secret().as_bytes());

    encode(&header, claims, &encoding_key).map_err(|e| IssueError::Encoding(e.to_string()))
}

/// Verify a compact token against the configured secret and `now`.
///
/// The MAC is checked before the payload is decoded. Expiry is checked here
/// rather than by the library so the caller's clock is authoritative, and
/// `now == exp` already counts as expired.
pub(crate) fn verify_token(token: &str, config: &AuthConfig, now: i64) -> VerificationResult {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        return Err(InvalidToken::Malformed);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.set_issuer(&[config.issuer()]);

    let decoding_key = DecodingKey::from_secret(config.secret().as_bytes());

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::InvalidSignature => InvalidToken::BadSignature,
            _ => InvalidToken::Malformed,
        }
    })?;

    let claims = token_data.claims;
    if now >= claims.expires_at {
        return Err(InvalidToken::Expired);
    }

    Ok(claims)
}

/// Extract bearer token from Authorization header.
///
/// The scheme name is matched case-insensitively (RFC 7235).
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    match header_str.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            Ok(token.trim().to_string())
        }
        _ => Err(AuthError::InvalidAuthorizationFormat),
    }
}
