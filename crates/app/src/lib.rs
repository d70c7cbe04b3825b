//! Campus application composition root
//!
//! Builds the token service from configuration and composes the routers.

pub mod handlers;

use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use campus_auth::{AuthBackend, AuthConfig};
use campus_common::Config;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

/// Maximum accepted request body
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthBackend,
}

impl FromRef<AppState> for AuthBackend {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// Build the auth backend from process configuration.
///
/// A missing signing secret is fatal here, before any route exists.
pub fn build_auth_backend(config: &Config) -> Result<AuthBackend, anyhow::Error> {
    let auth_config = AuthConfig::try_from(config)
        .map_err(|e| anyhow::anyhow!("Invalid auth configuration: {}", e))?;

    Ok(AuthBackend::new(auth_config))
}

/// Create the main application router with all routes
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    let auth = build_auth_backend(config)?;
    Ok(create_app_with_backend(auth))
}

/// Create the router around an already-built auth backend
pub fn create_app_with_backend(auth: AuthBackend) -> Router {
    let state = AppState { auth };

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Campus API v0.0.1-SNAPSHOT" }))
        .merge(auth_routes())
        .fallback(handlers::not_found)
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/session", get(handlers::auth::session))
        .route("/v1/auth/whoami", get(handlers::auth::whoami))
        .route("/v1/auth/refresh", post(handlers::auth::refresh))
        .route("/v1/admin/session", get(handlers::auth::admin_session))
}

/// Wrap the router in the HTTP middleware shared by both binaries.
///
/// One `Router::layer` call per layer: `CorsLayer` cannot wrap
/// `RequestBodyLimitLayer`'s response body directly.
pub fn apply_layers(app: Router, config: &Config) -> Router {
    app.layer(body_limit_layer())
        .layer(build_cors_layer(config.cors_allowed_origins.as_deref()))
        .layer(TraceLayer::new_for_http())
}

/// Log filter: `RUST_LOG` from the process environment when it parses,
/// otherwise the configured default (which keeps role-gate audit warnings).
pub fn log_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
}

/// CORS layer: an explicit origin list when configured, permissive otherwise
pub fn build_cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    let Some(allowed_origins) = allowed_origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(BODY_LIMIT_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
