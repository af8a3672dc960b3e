//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /signup`, `POST /login`, `GET /health` - public
//! - `POST /convert`                             - Bearer token required
//! - `/admin/links*`                             - Bearer token with admin role
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Per-request deadline, answered with `408`
//! - **Authentication** - Bearer token, role checked for admin routes
//! - **Path normalization** - Trailing slash handling

use std::time::Duration;

use crate::api::middleware::{auth, tracing};
use crate::api::routes::{admin_routes, protected_routes, public_routes};
use crate::state::AppState;
use axum::{Router, http::StatusCode, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - upper bound on handling a single request
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state, request_timeout))
}

/// The routed application without path normalization.
pub fn api_router(state: AppState, request_timeout: Duration) -> Router {
    let protected = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let admin = admin_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::admin_layer,
    ));

    let timeout = TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout);

    Router::new()
        .merge(public_routes())
        .merge(protected)
        .merge(admin)
        .with_state(state)
        .layer(timeout)
        .layer(tracing::layer())
}
