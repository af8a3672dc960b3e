//! API route configuration.
//!
//! Routes are grouped by the authentication they require. The caller attaches
//! the matching middleware from [`crate::api::middleware::auth`].

use crate::api::handlers::{
    convert_handler, delete_link_handler, health_handler, list_links_handler, login_handler,
    signup_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Routes open to anonymous callers.
///
/// # Endpoints
///
/// - `POST /signup` - Register an account
/// - `POST /login`  - Exchange credentials for a session token
/// - `GET  /health` - Store liveness check
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .route("/health", get(health_handler))
}

/// Routes for any authenticated account.
///
/// # Endpoints
///
/// - `POST /convert` - Shorten a link
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/convert", post(convert_handler))
}

/// Routes restricted to administrators.
///
/// # Endpoints
///
/// - `GET    /admin/links`      - List all mappings grouped by owner
/// - `PUT    /admin/links/{id}` - Replace a mapping's link and code
/// - `DELETE /admin/links/{id}` - Delete a mapping
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/links", get(list_links_handler))
        .route(
            "/admin/links/{id}",
            put(update_link_handler).delete(delete_link_handler),
        )
}
