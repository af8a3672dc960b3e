//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::application::services::AuthService;
use crate::domain::entities::{Claims, Role};
use crate::{error::AppError, state::AppState};

/// Authenticates requests using the session token from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Verify signature and expiry
/// 3. Insert the verified [`Claims`] into request extensions
/// 4. Continue to next middleware/handler
///
/// Handlers read the caller with `Extension<Claims>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or malformed, or the
/// token does not verify. The response carries `WWW-Authenticate: Bearer`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/convert", post(convert_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (req, claims) = authenticate_request(&st, req).await?;

    Ok(next.run(with_claims(req, claims)).await)
}

/// Same as [`layer`], then requires the admin role.
///
/// # Errors
///
/// Returns `401` as [`layer`] does, and `403 Forbidden` for non-admin callers.
pub async fn admin_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (req, claims) = authenticate_request(&st, req).await?;
    AuthService::authorize(&claims, Role::Admin)?;

    Ok(next.run(with_claims(req, claims)).await)
}

async fn authenticate_request(st: &AppState, req: Request) -> Result<(Request, Claims), AppError> {
    let (mut parts, body) = req.into_parts();

    // A missing or non-Bearer header is treated as no token at all.
    let bearer = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token);

    let claims = st.auth_service.authenticate(bearer.as_deref())?;

    Ok((Request::from_parts(parts, body), claims))
}

fn with_claims(mut req: Request, claims: Claims) -> Request {
    req.extensions_mut().insert(claims);
    req
}
