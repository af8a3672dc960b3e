//! Handler for the convert endpoint.

use axum::{Extension, Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::convert::{ConvertRequest, ConvertResponse};
use crate::domain::entities::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a link on behalf of the authenticated caller.
///
/// # Endpoint
///
/// `POST /convert` (Bearer token required)
///
/// # Request Body
///
/// ```json
/// { "link": "https://example.com/very/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "code": 200,
///   "converted_link": "https://short.ly/k3x9a",
///   "short_code": "k3x9a",
///   "lifespan": 0
/// }
/// ```
///
/// The same link may be converted any number of times; each call yields a
/// new mapping.
pub async fn convert_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<ConvertResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create_for_owner(&payload.link, claims.id)
        .await?;

    Ok(Json(ConvertResponse {
        code: 200,
        converted_link: state.link_service.short_url(&link.short_code),
        lifespan: link.lifespan(),
        short_code: link.short_code,
    }))
}
