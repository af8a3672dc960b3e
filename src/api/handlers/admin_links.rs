//! Handlers for administrator link management (list, update, delete).

use axum::{
    Extension, Json,
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::admin_links::{AdminLinksResponse, LinkItem, OwnerLinksItem, owner_key};
use crate::api::dto::auth::MessageResponse;
use crate::api::dto::update_link::UpdateLinkRequest;
use crate::domain::entities::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every stored mapping grouped by owner.
///
/// # Endpoint
///
/// `GET /admin/links` (admin token required)
///
/// # Response
///
/// ```json
/// {
///   "code": 200,
///   "users": {
///     "user_1": {
///       "username": "alice",
///       "list_of_converted_links": [
///         { "id": 1, "original_link": "https://example.com", "converted_link": "https://short.ly/k3x9a" }
///       ]
///     }
///   }
/// }
/// ```
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<AdminLinksResponse>, AppError> {
    let owners = state.link_service.list_all().await?;

    let users = owners
        .into_iter()
        .map(|owner| {
            let links = owner
                .links
                .into_iter()
                .map(|link| LinkItem {
                    id: link.id,
                    converted_link: state.link_service.short_url(&link.short_code),
                    original_link: link.original_link,
                })
                .collect();

            (
                owner_key(owner.owner_id),
                OwnerLinksItem {
                    username: owner.username,
                    list_of_converted_links: links,
                },
            )
        })
        .collect();

    Ok(Json(AdminLinksResponse { code: 200, users }))
}

/// Replaces the original link and short code of a mapping.
///
/// # Endpoint
///
/// `PUT /admin/links/{id}` (admin token required)
///
/// # Errors
///
/// - **400**: either field empty
/// - **404**: no mapping with this id
/// - **409**: the short code belongs to another mapping
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateLinkRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    state
        .link_service
        .update_by_id(id, &payload.original_link, &payload.converted_link)
        .await?;

    tracing::info!(link_id = id, admin = %claims.username, "Admin updated link");

    Ok(Json(MessageResponse::new("Link updated successfully")))
}

/// Deletes a mapping.
///
/// # Endpoint
///
/// `DELETE /admin/links/{id}` (admin token required)
///
/// # Errors
///
/// - **404**: no mapping with this id
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;

    state.link_service.delete_by_id(id).await?;

    tracing::info!(link_id = id, admin = %claims.username, "Admin deleted link");

    Ok(Json(MessageResponse::new("Link deleted successfully")))
}
