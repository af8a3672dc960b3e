//! DTO for the link update endpoint.

use serde::Deserialize;
use validator::Validate;

/// Request body for `PUT /admin/links/{id}`.
///
/// Both fields are replaced. `converted_link` may be a bare short code or a
/// full short URL under the service's base URL.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Original link is required"))]
    pub original_link: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Converted link is required"))]
    pub converted_link: String,
}
