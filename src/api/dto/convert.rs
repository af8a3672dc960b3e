//! DTOs for the convert endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /convert`.
#[derive(Debug, Deserialize, Validate)]
pub struct ConvertRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Link is required"))]
    pub link: String,
}

/// Successful conversion.
///
/// `converted_link` is the full short URL; `short_code` is the bare code.
/// `lifespan` is always `0` (no expiry).
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub code: u16,
    pub converted_link: String,
    pub short_code: String,
    pub lifespan: i64,
}
