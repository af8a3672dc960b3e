//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod admin_links;
pub mod auth;
pub mod convert;
pub mod health;
pub mod update_link;
