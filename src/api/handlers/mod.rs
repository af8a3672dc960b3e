//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin_links;
pub mod auth;
pub mod convert;
pub mod health;

pub use admin_links::{delete_link_handler, list_links_handler, update_link_handler};
pub use auth::{login_handler, signup_handler};
pub use convert::convert_handler;
pub use health::health_handler;
