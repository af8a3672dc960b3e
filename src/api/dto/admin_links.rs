//! DTOs for the admin link listing.

use std::collections::BTreeMap;

use serde::Serialize;

/// Response for `GET /admin/links`.
///
/// `users` is keyed by `user_<id>`. Only owners with at least one link appear.
/// Keys carry no ordering; each owner's links are in ascending link id order.
#[derive(Debug, Serialize)]
pub struct AdminLinksResponse {
    pub code: u16,
    pub users: BTreeMap<String, OwnerLinksItem>,
}

#[derive(Debug, Serialize)]
pub struct OwnerLinksItem {
    pub username: String,
    pub list_of_converted_links: Vec<LinkItem>,
}

/// A single mapping as shown to administrators.
#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub id: i64,
    pub original_link: String,
    pub converted_link: String,
}

/// Map key for an owner in [`AdminLinksResponse::users`].
pub fn owner_key(owner_id: i64) -> String {
    format!("user_{}", owner_id)
}
