//! Link entity representing a short code mapping.

use chrono::{DateTime, Utc};

/// Lifespan reported for every link. Links never expire.
pub const NO_EXPIRY: i64 = 0;

/// A stored mapping between an original link and its short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub original_link: String,
    pub short_code: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        original_link: String,
        short_code: String,
        owner_id: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_link,
            short_code,
            owner_id,
            created_at,
        }
    }

    pub fn lifespan(&self) -> i64 {
        NO_EXPIRY
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub original_link: String,
    pub short_code: String,
    pub owner_id: i64,
}

/// Full replacement of the mutable fields of a link (admin edit).
#[derive(Debug, Clone)]
pub struct LinkUpdate {
    pub original_link: String,
    pub short_code: String,
}

/// All links of one owner, as returned by the admin listing.
#[derive(Debug, Clone)]
pub struct OwnerLinks {
    pub owner_id: i64,
    pub username: String,
    pub links: Vec<Link>,
}
