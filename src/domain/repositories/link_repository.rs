//! Repository trait for link mapping data access.

use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// A link joined with its owner's username.
#[derive(Debug, Clone)]
pub struct LinkWithOwner {
    pub link: Link,
    pub username: String,
}

/// Repository interface for link mappings.
///
/// The store enforces global uniqueness of short codes; implementations must
/// report a violated uniqueness constraint as [`AppError::DuplicateCode`] rather
/// than a generic store error, so callers can react to lost races.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateCode`] if the short code already exists.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a mapping by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Returns every mapping joined with its owner, ordered by owner id then link id.
    async fn list_with_owners(&self) -> Result<Vec<LinkWithOwner>, AppError>;

    /// Replaces both mutable fields of a mapping.
    ///
    /// Returns `Ok(None)` if no mapping has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateCode`] if the new code belongs to another mapping.
    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Option<Link>, AppError>;

    /// Hard-deletes a mapping. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts all mappings.
    async fn count(&self) -> Result<i64, AppError>;
}
