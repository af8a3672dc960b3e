//! Link mapping registry: creation for owners and admin CRUD.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::services::CodeAllocator;
use crate::domain::entities::{Link, LinkUpdate, OwnerLinks};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for creating, listing, editing and deleting link mappings.
///
/// Short codes are stored bare; [`Self::short_url`] renders them against the
/// configured base URL.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    allocator: CodeAllocator<L>,
    base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, base_url: impl Into<String>) -> Self {
        let allocator = CodeAllocator::new(link_repository.clone());
        Self::with_allocator(link_repository, allocator, base_url)
    }

    pub fn with_allocator(
        link_repository: Arc<L>,
        allocator: CodeAllocator<L>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            link_repository,
            allocator,
            base_url,
        }
    }

    /// Shortens `original_link` on behalf of `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the link is empty and
    /// [`AppError::AllocationExhausted`] if no unique code could be found.
    pub async fn create_for_owner(
        &self,
        original_link: &str,
        owner_id: i64,
    ) -> Result<Link, AppError> {
        if original_link.trim().is_empty() {
            return Err(AppError::bad_request(
                "Link is required",
                json!({ "field": "link" }),
            ));
        }

        let link = self.allocator.allocate(original_link, owner_id).await?;

        tracing::info!(
            link_id = link.id,
            owner_id,
            code = %link.short_code,
            "Link converted"
        );

        Ok(link)
    }

    /// Lists every mapping grouped by owner.
    ///
    /// Owners appear in ascending id order and each owner's links in ascending
    /// link id order. Links sharing an original link are all kept.
    pub async fn list_all(&self) -> Result<Vec<OwnerLinks>, AppError> {
        let rows = self.link_repository.list_with_owners().await?;

        let mut owners: BTreeMap<i64, OwnerLinks> = BTreeMap::new();
        for row in rows {
            owners
                .entry(row.link.owner_id)
                .or_insert_with(|| OwnerLinks {
                    owner_id: row.link.owner_id,
                    username: row.username.clone(),
                    links: Vec::new(),
                })
                .links
                .push(row.link);
        }

        Ok(owners.into_values().collect())
    }

    /// Deletes a mapping by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this id.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        if !self.link_repository.delete(id).await? {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        tracing::info!(link_id = id, "Link deleted");
        Ok(())
    }

    /// Replaces the original link and short code of a mapping.
    ///
    /// `converted_link` may be a bare code or a full short URL under the
    /// configured base URL.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if either field is empty
    /// - [`AppError::NotFound`] if no mapping has this id
    /// - [`AppError::DuplicateCode`] if the code belongs to another mapping
    pub async fn update_by_id(
        &self,
        id: i64,
        original_link: &str,
        converted_link: &str,
    ) -> Result<Link, AppError> {
        let short_code = self.code_from_converted(converted_link.trim());

        if original_link.trim().is_empty() || short_code.is_empty() {
            return Err(AppError::bad_request(
                "Original link and converted link are required",
                json!({ "id": id }),
            ));
        }

        if self.link_repository.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        if let Some(existing) = self.link_repository.find_by_code(short_code).await?
            && existing.id != id
        {
            return Err(AppError::DuplicateCode {
                code: short_code.to_string(),
            });
        }

        let update = LinkUpdate {
            original_link: original_link.to_string(),
            short_code: short_code.to_string(),
        };

        let link = self
            .link_repository
            .update(id, update)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        tracing::info!(link_id = id, code = %link.short_code, "Link updated");

        Ok(link)
    }

    /// Counts stored links. Used as the store liveness check.
    pub async fn store_health(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    fn code_from_converted<'a>(&self, converted_link: &'a str) -> &'a str {
        converted_link
            .strip_prefix(self.base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(converted_link)
    }
}
