//! Short code allocation with a global uniqueness guarantee.

use std::sync::Arc;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{code_length_for_attempt, generate_code};

/// Maximum number of codes tried before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Retries of a whole allocation after a transient store failure.
const STORE_RETRY_ATTEMPTS: usize = 3;
const STORE_RETRY_BASE_MS: u64 = 10;

/// Produces a candidate code of the requested length.
pub type CodeGenerator = Arc<dyn Fn(usize) -> String + Send + Sync>;

/// Generates short codes and persists new mappings.
///
/// Each attempt checks the registry for the candidate and then inserts it. The
/// store's unique constraint is the final arbiter: an insert that loses a race
/// to a concurrent allocation comes back as [`AppError::DuplicateCode`] and is
/// treated like any other collision.
pub struct CodeAllocator<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    generator: CodeGenerator,
    max_attempts: usize,
}

impl<L: LinkRepository + ?Sized> CodeAllocator<L> {
    pub fn new(repository: Arc<L>) -> Self {
        Self::with_generator(repository, Arc::new(generate_code))
    }

    /// Creates an allocator with a custom code source.
    pub fn with_generator(repository: Arc<L>, generator: CodeGenerator) -> Self {
        Self {
            repository,
            generator,
            max_attempts: MAX_ALLOCATION_ATTEMPTS,
        }
    }

    /// Allocates a fresh code for `original_link` and stores the mapping.
    ///
    /// Transient store failures restart the check-then-insert cycle with a new
    /// candidate, up to three times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocationExhausted`] if no free code was found
    /// within [`MAX_ALLOCATION_ATTEMPTS`], or the last store error.
    pub async fn allocate(&self, original_link: &str, owner_id: i64) -> Result<Link, AppError> {
        let strategy = ExponentialBackoff::from_millis(STORE_RETRY_BASE_MS)
            .map(jitter)
            .take(STORE_RETRY_ATTEMPTS);

        RetryIf::start(
            strategy,
            || self.try_allocate(original_link, owner_id),
            |e: &AppError| {
                if e.is_transient() {
                    tracing::warn!(error = %e, "Transient store failure during allocation, retrying");
                }
                e.is_transient()
            },
        )
        .await
    }

    async fn try_allocate(&self, original_link: &str, owner_id: i64) -> Result<Link, AppError> {
        for attempt in 0..self.max_attempts {
            let code = (self.generator)(code_length_for_attempt(attempt));

            if self.repository.find_by_code(&code).await?.is_some() {
                tracing::debug!(attempt, code = %code, "Short code collision");
                continue;
            }

            let new_link = NewLink {
                original_link: original_link.to_string(),
                short_code: code,
                owner_id,
            };

            match self.repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::DuplicateCode { code }) => {
                    tracing::debug!(attempt, code = %code, "Lost insert race for short code");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(
            attempts = self.max_attempts,
            owner_id,
            "Short code allocation exhausted"
        );

        Err(AppError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }
}
