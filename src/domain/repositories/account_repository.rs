//! Repository trait for account storage.

use crate::domain::entities::{Account, NewAccount};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for registered accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persists a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateUsername`] if the username is taken, including
    /// when a concurrent registration wins the race.
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError>;

    /// Finds an account by exact (case-sensitive) username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError>;

    /// Lists all accounts ordered by id.
    async fn list(&self) -> Result<Vec<Account>, AppError>;
}
