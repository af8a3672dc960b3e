//! Account registration and password verification.

use std::sync::{Arc, LazyLock};

use serde_json::json;

use crate::domain::entities::{Account, NewAccount, Role};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

/// bcrypt cost factor used for stored passwords.
pub const BCRYPT_COST: u32 = 10;

/// Hash verified when the username is unknown, so the response time does not
/// reveal whether an account exists.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| bcrypt::hash("shortly-dummy-password", BCRYPT_COST).ok());

/// Wraps password hashing around the account store.
///
/// Hashing and verification are CPU-bound and run on tokio's blocking pool.
pub struct CredentialService<R: AccountRepository + ?Sized> {
    repository: Arc<R>,
    cost: u32,
}

impl<R: AccountRepository + ?Sized> CredentialService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_cost(repository, BCRYPT_COST)
    }

    /// Creates a service with a custom bcrypt cost. Intended for tests.
    pub fn with_cost(repository: Arc<R>, cost: u32) -> Self {
        Self { repository, cost }
    }

    /// Fails with [`AppError::DuplicateUsername`] if `username` is taken.
    ///
    /// An empty username is never taken.
    pub async fn ensure_available(&self, username: &str) -> Result<(), AppError> {
        if username.is_empty() {
            return Ok(());
        }

        if self
            .repository
            .find_by_username(username)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateUsername {
                username: username.to_string(),
            });
        }

        Ok(())
    }

    /// Registers a new account.
    ///
    /// A taken username is reported before any other input problem.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateUsername`] if the username is taken and
    /// [`AppError::Validation`] if username or password is empty.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, AppError> {
        self.ensure_available(username).await?;

        if username.is_empty() || password.is_empty() {
            return Err(AppError::bad_request(
                "Username and password are required",
                json!({}),
            ));
        }

        let password_hash = hash_password(password.to_string(), self.cost).await?;

        let account = self
            .repository
            .create(NewAccount {
                username: username.to_string(),
                password_hash,
                role,
            })
            .await?;

        tracing::info!(account_id = account.id, username = %account.username, role = %account.role, "Account registered");

        Ok(account)
    }

    /// Checks a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCredentials`] both for an unknown username and
    /// for a wrong password.
    pub async fn verify(&self, username: &str, password: &str) -> Result<Account, AppError> {
        let Some(account) = self.repository.find_by_username(username).await? else {
            verify_against_dummy(password.to_string()).await;
            tracing::warn!(username, "Login failed: unknown username");
            return Err(AppError::InvalidCredentials);
        };

        let matches =
            verify_password(password.to_string(), account.password_hash.clone()).await?;

        if !matches {
            tracing::warn!(username, account_id = account.id, "Login failed: password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        Ok(account)
    }
}

async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal("Hashing task failed", json!({ "reason": e.to_string() })))?
        .map_err(|e| AppError::internal("Password hashing failed", json!({ "reason": e.to_string() })))
}

/// Spends a full verification on the dummy hash. The hash is built lazily on
/// the blocking pool.
async fn verify_against_dummy(password: String) {
    let _ = tokio::task::spawn_blocking(move || {
        if let Some(dummy) = DUMMY_HASH.as_ref() {
            let _ = bcrypt::verify(password, dummy);
        }
    })
    .await;
}

/// bcrypt compares in constant time. A malformed stored hash counts as a mismatch.
async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let result = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            AppError::internal("Verification task failed", json!({ "reason": e.to_string() }))
        })?;

    match result {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::error!(error = %e, "Stored password hash could not be parsed");
            Ok(false)
        }
    }
}
