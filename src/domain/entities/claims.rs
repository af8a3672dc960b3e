//! Session token claims.

use serde::{Deserialize, Serialize};

use super::account::{Account, Role};

/// Verified payload of a session token.
///
/// Produced by [`crate::application::services::TokenService`], never persisted.
/// `iat` and `exp` are Unix timestamps in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn for_account(account: &Account, iat: i64, exp: i64) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            role: account.role,
            iat,
            exp,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
