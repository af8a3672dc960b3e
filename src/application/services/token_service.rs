//! Session token issuing and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::json;

use crate::domain::entities::{Account, Claims};
use crate::error::AppError;

/// Lifetime of an issued token.
pub const TOKEN_TTL_HOURS: i64 = 12;

/// Signs and verifies HS256 session tokens.
///
/// The signing key is taken from [`crate::config::Config::jwt_secret`] once at
/// startup. Verification is pure and needs no locking.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    /// Issues a token for `account`, valid for 12 hours from now.
    pub fn issue(&self, account: &Account) -> Result<String, AppError> {
        self.issue_at(account, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, account: &Account, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims::for_account(account, now.timestamp(), (now + self.ttl).timestamp());

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal(
                "Failed to sign token",
                json!({ "reason": e.to_string() }),
            )
        })
    }

    /// Verifies a token against the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidToken`] if the signature does not match, the
    /// token is malformed, or it has expired.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`.
    ///
    /// A token is accepted up to and including its `exp` second, with no leeway.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the supplied clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::InvalidToken
        })?;

        if now.timestamp() > data.claims.exp {
            tracing::debug!(username = %data.claims.username, "Token expired");
            return Err(AppError::InvalidToken);
        }

        Ok(data.claims)
    }
}
