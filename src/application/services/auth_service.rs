//! Authorization gate: bearer token to claims, claims to permission.

use std::sync::Arc;

use crate::application::services::TokenService;
use crate::domain::entities::{Claims, Role};
use crate::error::AppError;

/// Derives the caller's identity from a bearer token and enforces roles.
///
/// Holds no per-request state. The request lifecycle is:
///
/// ```text
/// Unauthenticated --(token present & valid)--> Authenticated{claims} --(role ok)--> Authorized
/// ```
///
/// A failed transition ends the request before any handler runs.
pub struct AuthService {
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Authenticates a raw bearer token.
    ///
    /// # Errors
    ///
    /// - [`AppError::MissingToken`] if no (or an empty) token was presented
    /// - [`AppError::InvalidToken`] if the token fails verification
    pub fn authenticate(&self, bearer: Option<&str>) -> Result<Claims, AppError> {
        let token = bearer
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::MissingToken)?;

        self.tokens.verify(token)
    }

    /// Checks that authenticated claims carry `required` privileges.
    ///
    /// Admins satisfy every role; users satisfy only [`Role::User`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AccessDenied`] on a role mismatch.
    pub fn authorize(claims: &Claims, required: Role) -> Result<(), AppError> {
        if required == Role::Admin && !claims.is_admin() {
            tracing::warn!(
                account_id = claims.id,
                username = %claims.username,
                "Admin access denied"
            );
            return Err(AppError::AccessDenied);
        }

        Ok(())
    }

    /// Authenticates and then authorizes in one step.
    pub fn authenticate_with_role(
        &self,
        bearer: Option<&str>,
        required: Role,
    ) -> Result<Claims, AppError> {
        let claims = self.authenticate(bearer)?;
        Self::authorize(&claims, required)?;
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Account;
    use chrono::Utc;

    fn setup() -> (AuthService, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new("gate-secret"));
        (AuthService::new(tokens.clone()), tokens)
    }

    fn token_for(tokens: &TokenService, role: Role) -> String {
        let account = Account::new(3, "carol".to_string(), "h".to_string(), role, Utc::now());
        tokens.issue(&account).unwrap()
    }

    #[test]
    fn test_missing_token() {
        let (gate, _) = setup();

        assert!(matches!(gate.authenticate(None), Err(AppError::MissingToken)));
        assert!(matches!(
            gate.authenticate(Some("  ")),
            Err(AppError::MissingToken)
        ));
    }

    #[test]
    fn test_invalid_token() {
        let (gate, _) = setup();
        assert!(matches!(
            gate.authenticate(Some("bogus")),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_valid_token_yields_claims() {
        let (gate, tokens) = setup();
        let token = token_for(&tokens, Role::User);

        let claims = gate.authenticate(Some(&token)).unwrap();
        assert_eq!(claims.id, 3);
        assert_eq!(claims.role, Role::User);
    }

    #[test]
    fn test_user_denied_admin() {
        let (gate, tokens) = setup();
        let token = token_for(&tokens, Role::User);

        let result = gate.authenticate_with_role(Some(&token), Role::Admin);
        assert!(matches!(result, Err(AppError::AccessDenied)));
    }

    #[test]
    fn test_admin_passes_every_role() {
        let (gate, tokens) = setup();
        let token = token_for(&tokens, Role::Admin);

        assert!(gate.authenticate_with_role(Some(&token), Role::Admin).is_ok());
        assert!(gate.authenticate_with_role(Some(&token), Role::User).is_ok());
    }

    #[test]
    fn test_authentication_checked_before_role() {
        let (gate, _) = setup();
        let result = gate.authenticate_with_role(None, Role::Admin);
        assert!(matches!(result, Err(AppError::MissingToken)));
    }
}
