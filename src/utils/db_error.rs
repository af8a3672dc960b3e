//! Helpers for recognizing unique constraint violations.

/// Unique constraint on `users.username`.
pub const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Unique constraint on `links.converted_link`.
pub const SHORT_CODE_CONSTRAINT: &str = "links_converted_link_key";

/// Returns true if `e` is a unique violation of the named constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}
