//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Account`] - A registered user with a [`Role`]
//! - [`Link`] - A mapping from an original link to a short code, owned by an account
//! - [`Claims`] - The verified payload of a session token
//!
//! Creation inputs live in separate structs (`NewAccount`, `NewLink`) and
//! admin edits in [`LinkUpdate`].

pub mod account;
pub mod claims;
pub mod link;

pub use account::{Account, NewAccount, Role};
pub use claims::Claims;
pub use link::{Link, LinkUpdate, NO_EXPIRY, NewLink, OwnerLinks};
