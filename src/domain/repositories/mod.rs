//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the relational store following the Repository pattern
//! and are implemented in `crate::infrastructure::persistence`.
//!
//! # Available Repositories
//!
//! - [`AccountRepository`] - Account lookup and registration
//! - [`LinkRepository`] - Link mapping CRUD and the admin listing join
//!
//! Mock implementations are generated with `mockall` for unit tests.

pub mod account_repository;
pub mod link_repository;

pub use account_repository::AccountRepository;
pub use link_repository::{LinkRepository, LinkWithOwner};

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
