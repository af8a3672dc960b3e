//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters and `FromRow` row mapping.
//!
//! # Repositories
//!
//! - [`PgAccountRepository`] - Account storage
//! - [`PgLinkRepository`] - Link mapping storage and the admin join query

pub mod pg_account_repository;
pub mod pg_link_repository;

pub use pg_account_repository::PgAccountRepository;
pub use pg_link_repository::PgLinkRepository;
