//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::credential_service::CredentialService`] - Registration and password checks
//! - [`services::token_service::TokenService`] - Session token signing and verification
//! - [`services::auth_service::AuthService`] - Authorization gate for protected routes
//! - [`services::code_allocator::CodeAllocator`] - Unique short code allocation
//! - [`services::link_service::LinkService`] - Link mapping registry

pub mod services;
