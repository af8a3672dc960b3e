//! Business logic services for the application layer.

pub mod auth_service;
pub mod code_allocator;
pub mod credential_service;
pub mod link_service;
pub mod token_service;

pub use auth_service::AuthService;
pub use code_allocator::CodeAllocator;
pub use credential_service::CredentialService;
pub use link_service::LinkService;
pub use token_service::TokenService;
