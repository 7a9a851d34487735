//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Tracking store (create / find / atomic click increment)
//! - [`EmailRepository`] - Send journal upserts

pub mod email_repository;
pub mod link_repository;

pub use email_repository::EmailRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use email_repository::MockEmailRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
