//! Repository implementations for the persistence layer.
//!
//! Concrete implementations of the domain repository traits: PostgreSQL via
//! SQLx for production, and in-memory variants for tests and ephemeral use.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] / [`MemoryLinkRepository`] - Tracking store
//! - [`PgEmailRepository`] / [`MemoryEmailRepository`] - Send journal

pub mod memory;
pub mod pg_email_repository;
pub mod pg_link_repository;

pub use memory::{MemoryEmailRepository, MemoryLinkRepository};
pub use pg_email_repository::PgEmailRepository;
pub use pg_link_repository::PgLinkRepository;
