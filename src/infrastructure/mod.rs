//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence, queueing, status publication,
//! and outbound mail delivery.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory repository implementations
//! - [`queue`] - Blocking-pop job queue (Redis and in-memory)
//! - [`status`] - Status event publication (Redis pub/sub)
//! - [`transport`] - Outbound mail delivery (SendGrid)

pub mod persistence;
pub mod queue;
pub mod status;
pub mod transport;
