//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository and
//! infrastructure traits and provide a clean API for the queue consumer and
//! HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::dispatch_service::DispatchService`] - One-job orchestration
//!   from validation through delivery and status reporting
//! - [`services::link_rewriter::LinkRewriter`] - URL-to-tracking-link
//!   substitution in message bodies

pub mod services;
