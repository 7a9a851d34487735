//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain model following Clean Architecture
//! principles: entities, repository interfaces, and the wire types exchanged
//! with the queue and the status channel, independent of infrastructure.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`email_job`] - Queue payload model and validation rules
//! - [`status_event`] - Terminal per-job status notification
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Orchestration lives in services (see [`crate::application::services`])

pub mod email_job;
pub mod entities;
pub mod repositories;
pub mod status_event;

pub use email_job::{Attachment, EmailJob};
pub use status_event::{JobOutcome, StatusEvent};
