//! Utility functions shared across the application.
//!
//! - [`link_id`] - Tracking id generation and validation

pub mod link_id;
