//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;

pub use health::health_handler;
pub use redirect::{missing_id_handler, redirect_handler};
