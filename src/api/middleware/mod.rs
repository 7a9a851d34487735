//! HTTP middleware for request processing.
//!
//! Provides observability middleware for the HTTP surface.

pub mod tracing;
