//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic, following the
//! "New Type" pattern with separate structs for creation:
//!
//! - [`TrackedLink`] / [`NewTrackedLink`] - A tracked hyperlink and its click counter

pub mod tracked_link;

pub use tracked_link::{NewTrackedLink, TrackedLink};
