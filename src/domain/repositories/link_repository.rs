//! Repository trait for tracked link data access.

use crate::domain::entities::{NewTrackedLink, TrackedLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the tracking store.
///
/// The link rewriter is the only creator of records; the redirect resolver is
/// the only mutator of the click counter. Both paths share this trait.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a freshly minted tracked link with `clicks = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the tracking id already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewTrackedLink) -> Result<TrackedLink, AppError>;

    /// Finds a tracked link by its id without touching the click counter.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(TrackedLink))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, id: &str) -> Result<Option<TrackedLink>, AppError>;

    /// Atomically increments the click counter and returns the updated link.
    ///
    /// Concurrent calls for the same id must all be counted; implementations
    /// serialize the increment (single `UPDATE … RETURNING` statement, or an
    /// equivalent lock).
    ///
    /// # Returns
    ///
    /// - `Ok(Some(TrackedLink))` with the incremented counter if found
    /// - `Ok(None)` if the id is unknown (nothing is mutated)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, id: &str) -> Result<Option<TrackedLink>, AppError>;

    /// Cheap connectivity probe for the health endpoint.
    async fn health_check(&self) -> bool;
}
