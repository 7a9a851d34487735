//! Repository trait for the send journal.

use crate::domain::email_job::EmailJob;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the send journal (`email_log`).
///
/// The journal records the last accepted payload per job id and makes replays
/// of the same job observable as overwrites instead of duplicates. It is an
/// audit supplement: dispatch treats journal failures as non-fatal.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEmailRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryEmailRepository`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailRepository: Send + Sync {
    /// Upserts the job into the journal, keyed by job id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, job: &EmailJob) -> Result<(), AppError>;
}
