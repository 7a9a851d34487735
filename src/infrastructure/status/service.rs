//! Status publication port.

use crate::domain::StatusEvent;
use async_trait::async_trait;

/// Errors surfaced by status publishers.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The broker rejected the publish or the connection dropped.
    #[error("status transport error: {0}")]
    Transport(String),
    /// The event could not be serialized.
    #[error("status serialize error: {0}")]
    Serialize(String),
}

pub type PublishResult<T> = Result<T, PublishError>;

/// Broadcast channel for per-job completion events.
///
/// Exactly one event is published per consumed job; publish failures are
/// logged by the caller and never change the job's recorded outcome.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusPublisher: Send + Sync {
    /// Publishes a completion event to the status channel.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] if serialization or the broker publish fails.
    async fn publish(&self, event: &StatusEvent) -> PublishResult<()>;
}
