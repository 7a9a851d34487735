//! Job queue trait and error types.

use async_trait::async_trait;

/// Errors that can occur during queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// Connectivity or protocol failure; the consumer retries with backoff.
    #[error("Queue transport error: {0}")]
    Transport(String),
    /// The queue will never produce another payload.
    #[error("Queue is closed")]
    Closed,
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Trait for the durable work queue carrying email job payloads.
///
/// Payloads are opaque JSON strings; delivery is at-least-once and ordered
/// per queue. `pop` blocks with no time limit, so callers that need
/// cancellation race it against a shutdown signal and drop the future.
///
/// # Implementations
///
/// - [`crate::infrastructure::queue::RedisJobQueue`] - Redis list (`BRPOP`/`LPUSH`)
/// - [`crate::infrastructure::queue::MemoryJobQueue`] - In-process queue for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Blocks until a payload is available and removes it from the queue.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Transport`] on connectivity failures and
    /// [`QueueError::Closed`] once the queue can never produce again.
    async fn pop(&self) -> QueueResult<String>;

    /// Appends a payload to the queue (producer side: operator CLI, tests).
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Transport`] on connectivity failures.
    async fn push(&self, payload: &str) -> QueueResult<()>;

    /// Checks whether the queue backend is reachable.
    ///
    /// Used by health check endpoints to report queue status.
    async fn health_check(&self) -> bool;
}
