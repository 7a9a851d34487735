//! Redis-backed job queue implementation.

use super::service::{JobQueue, QueueError, QueueResult};
use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use tracing::debug;

/// Redis list acting as the work queue.
///
/// Producers `LPUSH`, the consumer `BRPOP`s with a zero timeout, giving FIFO
/// order and indefinite blocking. The connection manager is dedicated to this
/// queue: a blocking pop stalls every command multiplexed on the same
/// connection, so it must never be shared with the status publisher.
pub struct RedisJobQueue {
    client: ConnectionManager,
    queue_name: String,
}

impl RedisJobQueue {
    /// Wraps an established connection manager and queue name.
    ///
    /// The manager is constructed (and PINGed) once at startup by the server
    /// wiring, which owns the Redis client lifecycle.
    pub fn new(client: ConnectionManager, queue_name: impl Into<String>) -> Self {
        Self {
            client,
            queue_name: queue_name.into(),
        }
    }

    /// Name of the underlying Redis list.
    pub fn name(&self) -> &str {
        &self.queue_name
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn pop(&self) -> QueueResult<String> {
        let mut conn = self.client.clone();

        let popped = conn
            .brpop::<_, Option<(String, String)>>(&self.queue_name, 0.0)
            .await
            .map_err(|e| QueueError::Transport(e.to_string()))?;

        match popped {
            Some((_, payload)) => {
                debug!("Popped {} bytes from '{}'", payload.len(), self.queue_name);
                Ok(payload)
            }
            // BRPOP with a zero timeout only returns nil on protocol hiccups;
            // surface it as a transport error so the consumer backs off.
            None => Err(QueueError::Transport(
                "blocking pop returned no element".to_string(),
            )),
        }
    }

    async fn push(&self, payload: &str) -> QueueResult<()> {
        let mut conn = self.client.clone();

        conn.lpush::<_, _, i64>(&self.queue_name, payload)
            .await
            .map_err(|e| QueueError::Transport(e.to_string()))?;

        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
