//! Redis pub/sub status publisher.

use super::service::{PublishError, PublishResult, StatusPublisher};
use crate::domain::StatusEvent;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

/// Publishes completion events on a Redis pub/sub channel.
///
/// Pub/sub is fire-and-forget: events delivered while no subscriber is
/// listening are dropped by Redis, which is the intended semantics for a
/// status feed.
pub struct RedisStatusPublisher {
    client: ConnectionManager,
    channel: String,
}

impl RedisStatusPublisher {
    pub fn new(client: ConnectionManager, channel: impl Into<String>) -> Self {
        Self {
            client,
            channel: channel.into(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

#[async_trait]
impl StatusPublisher for RedisStatusPublisher {
    async fn publish(&self, event: &StatusEvent) -> PublishResult<()> {
        let payload =
            serde_json::to_string(event).map_err(|e| PublishError::Serialize(e.to_string()))?;

        let mut conn = self.client.clone();
        let receivers = conn
            .publish::<_, _, i64>(&self.channel, &payload)
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        debug!(
            channel = %self.channel,
            job_id = %event.job_id,
            receivers,
            "published status event"
        );

        Ok(())
    }
}
