//! Status event publication.
//!
//! [`StatusPublisher`] abstracts the completion-event broadcast;
//! [`RedisStatusPublisher`] delivers events over Redis pub/sub.

pub mod redis_status;
pub mod service;

pub use redis_status::RedisStatusPublisher;
pub use service::{PublishError, PublishResult, StatusPublisher};

#[cfg(test)]
pub use service::MockStatusPublisher;
