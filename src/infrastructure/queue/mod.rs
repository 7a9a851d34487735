//! Job queue port and its implementations.
//!
//! [`JobQueue`] abstracts the blocking-pop queue the consumer drains.
//! [`RedisJobQueue`] is the production implementation (BRPOP/LPUSH);
//! [`MemoryJobQueue`] backs the integration tests.

pub mod memory_queue;
pub mod redis_queue;
pub mod service;

pub use memory_queue::MemoryJobQueue;
pub use redis_queue::RedisJobQueue;
pub use service::{JobQueue, QueueError, QueueResult};

#[cfg(test)]
pub use service::MockJobQueue;
