//! Queue consumption: the long-lived worker loop and its backoff policy.
//!
//! The consumer owns the pop-dispatch cycle described in the crate overview:
//! one blocking pop, one dispatched job, repeat. Transport errors back off per
//! [`BackoffPolicy`]; shutdown arrives over a `watch` channel.

pub mod backoff;
pub mod worker;

pub use backoff::BackoffPolicy;
pub use worker::QueueConsumer;
