//! Backoff policy applied to queue transport errors.

use std::time::Duration;
use tokio_retry::strategy::{FixedInterval, jitter};

/// Configured delay series for consecutive queue transport errors.
///
/// Applies only to transport-class errors; validation failures are never
/// retried. The series resets on the next successful pop.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    pub interval: Duration,
    pub jitter: bool,
}

impl BackoffPolicy {
    pub fn new(interval: Duration, jitter: bool) -> Self {
        Self { interval, jitter }
    }

    /// Starts a fresh delay series.
    ///
    /// The consumer draws one delay per consecutive transport error and drops
    /// the iterator once a pop succeeds.
    pub fn delays(&self) -> Box<dyn Iterator<Item = Duration> + Send> {
        let series = FixedInterval::new(self.interval);
        if self.jitter {
            Box::new(series.map(jitter))
        } else {
            Box::new(series)
        }
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            jitter: true,
        }
    }
}
