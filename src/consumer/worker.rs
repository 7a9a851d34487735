//! Long-lived queue consumer loop.

use std::sync::Arc;

use crate::application::services::Dispatcher;
use crate::consumer::backoff::BackoffPolicy;
use crate::domain::EmailJob;
use crate::infrastructure::queue::{JobQueue, QueueError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Pulls jobs one at a time from the queue and hands them to the dispatcher.
///
/// Exactly one job is processed per iteration before the next pop; scaling is
/// more worker instances, not in-process concurrency. The loop survives every
/// error class: malformed payloads are dropped, transport errors are retried
/// after a backoff delay, and only queue closure or the shutdown signal ends
/// the loop. A job already handed to the dispatcher always completes before
/// exit.
pub struct QueueConsumer<Q, D>
where
    Q: JobQueue,
    D: Dispatcher,
{
    queue: Arc<Q>,
    dispatcher: Arc<D>,
    backoff: BackoffPolicy,
}

impl<Q, D> QueueConsumer<Q, D>
where
    Q: JobQueue,
    D: Dispatcher,
{
    pub fn new(queue: Arc<Q>, dispatcher: Arc<D>, backoff: BackoffPolicy) -> Self {
        Self {
            queue,
            dispatcher,
            backoff,
        }
    }

    /// Runs until the queue closes or `shutdown` signals.
    ///
    /// The blocking pop and the backoff sleep are both abandoned when the
    /// shutdown signal arrives (a dropped sender counts as a signal).
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("queue consumer starting");

        let mut delays = self.backoff.delays();

        loop {
            let popped = tokio::select! {
                _ = shutdown.changed() => {
                    info!("shutdown signal received, consumer exiting");
                    break;
                }
                popped = self.queue.pop() => popped,
            };

            match popped {
                Ok(payload) => {
                    delays = self.backoff.delays();
                    self.handle_payload(&payload).await;
                }
                Err(QueueError::Closed) => {
                    info!("job queue closed, consumer exiting");
                    break;
                }
                Err(error) => {
                    let delay = delays.next().unwrap_or(self.backoff.interval);
                    warn!(
                        %error,
                        delay_ms = delay.as_millis() as u64,
                        "queue pop failed, backing off"
                    );
                    tokio::select! {
                        _ = shutdown.changed() => {
                            info!("shutdown signal received during backoff, consumer exiting");
                            break;
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }

        info!("queue consumer stopped");
    }

    /// Deserializes one payload and dispatches it.
    ///
    /// Malformed payloads are logged and dropped without a status event;
    /// the queue advances either way.
    async fn handle_payload(&self, payload: &str) {
        let job: EmailJob = match serde_json::from_str(payload) {
            Ok(job) => job,
            Err(error) => {
                warn!(%error, "discarding malformed job payload");
                metrics::counter!("relay_jobs_discarded_total").increment(1);
                return;
            }
        };

        let job_id = job.id.clone();
        debug!(job_id = %job_id, "job accepted for dispatch");

        let outcome = self.dispatcher.dispatch(job).await;
        info!(job_id = %job_id, outcome = outcome.as_str(), "job dispatched");
    }
}
