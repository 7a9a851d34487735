//! Job dispatch orchestration: validate, rewrite, deliver, report.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::link_rewriter::LinkRewriter;
use crate::domain::repositories::{EmailRepository, LinkRepository};
use crate::domain::{EmailJob, JobOutcome, StatusEvent};
use crate::infrastructure::status::StatusPublisher;
use crate::infrastructure::transport::{MailTransport, OutboundMessage};
use async_trait::async_trait;
use tracing::{debug, info, warn};
use validator::Validate;

/// Processes one job end to end.
///
/// The queue consumer depends on this trait rather than the concrete service
/// so the consumer loop can be tested without wiring repositories and
/// transports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Runs one job to its terminal outcome. Infallible by contract: every
    /// failure mode is folded into [`JobOutcome::Failure`].
    async fn dispatch(&self, job: EmailJob) -> JobOutcome;
}

/// Orchestrates validation, link rewriting, delivery, and status reporting
/// for one email job.
///
/// Exactly one [`StatusEvent`] is published per invocation, success or
/// failure, never both, never zero. Delivery is bounded by the configured
/// timeout; a timeout is a delivery failure, not a crash. Terminal either
/// way: re-queueing belongs to the producer.
pub struct DispatchService<L, E, T, S>
where
    L: LinkRepository,
    E: EmailRepository,
    T: MailTransport,
    S: StatusPublisher,
{
    rewriter: LinkRewriter<L>,
    email_repository: Arc<E>,
    transport: Arc<T>,
    status: Arc<S>,
    from_email: String,
    delivery_timeout: Duration,
}

impl<L, E, T, S> DispatchService<L, E, T, S>
where
    L: LinkRepository,
    E: EmailRepository,
    T: MailTransport,
    S: StatusPublisher,
{
    pub fn new(
        rewriter: LinkRewriter<L>,
        email_repository: Arc<E>,
        transport: Arc<T>,
        status: Arc<S>,
        from_email: impl Into<String>,
        delivery_timeout: Duration,
    ) -> Self {
        Self {
            rewriter,
            email_repository,
            transport,
            status,
            from_email: from_email.into(),
            delivery_timeout,
        }
    }

    /// Rewrites one body variant, logging per-URL failures.
    ///
    /// Rewrite failures degrade gracefully: the affected URL stays in the
    /// body unrewritten and delivery proceeds.
    async fn rewrite_body(&self, job_id: &str, variant: &'static str, body: &str) -> String {
        let rewritten = self.rewriter.rewrite(body).await;

        for failure in &rewritten.failures {
            warn!(
                job_id,
                variant,
                url = %failure.url,
                error = %failure.error,
                "link left unrewritten"
            );
        }
        if rewritten.links_created > 0 {
            debug!(
                job_id,
                variant,
                links = rewritten.links_created,
                "tracked links minted"
            );
        }

        rewritten.body
    }

    /// Publishes the terminal event and returns the outcome.
    ///
    /// The single exit point of [`Dispatcher::dispatch`]; a publish failure
    /// is logged and never alters the outcome.
    async fn finish(&self, job_id: &str, outcome: JobOutcome, error: Option<String>) -> JobOutcome {
        let event = match error {
            Some(detail) => StatusEvent::failure(job_id, detail),
            None => StatusEvent::success(job_id),
        };

        if let Err(publish_error) = self.status.publish(&event).await {
            warn!(job_id, error = %publish_error, "failed to publish status event");
        }

        metrics::counter!("relay_jobs_total", "outcome" => outcome.as_str()).increment(1);

        outcome
    }
}

#[async_trait]
impl<L, E, T, S> Dispatcher for DispatchService<L, E, T, S>
where
    L: LinkRepository,
    E: EmailRepository,
    T: MailTransport,
    S: StatusPublisher,
{
    async fn dispatch(&self, job: EmailJob) -> JobOutcome {
        if let Err(errors) = job.validate() {
            warn!(job_id = %job.id, %errors, "job failed validation");
            let detail = serde_json::to_string(&errors).unwrap_or_else(|_| errors.to_string());
            return self
                .finish(&job.id, JobOutcome::Failure, Some(detail))
                .await;
        }

        if let Err(error) = self.email_repository.record(&job).await {
            warn!(job_id = %job.id, %error, "failed to journal job, proceeding with delivery");
        }

        let text = match &job.text {
            Some(body) => Some(self.rewrite_body(&job.id, "text", body).await),
            None => None,
        };
        let html = match &job.html {
            Some(body) => Some(self.rewrite_body(&job.id, "html", body).await),
            None => None,
        };

        let message = OutboundMessage {
            to: job.to.clone(),
            from: self.from_email.clone(),
            subject: job.subject.clone(),
            text,
            html,
            attachments: job.attachments.clone(),
        };

        match tokio::time::timeout(self.delivery_timeout, self.transport.deliver(&message)).await {
            Ok(Ok(receipt)) => {
                info!(
                    job_id = %job.id,
                    status = receipt.status,
                    message_id = receipt.message_id.as_deref().unwrap_or("-"),
                    "email delivered"
                );
                self.finish(&job.id, JobOutcome::Success, None).await
            }
            Ok(Err(error)) => {
                warn!(job_id = %job.id, %error, "delivery failed");
                self.finish(&job.id, JobOutcome::Failure, Some(error.to_string()))
                    .await
            }
            Err(_) => {
                warn!(
                    job_id = %job.id,
                    timeout_secs = self.delivery_timeout.as_secs(),
                    "delivery timed out"
                );
                let detail = format!(
                    "delivery timed out after {}s",
                    self.delivery_timeout.as_secs()
                );
                self.finish(&job.id, JobOutcome::Failure, Some(detail)).await
            }
        }
    }
}
