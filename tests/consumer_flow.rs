//! End-to-end pipeline tests: queue in, status event out.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mail_relay::application::services::{DispatchService, LinkRewriter};
use mail_relay::consumer::{BackoffPolicy, QueueConsumer};
use mail_relay::domain::status_event::StatusEvent;
use mail_relay::infrastructure::persistence::{MemoryEmailRepository, MemoryLinkRepository};
use mail_relay::infrastructure::queue::{JobQueue, MemoryJobQueue};
use mail_relay::infrastructure::status::{PublishResult, StatusPublisher};
use mail_relay::infrastructure::transport::{
    DeliveryReceipt, MailTransport, OutboundMessage, TransportError, TransportResult,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Default)]
struct RecordingPublisher {
    events: Mutex<Vec<StatusEvent>>,
}

impl RecordingPublisher {
    fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusPublisher for RecordingPublisher {
    async fn publish(&self, event: &StatusEvent) -> PublishResult<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

#[derive(Default)]
struct CapturingTransport {
    messages: Mutex<Vec<OutboundMessage>>,
    rejecting: AtomicBool,
}

impl CapturingTransport {
    fn messages(&self) -> Vec<OutboundMessage> {
        self.messages.lock().unwrap().clone()
    }

    fn set_rejecting(&self) {
        self.rejecting.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MailTransport for CapturingTransport {
    async fn deliver(&self, message: &OutboundMessage) -> TransportResult<DeliveryReceipt> {
        self.messages.lock().unwrap().push(message.clone());

        if self.rejecting.load(Ordering::SeqCst) {
            return Err(TransportError::Rejected {
                status: 500,
                body: "upstream broke".to_string(),
            });
        }

        Ok(DeliveryReceipt {
            status: 202,
            message_id: Some("msg-1".to_string()),
        })
    }
}

struct Pipeline {
    queue: Arc<MemoryJobQueue>,
    links: Arc<MemoryLinkRepository>,
    journal: Arc<MemoryEmailRepository>,
    transport: Arc<CapturingTransport>,
    status: Arc<RecordingPublisher>,
}

/// Wires the full pipeline over in-memory collaborators and starts the
/// consumer. The returned sender stops the consumer when signalled.
fn spawn_pipeline() -> (Pipeline, JoinHandle<()>, watch::Sender<bool>) {
    let queue = Arc::new(MemoryJobQueue::new());
    let links = Arc::new(MemoryLinkRepository::new());
    let journal = Arc::new(MemoryEmailRepository::new());
    let transport = Arc::new(CapturingTransport::default());
    let status = Arc::new(RecordingPublisher::default());

    let rewriter = LinkRewriter::new(links.clone(), "https://track.example.com");
    let dispatcher = Arc::new(DispatchService::new(
        rewriter,
        journal.clone(),
        transport.clone(),
        status.clone(),
        "relay@example.com",
        Duration::from_millis(500),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let consumer = QueueConsumer::new(
        queue.clone(),
        dispatcher,
        BackoffPolicy::new(Duration::from_millis(5), false),
    );
    let handle = tokio::spawn(consumer.run(shutdown_rx));

    let pipeline = Pipeline {
        queue,
        links,
        journal,
        transport,
        status,
    };

    (pipeline, handle, shutdown_tx)
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);

    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within 2s"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn test_valid_job_produces_one_success_event() {
    let (p, handle, _shutdown_tx) = spawn_pipeline();

    p.queue
        .push(&common::job_json("job-1", "Visit https://example.com/docs today"))
        .await
        .unwrap();

    wait_until(|| p.status.events().len() == 1).await;

    // Give the consumer a beat to misbehave; the count must not move.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let events = p.status.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0], StatusEvent::success("job-1"));

    // The job was journaled and one tracked link was minted.
    assert!(p.journal.get("job-1").is_some());
    assert_eq!(p.links.len(), 1);

    // The delivered body carries the tracking link, not the original URL.
    let messages = p.transport.messages();
    assert_eq!(messages.len(), 1);
    let text = messages[0].text.as_deref().unwrap();
    assert!(!text.contains("example.com/docs"));
    assert!(text.contains("https://track.example.com/r/"));
    assert_eq!(messages[0].from, "relay@example.com");
    assert_eq!(messages[0].to, vec!["user@example.com"]);

    p.queue.close();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_malformed_payload_dropped_without_event() {
    let (p, handle, _shutdown_tx) = spawn_pipeline();

    p.queue.push("{ this is not json").await.unwrap();
    p.queue
        .push(&common::job_json("job-2", "plain body"))
        .await
        .unwrap();

    // Only the well-formed job produces an event; the malformed payload is
    // dropped and the consumer keeps going.
    wait_until(|| p.status.events().len() == 1).await;

    let events = p.status.events();
    assert_eq!(events[0], StatusEvent::success("job-2"));
    assert_eq!(p.transport.messages().len(), 1);

    p.queue.close();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_invalid_job_publishes_failure_event() {
    let (p, handle, _shutdown_tx) = spawn_pipeline();

    // Well-formed JSON, but no text or html body.
    let payload = serde_json::json!({
        "id": "bad-1",
        "to": "user@example.com",
        "subject": "No body",
    })
    .to_string();
    p.queue.push(&payload).await.unwrap();

    wait_until(|| p.status.events().len() == 1).await;

    let events = p.status.events();
    assert_eq!(events[0].job_id, "bad-1");
    assert!(!events[0].outcome.is_success());
    assert!(events[0].error.as_deref().unwrap().contains("text or html"));

    // Rejected before journaling or delivery.
    assert!(p.journal.is_empty());
    assert!(p.transport.messages().is_empty());

    p.queue.close();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_rejected_delivery_publishes_failure_event() {
    let (p, handle, _shutdown_tx) = spawn_pipeline();
    p.transport.set_rejecting();

    p.queue
        .push(&common::job_json("job-3", "plain body"))
        .await
        .unwrap();

    wait_until(|| p.status.events().len() == 1).await;

    let events = p.status.events();
    assert_eq!(events[0].job_id, "job-3");
    assert!(!events[0].outcome.is_success());
    assert!(events[0].error.as_deref().unwrap().contains("(500)"));

    // The journal row is written before the delivery attempt.
    assert!(p.journal.get("job-3").is_some());

    p.queue.close();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_queue_close_ends_consumer() {
    let (p, handle, _shutdown_tx) = spawn_pipeline();

    p.queue.close();

    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("consumer did not stop after queue close")
        .unwrap();
}

#[tokio::test]
async fn test_shutdown_signal_ends_consumer() {
    let (p, handle, shutdown_tx) = spawn_pipeline();

    // The consumer is parked in a blocking pop; the signal must still reach it.
    shutdown_tx.send(true).unwrap();

    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("consumer did not stop after shutdown signal")
        .unwrap();

    // Jobs pushed after shutdown stay queued for the next run.
    p.queue
        .push(&common::job_json("job-4", "left for later"))
        .await
        .unwrap();
    assert_eq!(p.queue.len(), 1);
}
