#![allow(dead_code)]

use std::sync::Arc;

use mail_relay::domain::entities::NewTrackedLink;
use mail_relay::domain::repositories::LinkRepository;
use mail_relay::infrastructure::persistence::MemoryLinkRepository;
use mail_relay::infrastructure::queue::MemoryJobQueue;
use mail_relay::state::AppState;

/// Builds an [`AppState`] over in-memory implementations, returning the
/// concrete handles so tests can seed links and drive the queue directly.
pub fn memory_state() -> (AppState, Arc<MemoryLinkRepository>, Arc<MemoryJobQueue>) {
    let links = Arc::new(MemoryLinkRepository::new());
    let queue = Arc::new(MemoryJobQueue::new());
    let state = AppState::new(links.clone(), queue.clone());

    (state, links, queue)
}

pub async fn seed_link(links: &MemoryLinkRepository, id: &str, url: &str) {
    links
        .create(NewTrackedLink {
            id: id.to_string(),
            url: url.to_string(),
        })
        .await
        .unwrap();
}

/// Minimal well-formed job payload with the given id and text body.
pub fn job_json(id: &str, text: &str) -> String {
    serde_json::json!({
        "id": id,
        "to": "user@example.com",
        "subject": "Test message",
        "text": text,
    })
    .to_string()
}
