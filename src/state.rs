//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::infrastructure::queue::JobQueue;

/// Handler-facing dependencies, cloned per request.
///
/// Held as trait objects so handler tests can wire the in-memory
/// implementations without touching PostgreSQL or Redis.
#[derive(Clone)]
pub struct AppState {
    pub links: Arc<dyn LinkRepository>,
    pub queue: Arc<dyn JobQueue>,
}

impl AppState {
    pub fn new(links: Arc<dyn LinkRepository>, queue: Arc<dyn JobQueue>) -> Self {
        Self { links, queue }
    }
}
