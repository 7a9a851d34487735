//! In-memory implementations of the persistence traits.
//!
//! Used by the integration test suite and suitable for ephemeral deployments.
//! State lives in `RwLock`-protected maps; the click increment happens under
//! the write lock, so concurrent clicks on one id are all counted.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::email_job::EmailJob;
use crate::domain::entities::{NewTrackedLink, TrackedLink};
use crate::domain::repositories::{EmailRepository, LinkRepository};
use crate::error::AppError;

fn poisoned() -> AppError {
    AppError::internal("Store lock poisoned", json!({}))
}

/// In-memory tracking store.
#[derive(Clone, Default)]
pub struct MemoryLinkRepository {
    links: Arc<RwLock<HashMap<String, TrackedLink>>>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links. Test helper.
    pub fn len(&self) -> usize {
        self.links.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewTrackedLink) -> Result<TrackedLink, AppError> {
        let mut links = self.links.write().map_err(|_| poisoned())?;

        if links.contains_key(&new_link.id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "id": new_link.id }),
            ));
        }

        let link = TrackedLink::new(new_link.id.clone(), new_link.url, 0, Utc::now());
        links.insert(new_link.id, link.clone());

        Ok(link)
    }

    async fn find(&self, id: &str) -> Result<Option<TrackedLink>, AppError> {
        let links = self.links.read().map_err(|_| poisoned())?;
        Ok(links.get(id).cloned())
    }

    async fn record_click(&self, id: &str) -> Result<Option<TrackedLink>, AppError> {
        let mut links = self.links.write().map_err(|_| poisoned())?;

        match links.get_mut(id) {
            Some(link) => {
                link.clicks += 1;
                Ok(Some(link.clone()))
            }
            None => Ok(None),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// In-memory send journal.
#[derive(Clone, Default)]
pub struct MemoryEmailRepository {
    jobs: Arc<RwLock<HashMap<String, EmailJob>>>,
}

impl MemoryEmailRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the journaled job for an id. Test helper.
    pub fn get(&self, id: &str) -> Option<EmailJob> {
        self.jobs.read().ok().and_then(|m| m.get(id).cloned())
    }

    /// Number of journaled jobs. Test helper.
    pub fn len(&self) -> usize {
        self.jobs.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EmailRepository for MemoryEmailRepository {
    async fn record(&self, job: &EmailJob) -> Result<(), AppError> {
        let mut jobs = self.jobs.write().map_err(|_| poisoned())?;
        jobs.insert(job.id.clone(), job.clone());
        Ok(())
    }
}
