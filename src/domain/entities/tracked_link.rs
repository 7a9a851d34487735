//! Tracked link entity mapping an opaque tracking id to its original URL.

use chrono::{DateTime, Utc};

use crate::utils::link_id::generate_link_id;

/// A tracked hyperlink extracted from an outgoing email body.
///
/// One record exists per distinct URL encountered during a rewrite pass.
/// The click counter is mutated only by the redirect path and is never reset;
/// records are kept indefinitely as an audit trail of link activity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrackedLink {
    pub id: String,
    pub url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl TrackedLink {
    /// Creates a new TrackedLink instance.
    pub fn new(id: String, url: String, clicks: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            url,
            clicks,
            created_at,
        }
    }

    /// Returns the public redirect URL for this link under the given base.
    pub fn tracking_url(&self, public_base: &str) -> String {
        format!("{}/r/{}", public_base.trim_end_matches('/'), self.id)
    }
}

/// Input data for creating a new tracked link.
#[derive(Debug, Clone)]
pub struct NewTrackedLink {
    pub id: String,
    pub url: String,
}

impl NewTrackedLink {
    /// Mints a fresh random tracking id for the given URL.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            id: generate_link_id(),
            url: url.into(),
        }
    }
}
