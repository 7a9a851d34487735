//! PostgreSQL implementation of the tracking store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewTrackedLink, TrackedLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for tracked links.
///
/// Uses prepared statements throughout. The click increment is a single
/// `UPDATE … RETURNING` statement, so concurrent clicks on one id serialize
/// inside the database and are all counted.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewTrackedLink) -> Result<TrackedLink, AppError> {
        let link = sqlx::query_as::<_, TrackedLink>(
            r#"
            INSERT INTO tracked_links (id, url)
            VALUES ($1, $2)
            RETURNING id, url, clicks, created_at
            "#,
        )
        .bind(&new_link.id)
        .bind(&new_link.url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find(&self, id: &str) -> Result<Option<TrackedLink>, AppError> {
        let link = sqlx::query_as::<_, TrackedLink>(
            r#"
            SELECT id, url, clicks, created_at
            FROM tracked_links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn record_click(&self, id: &str) -> Result<Option<TrackedLink>, AppError> {
        let link = sqlx::query_as::<_, TrackedLink>(
            r#"
            UPDATE tracked_links
            SET clicks = clicks + 1
            WHERE id = $1
            RETURNING id, url, clicks, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
