//! PostgreSQL implementation of the send journal.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::email_job::EmailJob;
use crate::domain::repositories::EmailRepository;
use crate::error::AppError;

/// PostgreSQL repository for the `email_log` journal.
///
/// Rows are keyed by job id; replays of the same job overwrite the previous
/// row (`ON CONFLICT … DO UPDATE`) so at-least-once processing never
/// duplicates journal entries.
pub struct PgEmailRepository {
    pool: Arc<PgPool>,
}

impl PgEmailRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailRepository for PgEmailRepository {
    async fn record(&self, job: &EmailJob) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO email_log (id, recipients, subject, text_body, html_body)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                recipients = EXCLUDED.recipients,
                subject    = EXCLUDED.subject,
                text_body  = EXCLUDED.text_body,
                html_body  = EXCLUDED.html_body,
                updated_at = now()
            "#,
        )
        .bind(&job.id)
        .bind(&job.to)
        .bind(&job.subject)
        .bind(&job.text)
        .bind(&job.html)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
