//! Terminal status event emitted once per dispatched job.

use serde::{Deserialize, Serialize};

/// Final outcome of one dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobOutcome {
    Success,
    Failure,
}

impl JobOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, JobOutcome::Success)
    }

    /// Lowercase label used in logs and metric tags.
    pub fn as_str(self) -> &'static str {
        match self {
            JobOutcome::Success => "success",
            JobOutcome::Failure => "failure",
        }
    }
}

/// Success/failure notification published to the status channel.
///
/// Emitted exactly once per dispatched job, keyed by the job id. Delivery to
/// observers is best-effort; subscribers that are offline miss the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    pub job_id: String,
    pub outcome: JobOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusEvent {
    /// Builds a success event for the given job.
    pub fn success(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            outcome: JobOutcome::Success,
            error: None,
        }
    }

    /// Builds a failure event carrying the error detail.
    pub fn failure(job_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            outcome: JobOutcome::Failure,
            error: Some(error.into()),
        }
    }
}
