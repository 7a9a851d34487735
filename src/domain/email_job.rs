//! Email job payload popped from the work queue.

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
use validator::{Validate, ValidationError};

/// One unit of work: a single email to validate, rewrite, and deliver.
///
/// Deserialized from the opaque JSON payload carried by the queue. The `to`
/// field accepts either a bare address string or an array of addresses.
///
/// Validation enforces the full invariant set at once: every violated field is
/// reported, not just the first (`skip_on_field_errors = false` keeps the
/// struct-level body check active alongside field errors).
#[serde_as]
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_body_present", skip_on_field_errors = false))]
pub struct EmailJob {
    /// Producer-assigned identifier, unique per send attempt. Used for
    /// idempotence and status correlation.
    #[validate(length(min = 1, message = "Job id must not be empty"))]
    pub id: String,

    /// Recipient address(es).
    #[serde_as(as = "OneOrMany<_>")]
    #[validate(length(min = 1, message = "At least one recipient is required"))]
    #[validate(custom(function = "validate_recipients"))]
    pub to: Vec<String>,

    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: String,

    /// Plain-text body variant.
    #[validate(length(min = 1, message = "Text body must not be empty"))]
    pub text: Option<String>,

    /// HTML body variant.
    #[validate(length(min = 1, message = "HTML body must not be empty"))]
    pub html: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub attachments: Vec<Attachment>,
}

impl EmailJob {
    /// Returns true when the job carries a non-empty plain-text body.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Returns true when the job carries a non-empty HTML body.
    pub fn has_html(&self) -> bool {
        self.html.as_deref().is_some_and(|h| !h.is_empty())
    }
}

/// File attached to an outgoing email.
///
/// `content` is the base64-encoded payload handed through to the transport
/// unchanged; this core never decodes it.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize, Validate)]
pub struct Attachment {
    #[validate(length(min = 1, message = "Attachment filename must not be empty"))]
    pub filename: String,

    #[validate(length(min = 1, message = "Attachment content must not be empty"))]
    pub content: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

fn validate_recipients(recipients: &[String]) -> Result<(), ValidationError> {
    use validator::ValidateEmail;

    let invalid: Vec<&str> = recipients
        .iter()
        .filter(|addr| !addr.validate_email())
        .map(String::as_str)
        .collect();

    if invalid.is_empty() {
        return Ok(());
    }

    let mut err = ValidationError::new("invalid_recipient");
    err.message = Some("Every recipient must be a valid email address".into());
    err.add_param("invalid".into(), &invalid);
    Err(err)
}

fn validate_body_present(job: &EmailJob) -> Result<(), ValidationError> {
    if job.has_text() || job.has_html() {
        return Ok(());
    }

    let mut err = ValidationError::new("missing_body");
    err.message = Some("At least one of text or html must be a non-empty string".into());
    Err(err)
}
