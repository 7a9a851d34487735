//! Outbound mail transport port.

use crate::domain::Attachment;
use async_trait::async_trait;

/// Provider-facing message assembled by the dispatch service.
///
/// Bodies are the rewritten variants; the sender address comes from service
/// configuration, never from the job payload.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub to: Vec<String>,
    pub from: String,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
    pub attachments: Vec<Attachment>,
}

/// Provider acknowledgement for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// HTTP status the provider answered with.
    pub status: u16,
    /// Provider-side message id, when the provider returns one.
    pub message_id: Option<String>,
}

/// Errors surfaced by mail transports.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a provider response.
    #[error("mail transport request error: {0}")]
    Request(String),
    /// The provider answered with a non-success status.
    #[error("mail provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Delivery collaborator consumed by the dispatch service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Hands one message to the provider.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] when no provider response was
    /// obtained and [`TransportError::Rejected`] when the provider answered
    /// with a non-success status.
    async fn deliver(&self, message: &OutboundMessage) -> TransportResult<DeliveryReceipt>;
}
