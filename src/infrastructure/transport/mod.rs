//! Outbound mail delivery.
//!
//! [`MailTransport`] abstracts the provider send call; [`SendGridTransport`]
//! implements it against the SendGrid v3 API.

pub mod sendgrid;
pub mod service;

pub use sendgrid::SendGridTransport;
pub use service::{DeliveryReceipt, MailTransport, OutboundMessage, TransportError,
    TransportResult};

#[cfg(test)]
pub use service::MockMailTransport;
