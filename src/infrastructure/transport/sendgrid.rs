//! SendGrid v3 mail transport.

use super::service::{DeliveryReceipt, MailTransport, OutboundMessage, TransportError,
    TransportResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

/// Delivers messages through the SendGrid v3 send endpoint.
pub struct SendGridTransport {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl SendGridTransport {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    fn send_url(&self) -> String {
        format!("{}/v3/mail/send", self.api_base.trim_end_matches('/'))
    }

    /// Builds the provider payload for one message.
    ///
    /// The `content` array lists `text/plain` before `text/html`; SendGrid
    /// rejects the reverse ordering.
    fn build_payload(message: &OutboundMessage) -> Value {
        let recipients: Vec<Value> = message
            .to
            .iter()
            .map(|addr| json!({ "email": addr }))
            .collect();

        let mut content = Vec::new();
        if let Some(text) = &message.text {
            content.push(json!({ "type": "text/plain", "value": text }));
        }
        if let Some(html) = &message.html {
            content.push(json!({ "type": "text/html", "value": html }));
        }

        let mut payload = json!({
            "personalizations": [{ "to": recipients }],
            "from": { "email": message.from },
            "subject": message.subject,
            "content": content,
        });

        if !message.attachments.is_empty() {
            let attachments: Vec<Value> = message
                .attachments
                .iter()
                .map(|a| {
                    let mut attachment = json!({
                        "filename": a.filename,
                        "content": a.content,
                    });
                    if let Some(content_type) = &a.content_type {
                        attachment["type"] = json!(content_type);
                    }
                    attachment
                })
                .collect();
            payload["attachments"] = Value::Array(attachments);
        }

        payload
    }
}

#[async_trait]
impl MailTransport for SendGridTransport {
    async fn deliver(&self, message: &OutboundMessage) -> TransportResult<DeliveryReceipt> {
        let payload = Self::build_payload(message);

        let response = self
            .http
            .post(self.send_url())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let message_id = response
            .headers()
            .get("X-Message-Id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        debug!(
            status = status.as_u16(),
            message_id = message_id.as_deref().unwrap_or("-"),
            "mail provider accepted message"
        );

        Ok(DeliveryReceipt {
            status: status.as_u16(),
            message_id,
        })
    }
}
