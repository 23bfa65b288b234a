//! Order announcement adapters

use async_trait::async_trait;
use tracing::{Instrument, Span, info};

use crate::orders::error::PublishError;
use crate::orders::ports::MessagingSystem;
use crate::orders::types::OrderCreatedEvent;

/// Delivers each event as a JSON `POST` to a receiving endpoint.
///
/// A transport failure or any non-2xx answer fails the publish. Single
/// attempt.
pub struct WebhookMessaging {
    client: reqwest::Client,
    url: String,
    span: Span,
}

impl WebhookMessaging {
    pub fn new(client: reqwest::Client, url: impl Into<String>, span: Span) -> Self {
        Self {
            client,
            url: url.into(),
            span,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MessagingSystem for WebhookMessaging {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn publish_order_created(&self, event: &OrderCreatedEvent) -> Result<(), PublishError> {
        let response = self
            .client
            .post(self.url.as_str())
            .json(event)
            .send()
            .instrument(self.span.clone())
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Rejected(status.as_u16()));
        }

        self.span
            .in_scope(|| info!(id = event.id, url = %self.url, "Published order created"));
        Ok(())
    }
}

/// Emits each event as a structured log record on the `order_events` target
pub struct LogMessaging {
    span: Span,
}

impl LogMessaging {
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}

#[async_trait]
impl MessagingSystem for LogMessaging {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn publish_order_created(&self, event: &OrderCreatedEvent) -> Result<(), PublishError> {
        let payload = serde_json::to_string(event)?;
        self.span
            .in_scope(|| info!(target: "order_events", payload = %payload, "order_created"));
        Ok(())
    }
}
