use super::NotificationError;
use crate::settings::WebhookSettings;
use axum::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

#[async_trait]
pub trait ChatWebhook {
    async fn post(&self, text: &str) -> Result<(), NotificationError>;
}

pub type SharedWebhook = Arc<dyn ChatWebhook + Send + Sync>;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// Incoming-webhook style chat endpoint: a JSON `{"text": ...}` POST,
/// acknowledged with exactly `200 OK`.
pub struct WebhookSink {
    client: Client,
    url: Url,
}

impl WebhookSink {
    pub fn new(settings: &WebhookSettings) -> Result<Self, NotificationError> {
        let url = Url::parse(&settings.url)
            .map_err(|e| NotificationError::InvalidUrl(e.to_string()))?;
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            url,
        })
    }
}

#[async_trait]
impl ChatWebhook for WebhookSink {
    async fn post(&self, text: &str) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&WebhookPayload { text })
            .send()
            .await?;
        let status = response.status();
        tracing::debug!("Webhook answered: {}", status);
        if status != StatusCode::OK {
            return Err(NotificationError::UnexpectedStatus(status.as_u16()));
        }
        Ok(())
    }
}
