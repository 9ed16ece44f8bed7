//! Best-effort fan-out after a successful registration.
//!
//! A registration produces one chat webhook post and one pub/sub
//! publish. Neither outcome is ever returned to the caller; both are
//! reported to a [`NotificationHook`].

mod error;
mod hook;
mod message;
mod pubsub;
mod webhook;

#[cfg(feature = "aws")]
mod sns;

use crate::record::StudentRecord;
use crate::settings::{NotificationSettings, PubSubKind};
use std::sync::Arc;

pub use error::NotificationError;
pub use hook::{DeliveryStats, NotificationHook, SinkCounters, SinkKind};
pub use message::MessageFormat;
pub use pubsub::{MemoryPublisher, Published, Publisher, SharedPublisher};
pub use webhook::{ChatWebhook, SharedWebhook, WebhookSink};

#[cfg(feature = "aws")]
pub use sns::SnsPublisher;

pub struct Notifier {
    webhook: SharedWebhook,
    publisher: SharedPublisher,
    topic: String,
    subject: String,
    format: MessageFormat,
    hook: Arc<dyn NotificationHook + Send + Sync>,
}

impl Notifier {
    pub fn new(
        webhook: SharedWebhook,
        publisher: SharedPublisher,
        topic: impl Into<String>,
        hook: Arc<dyn NotificationHook + Send + Sync>,
    ) -> Self {
        Self {
            webhook,
            publisher,
            topic: topic.into(),
            subject: "New Student Registration".into(),
            format: MessageFormat::default(),
            hook,
        }
    }

    pub fn with_format(mut self, format: MessageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub async fn from_settings(
        settings: &NotificationSettings,
        hook: Arc<dyn NotificationHook + Send + Sync>,
    ) -> Result<Self, NotificationError> {
        let webhook: SharedWebhook = Arc::new(WebhookSink::new(&settings.webhook)?);
        let publisher: SharedPublisher = match &settings.pubsub.medium {
            PubSubKind::Memory => Arc::new(MemoryPublisher::new()),
            #[cfg(feature = "aws")]
            PubSubKind::Sns => Arc::new(SnsPublisher::from_env().await),
        };
        let notifier = Self::new(webhook, publisher, &settings.pubsub.topic, hook)
            .with_format(settings.format)
            .with_subject(&settings.subject);
        Ok(notifier)
    }

    /// Runs both notifications in order. Failures are absorbed here.
    pub async fn student_registered(&self, record: &StudentRecord) {
        let text = self.format.webhook_text(record);
        match self.webhook.post(&text).await {
            Ok(()) => self.hook.delivered(SinkKind::Webhook, None),
            Err(e) => self.hook.failed(SinkKind::Webhook, &e),
        }

        let message = self.format.pubsub_text(record);
        match self
            .publisher
            .publish(&self.topic, &self.subject, &message)
            .await
        {
            Ok(message_id) => self.hook.delivered(SinkKind::PubSub, Some(&message_id)),
            Err(e) => self.hook.failed(SinkKind::PubSub, &e),
        }
    }
}
