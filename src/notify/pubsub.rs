use super::NotificationError;
use axum::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Topic-based broadcast channel.
#[async_trait]
pub trait Publisher {
    /// Returns the message id assigned by the service.
    async fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<String, NotificationError>;
}

pub type SharedPublisher = Arc<dyn Publisher + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub id: String,
    pub topic: String,
    pub subject: String,
    pub message: String,
}

/// Keeps every published message in process; used for local runs.
pub struct MemoryPublisher {
    messages: Mutex<Vec<Published>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(vec![]),
        }
    }

    pub async fn published(&self) -> Vec<Published> {
        self.messages.lock().await.clone()
    }
}

impl Default for MemoryPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Publisher for MemoryPublisher {
    async fn publish(
        &self,
        topic: &str,
        subject: &str,
        message: &str,
    ) -> Result<String, NotificationError> {
        let id = Uuid::new_v4().to_string();
        tracing::info!("Published {id} to {topic}: {subject}");
        self.messages.lock().await.push(Published {
            id: id.clone(),
            topic: topic.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
        });
        Ok(id)
    }
}
