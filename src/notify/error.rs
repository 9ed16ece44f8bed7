use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook answered with status {0}")]
    UnexpectedStatus(u16),
    #[error("invalid webhook url: {0}")]
    InvalidUrl(String),
    #[error("publish failed: {0}")]
    Publish(String),
}
