use super::NotificationError;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Webhook,
    PubSub,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Webhook => write!(f, "webhook"),
            Self::PubSub => write!(f, "pubsub"),
        }
    }
}

/// Observes the outcome of every notification attempt.
pub trait NotificationHook {
    fn delivered(&self, sink: SinkKind, receipt: Option<&str>);
    fn failed(&self, sink: SinkKind, error: &NotificationError);
}

#[derive(Debug, Default, Serialize)]
pub struct SinkCounters {
    delivered: AtomicU64,
    failed: AtomicU64,
}

impl SinkCounters {
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Default hook: logs each outcome and counts it per sink.
#[derive(Debug, Default, Serialize)]
pub struct DeliveryStats {
    webhook: SinkCounters,
    pubsub: SinkCounters,
}

impl DeliveryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn webhook(&self) -> &SinkCounters {
        &self.webhook
    }

    pub fn pubsub(&self) -> &SinkCounters {
        &self.pubsub
    }

    fn counters(&self, sink: SinkKind) -> &SinkCounters {
        match sink {
            SinkKind::Webhook => &self.webhook,
            SinkKind::PubSub => &self.pubsub,
        }
    }
}

impl NotificationHook for DeliveryStats {
    fn delivered(&self, sink: SinkKind, receipt: Option<&str>) {
        self.counters(sink).delivered.fetch_add(1, Ordering::Relaxed);
        match receipt {
            Some(id) => tracing::info!("{sink} notification sent. Message ID: {id}"),
            None => tracing::info!("{sink} notification sent"),
        }
    }

    fn failed(&self, sink: SinkKind, error: &NotificationError) {
        self.counters(sink).failed.fetch_add(1, Ordering::Relaxed);
        tracing::warn!("{sink} notification failed: {error}");
    }
}
