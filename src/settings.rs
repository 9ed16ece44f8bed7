use config::{Config, ConfigError, Environment, File, Map, Source};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use crate::notify::MessageFormat;

/// Conventional function variables, honoured on top of the
/// prefixed `REGISTRAR_*` environment.
const TABLE_VAR: &str = "DYNAMODB_TABLE_NAME";
const WEBHOOK_VAR: &str = "SLACK_WEBHOOK_URL";
const TOPIC_VAR: &str = "SNS_TOPIC_ARN";

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub http: HttpSettings,
    pub store: StoreSettings,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Deserialize)]
pub struct HttpSettings {
    pub host: String,
    pub port: u16,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8090,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreKind {
    Memory,
    Local { directory: String },
    #[cfg(feature = "aws")]
    Dynamo,
}

#[derive(Debug, Deserialize)]
pub struct StoreSettings {
    pub table: String,
    pub medium: StoreKind,
}

#[derive(Debug, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub format: MessageFormat,
    #[serde(default = "default_subject")]
    pub subject: String,
    pub webhook: WebhookSettings,
    pub pubsub: PubSubSettings,
}

fn default_subject() -> String {
    "New Student Registration".into()
}

#[derive(Deserialize)]
pub struct WebhookSettings {
    pub url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

// The webhook URL embeds its credential.
impl fmt::Debug for WebhookSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookSettings")
            .field("url", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PubSubKind {
    Memory,
    #[cfg(feature = "aws")]
    Sns,
}

#[derive(Debug, Deserialize)]
pub struct PubSubSettings {
    pub topic: String,
    pub medium: PubSubKind,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl Settings {
    pub fn new() -> Result<Self, SettingsError> {
        let env: Map<String, String> = std::env::vars().collect();
        let config_base = env
            .get("REGISTRAR_CONFIG_DIR")
            .cloned()
            .unwrap_or_else(|| "./config".into());
        let mode = env.get("REGISTRAR_ENV").cloned().unwrap_or_else(|| "dev".into());
        let file = File::with_name(&format!("{}/{}.toml", config_base, mode)).required(false);
        Self::layered(file, env)
    }

    /// Config file, then `REGISTRAR_*` variables, then the conventional
    /// function variables. Later layers win.
    pub fn layered<F>(file: F, env: Map<String, String>) -> Result<Self, SettingsError>
    where
        F: Source + Send + Sync + 'static,
    {
        let lookup = |name: &str| env.get(name).cloned();
        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("REGISTRAR")
                    .prefix_separator("_")
                    .separator("__")
                    .source(Some(env.clone())),
            )
            .set_override_option("store.table", lookup(TABLE_VAR))?
            .set_override_option("notifications.webhook.url", lookup(WEBHOOK_VAR))?
            .set_override_option("notifications.pubsub.topic", lookup(TOPIC_VAR))?
            .build()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Every external collaborator must be addressable before the
    /// first request is served.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.store.table.trim().is_empty() {
            return Err(invalid("store.table", "must not be empty"));
        }
        let url = reqwest::Url::parse(&self.notifications.webhook.url)
            .map_err(|e| invalid("notifications.webhook.url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(
                "notifications.webhook.url",
                format!("unsupported scheme {}", url.scheme()),
            ));
        }
        if self.notifications.pubsub.topic.trim().is_empty() {
            return Err(invalid("notifications.pubsub.topic", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        key,
        reason: reason.into(),
    }
}
