mod extract;
pub mod handlers;
pub mod notify;
pub mod proto;
pub mod record;
pub mod server;
mod settings;
mod state;
mod status;
pub mod store;

pub use handlers::RegistrationHandler;
pub use proto::{TriggerEvent, TriggerResponse};
pub use record::StudentRecord;
pub use settings::{
    HttpSettings, NotificationSettings, PubSubKind, PubSubSettings, Settings, SettingsError,
    StoreKind, StoreSettings, WebhookSettings,
};
pub use state::AppState;
pub use status::{Status, StatusKind};
