use crate::{
    handlers::RegistrationHandler,
    notify::{DeliveryStats, Notifier},
    store, Settings,
};
use axum::extract::FromRef;
use std::error::Error;
use std::sync::Arc;

/// Everything a request needs, constructed once at startup.
#[derive(FromRef, Clone)]
pub struct AppState {
    pub handler: Arc<RegistrationHandler>,
    pub stats: Arc<DeliveryStats>,
}

impl AppState {
    pub fn new(handler: RegistrationHandler, stats: Arc<DeliveryStats>) -> Self {
        Self {
            handler: Arc::new(handler),
            stats,
        }
    }

    pub async fn from_settings(settings: &Settings) -> Result<Self, Box<dyn Error>> {
        let store = store::init(&settings.store).await?;
        let stats = Arc::new(DeliveryStats::new());
        let notifier = Notifier::from_settings(&settings.notifications, stats.clone()).await?;
        Ok(Self::new(RegistrationHandler::new(store, notifier), stats))
    }
}
