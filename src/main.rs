use registrar::{server, AppState, Settings};
use std::error::Error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let settings = Settings::new()?;
    tracing::info!("Running with settings: {:?}", settings);
    let state = AppState::from_settings(&settings).await?;
    server::serve(&settings.http, state).await
}
