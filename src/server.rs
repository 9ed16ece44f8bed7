use crate::{
    handlers::{GatewayHandler, HealthHandler, InvokeHandler},
    settings::HttpSettings,
    state::AppState,
};
use axum::{
    http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue},
    routing::{any, get, post},
    Router,
};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    let extra_layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        // every response, rejections included, is readable from any origin
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ));

    Router::new()
        .route("/health", get(HealthHandler))
        .route("/invoke", post(InvokeHandler))
        .route("/students", any(GatewayHandler))
        .route("/students/:studentID", any(GatewayHandler))
        .layer(extra_layers)
        .with_state(state)
}

pub async fn serve(settings: &HttpSettings, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let listen_addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    tracing::info!("Server started: Listening on: {}", listen_addr);
    axum::Server::bind(&listen_addr)
        .serve(router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
