use super::RegistrationHandler;
use crate::proto::{TriggerEvent, TriggerResponse};
use axum::extract::State;
use std::sync::Arc;

/// REST surface: `/students` and `/students/:studentID`, any method.
pub async fn gateway(
    State(handler): State<Arc<RegistrationHandler>>,
    event: TriggerEvent,
) -> TriggerResponse {
    tracing::trace!("Gateway event: {} {:?}", &event.http_method, &event.path_parameters);
    handler.handle(event).await
}
