use super::RegistrationHandler;
use crate::proto::{TriggerEvent, TriggerResponse};
use axum::{extract::State, Json};
use std::sync::Arc;

/// Direct invocation: the body is a complete trigger event and the
/// reply is the trigger response document, whatever its status code.
pub async fn invoke(
    State(handler): State<Arc<RegistrationHandler>>,
    Json(event): Json<TriggerEvent>,
) -> Json<TriggerResponse> {
    tracing::trace!("Invoking registration handler with {} event", &event.http_method);
    Json(handler.handle(event).await)
}
