use crate::{
    handlers::APIError,
    proto::{TriggerEvent, TriggerResponse},
    record::ValidationError,
    status::{Status, StatusKind},
};
use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, FromRequest, FromRequestParts, Path},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

/// Lifts a plain HTTP request into the event shape the
/// registration handler consumes: method, matched path
/// parameters and the raw body (empty bodies become `None`).
///
/// Rejections are rendered like handler failures, as a JSON
/// string message.
#[axum::async_trait]
impl<S> FromRequest<S, Body> for TriggerEvent
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = request.into_parts();
        let http_method = parts.method.as_str().to_owned();
        // Routes without captures have no parameters to extract.
        let path_parameters =
            match Path::<HashMap<String, String>>::from_request_parts(&mut parts, state).await {
                Ok(Path(params)) if !params.is_empty() => Some(params),
                _ => None,
            };

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(reject_body)?;
        let body = std::str::from_utf8(&bytes)
            .map_err(|e| reject(APIError::Validation(ValidationError::NotUtf8(e)).into()))?;

        Ok(Self {
            http_method,
            body: Some(body.to_owned()).filter(|b| !b.is_empty()),
            path_parameters,
        })
    }
}

fn reject_body(rejection: BytesRejection) -> Response {
    tracing::debug!("Rejecting request body: {}", rejection.body_text());
    let kind = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        StatusKind::PayloadTooLarge
    } else {
        StatusKind::BadRequest
    };
    reject(Status::message(kind, rejection.body_text()))
}

fn reject(status: Status) -> Response {
    TriggerResponse::from(status).into_response()
}
