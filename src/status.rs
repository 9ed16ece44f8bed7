use crate::proto::TriggerResponse;
use axum::{
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value as JsValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Ok,
    BadRequest,
    InternalError,
    NotFound,
    PayloadTooLarge,
}

impl StatusKind {
    pub fn as_http(&self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

/// Outcome of a single invocation before it is encoded
/// into a [`TriggerResponse`].
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    kind: StatusKind,
    payload: JsValue,
}

impl Status {
    pub fn new(kind: StatusKind, payload: JsValue) -> Self {
        Self { kind, payload }
    }

    pub fn message(kind: StatusKind, message: impl Into<String>) -> Self {
        Self::new(kind, JsValue::String(message.into()))
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::message(StatusKind::Ok, message)
    }

    pub fn ok_payload(payload: impl Into<JsValue>) -> Self {
        Self::new(StatusKind::Ok, payload.into())
    }

    pub fn kind(&self) -> StatusKind {
        self.kind
    }
}

impl From<Status> for TriggerResponse {
    fn from(status: Status) -> Self {
        // Display on a Value is its compact JSON encoding.
        TriggerResponse::new(status.kind.as_http().as_u16(), status.payload.to_string())
    }
}

impl IntoResponse for TriggerResponse {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status_code, self.body).into_response();
        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!("Dropping invalid response header"),
            }
        }
        response
    }
}
