use crate::{
    record::ValidationError,
    status::{Status, StatusKind},
    store::StoreError,
};
use thiserror::Error;

pub type APIResult = Result<Status, APIError>;

#[derive(Debug, Error)]
pub enum APIError {
    #[error("Invalid student record: {0}")]
    Validation(#[from] ValidationError),
    #[error("Missing studentID in path")]
    MissingParameter,
    #[error("Student not found")]
    NotFound,
    #[error("Unsupported method")]
    UnsupportedMethod(String),
    #[error("Failed to register student")]
    RegisterFailed(#[source] StoreError),
    #[error("Error retrieving student data")]
    LookupFailed(#[source] StoreError),
}

impl APIError {
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::NotFound => StatusKind::NotFound,
            Self::RegisterFailed(_) | Self::LookupFailed(_) => StatusKind::InternalError,
            _ => StatusKind::BadRequest,
        }
    }
}

impl From<APIError> for Status {
    fn from(error: APIError) -> Status {
        // Only the fixed message reaches the caller; sources stay in the logs.
        Status::message(error.kind(), error.to_string())
    }
}
