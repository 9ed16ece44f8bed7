use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    IOError(#[from] std::io::Error),
    #[error("stored record {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },
    #[error("stored record {key} has an unsupported attribute: {attribute}")]
    UnsupportedAttribute { key: String, attribute: String },
    #[error("backend error: {0}")]
    Backend(String),
}
