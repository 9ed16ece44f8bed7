mod error;
mod local;
mod memory;

#[cfg(feature = "aws")]
mod dynamo;

use crate::record::StudentRecord;
use crate::settings::{StoreKind, StoreSettings};
use axum::async_trait;
use std::sync::Arc;

pub use error::StoreError;
pub use local::LocalStore;
pub use memory::MemoryStore;

#[cfg(feature = "aws")]
pub use dynamo::DynamoStore;

/// Durable key-value table of student records, keyed by `studentID`.
#[async_trait]
pub trait StudentStore {
    /// Unconditional write; an existing record with the same key is replaced.
    async fn put(&self, record: &StudentRecord) -> Result<(), StoreError>;
    async fn get(&self, student_id: &str) -> Result<Option<StudentRecord>, StoreError>;
}

pub type SharedStore = Arc<dyn StudentStore + Sync + Send>;

pub async fn init(settings: &StoreSettings) -> Result<SharedStore, StoreError> {
    let store: SharedStore = match &settings.medium {
        StoreKind::Memory => Arc::new(MemoryStore::new(&settings.table)),
        StoreKind::Local { directory } => Arc::new(LocalStore::new(directory, &settings.table).await?),
        #[cfg(feature = "aws")]
        StoreKind::Dynamo => Arc::new(DynamoStore::from_env(&settings.table).await),
    };
    tracing::info!("Student store ready: table {}", &settings.table);
    Ok(store)
}
