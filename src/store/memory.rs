use super::{StoreError, StudentStore};
use crate::record::StudentRecord;
use axum::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local table. Contents are lost on restart.
pub struct MemoryStore {
    table: String,
    records: RwLock<HashMap<String, StudentRecord>>,
}

impl MemoryStore {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_owned(),
            records: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn put(&self, record: &StudentRecord) -> Result<(), StoreError> {
        tracing::trace!("Writing {} to {}", record.student_id(), &self.table);
        self.records
            .write()
            .await
            .insert(record.student_id().to_owned(), record.clone());
        Ok(())
    }

    async fn get(&self, student_id: &str) -> Result<Option<StudentRecord>, StoreError> {
        Ok(self.records.read().await.get(student_id).cloned())
    }
}
