use super::{StoreError, StudentStore};
use crate::record::StudentRecord;
use axum::async_trait;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One JSON document per record under `<directory>/<table>/`.
/// File names are the hex SHA-256 of the key, so every `studentID`
/// maps to a single flat file of fixed length. The key itself lives
/// inside the document.
#[derive(Debug, Clone)]
pub struct LocalStore {
    base_dir: PathBuf,
}

impl LocalStore {
    pub async fn new(directory: &str, table: &str) -> Result<Self, StoreError> {
        let base_dir = Path::new(directory).join(table);
        tokio::fs::create_dir_all(&base_dir).await?;
        Ok(Self { base_dir })
    }

    fn path_for(&self, student_id: &str) -> PathBuf {
        let digest = Sha256::digest(student_id.as_bytes());
        self.base_dir
            .join(hex::encode(digest))
            .with_extension("json")
    }
}

#[async_trait]
impl StudentStore for LocalStore {
    async fn put(&self, record: &StudentRecord) -> Result<(), StoreError> {
        let path = self.path_for(record.student_id());
        let bytes = record.to_json().map_err(|source| StoreError::Corrupt {
            key: record.student_id().to_owned(),
            source,
        })?;
        // Readers never observe a partially written record.
        let staging = path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4()));
        tokio::fs::write(&staging, bytes).await?;
        if let Err(e) = tokio::fs::rename(&staging, &path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }
        tracing::trace!("Stored {} at {}", record.student_id(), path.display());
        Ok(())
    }

    async fn get(&self, student_id: &str) -> Result<Option<StudentRecord>, StoreError> {
        let path = self.path_for(student_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record = serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            key: student_id.to_owned(),
            source,
        })?;
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn records_survive_reopening() {
        let dir = TempDir::new().unwrap();
        let directory = dir.path().to_str().unwrap();
        let record = StudentRecord::try_from(json!({
            "studentID": "../S1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "courses": ["math"]
        }))
        .unwrap();

        LocalStore::new(directory, "students")
            .await
            .unwrap()
            .put(&record)
            .await
            .unwrap();

        let reopened = LocalStore::new(directory, "students").await.unwrap();
        assert_eq!(reopened.get("../S1").await.unwrap(), Some(record));
        assert_eq!(reopened.get("S2").await.unwrap(), None);
        // Keys never escape the table directory.
        assert_eq!(std::fs::read_dir(dir.path().join("students")).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().to_str().unwrap(), "students")
            .await
            .unwrap();
        std::fs::write(store.path_for("S1"), b"{truncated").unwrap();

        let err = store.get("S1").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn long_ids_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().to_str().unwrap(), "students")
            .await
            .unwrap();
        let long_id = "S".repeat(200);
        let record = StudentRecord::try_from(json!({
            "studentID": long_id.as_str(),
            "firstName": "Ada",
            "lastName": "Lovelace"
        }))
        .unwrap();

        store.put(&record).await.unwrap();
        assert_eq!(store.get(&long_id).await.unwrap(), Some(record));
        assert_eq!(store.get(&"S".repeat(199)).await.unwrap(), None);
    }
}
