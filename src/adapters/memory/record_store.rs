use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::ports::{RecordPage, RecordStore, StoreError, StoreResult};

const ID_FIELD: &str = "_id";

/// `RecordStore` kept entirely in process memory.
///
/// Records keep insertion order per collection. Every record must carry a
/// string `_id` that is unique within its collection.
#[derive(Default)]
pub struct MemoryRecordStore {
    collections: DashMap<String, Vec<Value>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `{ "<collection>": [records...] }`.
    pub fn from_seed(seed: HashMap<String, Vec<Value>>) -> StoreResult<Self> {
        let store = Self::new();
        for (collection, records) in seed {
            for record in records {
                store.insert(&collection, record)?;
            }
        }
        Ok(store)
    }

    pub async fn from_seed_file(path: &Path) -> StoreResult<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            StoreError::StoreUnavailable(format!("Failed to read seed file {}: {}", path.display(), e))
        })?;

        let seed: HashMap<String, Vec<Value>> = serde_json::from_str(&contents)
            .map_err(|e| StoreError::Serialization(format!("Invalid seed file: {e}")))?;

        let store = Self::from_seed(seed)?;
        tracing::info!(
            "Seeded memory store from {} ({} collections)",
            path.display(),
            store.collections.len()
        );
        Ok(store)
    }

    fn insert(&self, collection: &str, record: Value) -> StoreResult<Value> {
        let id = record
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                StoreError::ValidationRejected(format!("Record in {collection} has no {ID_FIELD}"))
            })?
            .to_string();

        let mut records = self.collections.entry(collection.to_string()).or_default();
        if records.iter().any(|existing| record_id(existing) == Some(id.as_str())) {
            return Err(StoreError::ValidationRejected(format!(
                "Duplicate {ID_FIELD} {id} in {collection}"
            )));
        }

        records.push(record.clone());
        Ok(record)
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, collection: &str, record: Value) -> StoreResult<Value> {
        let created = self.insert(collection, record)?;
        tracing::debug!("Stored record in {}: {}", collection, created);
        Ok(created)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        Ok(self.collections.get(collection).and_then(|records| {
            records
                .iter()
                .find(|record| record_id(record) == Some(id))
                .cloned()
        }))
    }

    async fn get_all(&self, collection: &str) -> StoreResult<RecordPage<Value>> {
        let items = self
            .collections
            .get(collection)
            .map(|records| records.clone())
            .unwrap_or_default();
        Ok(RecordPage::new(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_create_then_read_back() {
        let store = MemoryRecordStore::new();
        let record = json!({ "_id": "p1", "projectName": "Churn" });

        let created = store.create("projects", record.clone()).await.unwrap();
        assert_eq!(created, record);

        let found = store.get_by_id("projects", "p1").await.unwrap();
        assert_eq!(found, Some(record));
        assert_eq!(store.get_by_id("projects", "p2").await.unwrap(), None);
        assert_eq!(store.get_by_id("other", "p1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_all_preserves_insertion_order() {
        let store = MemoryRecordStore::new();
        for id in ["c", "a", "b"] {
            store.create("projects", json!({ "_id": id })).await.unwrap();
        }

        let page = store.get_all("projects").await.unwrap();
        let ids: Vec<&str> = page.items.iter().filter_map(record_id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(page.total_count, 3);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = MemoryRecordStore::new();
        assert!(store.get_all("projects").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_duplicate_and_missing_ids() {
        let store = MemoryRecordStore::new();
        store.create("projects", json!({ "_id": "p1" })).await.unwrap();

        assert!(matches!(
            store.create("projects", json!({ "_id": "p1" })).await,
            Err(StoreError::ValidationRejected(_))
        ));
        assert!(matches!(
            store.create("projects", json!({ "projectName": "no id" })).await,
            Err(StoreError::ValidationRejected(_))
        ));
        assert_eq!(store.get_all("projects").await.unwrap().total_count, 1);
    }

    #[tokio::test]
    async fn test_from_seed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "projects": [{{ "_id": "p1", "projectName": "Churn" }}, {{ "_id": "p2" }}] }}"#
        )
        .unwrap();

        let store = MemoryRecordStore::from_seed_file(file.path()).await.unwrap();
        let page = store.get_all("projects").await.unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items[0]["projectName"], "Churn");
    }

    #[tokio::test]
    async fn test_malformed_seed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            MemoryRecordStore::from_seed_file(file.path()).await,
            Err(StoreError::Serialization(_))
        ));
    }
}
