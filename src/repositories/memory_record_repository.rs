use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{RecordKey, StoredRecord, VehicleRecord};
use crate::repositories::record_store::{RecordStore, StoreError};

/// Store en memoria para desarrollo local y tests
#[derive(Default)]
pub struct MemoryRecordRepository {
    documents: RwLock<HashMap<RecordKey, StoredRecord>>,
}

impl MemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordRepository {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, key: &RecordKey, record: &VehicleRecord) -> Result<StoredRecord, StoreError> {
        let mut documents = self.documents.write().await;
        let created_at = documents
            .get(key)
            .map(|existing| existing.created_at)
            .unwrap_or_else(Utc::now);

        let stored = StoredRecord {
            record: record.clone(),
            created_at,
        };
        documents.insert(key.clone(), stored.clone());
        Ok(stored)
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<StoredRecord>, StoreError> {
        Ok(self.documents.read().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::record_codec::key_for;

    fn record(plate: &str, name: &str, images: &[&str]) -> VehicleRecord {
        VehicleRecord {
            license_plate: plate.to_string(),
            employee_name: name.to_string(),
            contract_number: "C-001".to_string(),
            vehicle_number: plate.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryRecordRepository::new();
        let key = key_for("owner", "AB1");
        let stored = store.put(&key, &record("AB1", "Ali", &["img"])).await.unwrap();

        let found = store.get(&key).await.unwrap().unwrap();
        assert_eq!(found, stored);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_overwrite_replaces_body_keeps_timestamp() {
        let store = MemoryRecordRepository::new();
        let key = key_for("owner", "AB1");
        let first = store
            .put(&key, &record("AB1", "Ali", &["a", "b"]))
            .await
            .unwrap();
        let second = store.put(&key, &record("AB1", "Veli", &["c"])).await.unwrap();

        assert_eq!(second.created_at, first.created_at);
        let found = store.get(&key).await.unwrap().unwrap();
        assert_eq!(found.record.employee_name, "Veli");
        assert_eq!(found.record.images, vec!["c".to_string()]);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let store = MemoryRecordRepository::new();
        assert!(store.is_empty().await);
        assert!(store.get(&key_for("owner", "NOPE")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_owners_do_not_collide() {
        let store = MemoryRecordRepository::new();
        store
            .put(&key_for("owner-a", "AB1"), &record("AB1", "Ali", &["a"]))
            .await
            .unwrap();

        assert!(store.get(&key_for("owner-b", "AB1")).await.unwrap().is_none());
    }
}
