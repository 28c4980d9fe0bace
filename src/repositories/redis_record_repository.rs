use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use tracing::debug;

use crate::database::redis_client::{record_key, RedisClient};
use crate::models::{RecordKey, StoredRecord, VehicleRecord};
use crate::repositories::record_store::{RecordStore, StoreError};

/// Un documento JSON por clave, sin TTL
pub struct RedisRecordRepository {
    redis: RedisClient,
}

impl RedisRecordRepository {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RecordStore for RedisRecordRepository {
    fn backend_tag(&self) -> &'static str {
        "redis"
    }

    async fn put(&self, key: &RecordKey, record: &VehicleRecord) -> Result<StoredRecord, StoreError> {
        let redis_key = record_key(key.owner_id(), key.license_plate());
        let mut conn = self.redis.connection();

        // Lectura previa solo para conservar el timestamp de creación
        let existing: Option<String> = conn.get(&redis_key).await?;
        let created_at = match existing {
            Some(raw) => serde_json::from_str::<StoredRecord>(&raw)?.created_at,
            None => Utc::now(),
        };

        let stored = StoredRecord {
            record: record.clone(),
            created_at,
        };
        let serialized = serde_json::to_string(&stored)?;
        conn.set::<_, _, ()>(&redis_key, serialized).await?;

        debug!("💾 Documento guardado en {}", redis_key);
        Ok(stored)
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<StoredRecord>, StoreError> {
        let redis_key = record_key(key.owner_id(), key.license_plate());
        let mut conn = self.redis.connection();

        let raw: Option<String> = conn.get(&redis_key).await?;
        match raw {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => {
                debug!("❌ Sin documento en {}", redis_key);
                Ok(None)
            }
        }
    }
}
