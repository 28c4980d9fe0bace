//! Contrato del store de registros
//!
//! Capacidad clave/documento: `put` con sobrescritura completa y `get` por
//! clave. La clave llega ya canonicalizada por el codec; los backends la
//! tratan como opaca.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{RecordKey, StoredRecord, VehicleRecord};

/// Fallo del backend (transitorio o permanente, no se distingue)
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("corrupt document: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    /// Sobrescribe el documento completo. El timestamp de creación se asigna
    /// en la primera escritura de la clave y se conserva después.
    async fn put(&self, key: &RecordKey, record: &VehicleRecord) -> Result<StoredRecord, StoreError>;

    async fn get(&self, key: &RecordKey) -> Result<Option<StoredRecord>, StoreError>;
}
