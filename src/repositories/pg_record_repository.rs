use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool};

use crate::models::{RecordKey, StoredRecord, VehicleRecord};
use crate::repositories::record_store::{RecordStore, StoreError};

/// Fila de la tabla vehicle_records
#[derive(Debug, sqlx::FromRow)]
struct VehicleRecordRow {
    license_plate: String,
    employee_name: String,
    contract_number: String,
    vehicle_number: String,
    images: Json<Vec<String>>,
    created_at: DateTime<Utc>,
}

impl From<VehicleRecordRow> for StoredRecord {
    fn from(row: VehicleRecordRow) -> Self {
        Self {
            record: VehicleRecord {
                license_plate: row.license_plate,
                employee_name: row.employee_name,
                contract_number: row.contract_number,
                vehicle_number: row.vehicle_number,
                images: row.images.0,
            },
            created_at: row.created_at,
        }
    }
}

pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordRepository {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn put(&self, key: &RecordKey, record: &VehicleRecord) -> Result<StoredRecord, StoreError> {
        // created_at queda fuera del DO UPDATE: se conserva el de la primera escritura
        let row = sqlx::query_as::<_, VehicleRecordRow>(
            r#"
            INSERT INTO vehicle_records (owner_id, license_plate, employee_name, contract_number, vehicle_number, images, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, now())
            ON CONFLICT (owner_id, license_plate) DO UPDATE
            SET employee_name = EXCLUDED.employee_name,
                contract_number = EXCLUDED.contract_number,
                vehicle_number = EXCLUDED.vehicle_number,
                images = EXCLUDED.images
            RETURNING license_plate, employee_name, contract_number, vehicle_number, images, created_at
            "#,
        )
        .bind(key.owner_id())
        .bind(key.license_plate())
        .bind(&record.employee_name)
        .bind(&record.contract_number)
        .bind(&record.vehicle_number)
        .bind(Json(&record.images))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<StoredRecord>, StoreError> {
        let row = sqlx::query_as::<_, VehicleRecordRow>(
            r#"
            SELECT license_plate, employee_name, contract_number, vehicle_number, images, created_at
            FROM vehicle_records
            WHERE owner_id = $1 AND license_plate = $2
            "#,
        )
        .bind(key.owner_id())
        .bind(key.license_plate())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StoredRecord::from))
    }
}
