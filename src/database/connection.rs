//! Conexión a PostgreSQL
//!
//! Creación del pool y del esquema de `vehicle_records`.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("🗄️ Conectando a PostgreSQL: {}", mask_database_url(database_url));
    let pool = DatabaseConfig::new(database_url).create_pool().await?;
    Ok(pool)
}

/// Crear el esquema si no existe (idempotente)
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicle_records (
            owner_id TEXT NOT NULL,
            license_plate TEXT NOT NULL,
            employee_name TEXT NOT NULL,
            contract_number TEXT NOT NULL,
            vehicle_number TEXT NOT NULL,
            images JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            PRIMARY KEY (owner_id, license_plate)
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("✅ Esquema vehicle_records listo");
    Ok(())
}

/// Función helper para enmascarar credenciales de una URL en logs
pub fn mask_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
