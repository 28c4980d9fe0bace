use anyhow::Result;
use redis::aio::ConnectionManager;
use tracing::info;

/// Cliente Redis con connection manager
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// Crear nuevo cliente Redis y verificar la conexión
    pub async fn new(redis_url: &str) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", mask_url(redis_url));

        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");
        Ok(Self { manager })
    }

    pub fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }

}

/// Clave del documento de un registro
pub fn record_key(owner_id: &str, license_plate: &str) -> String {
    format!("vehicle_intake:record:{}:{}", owner_id, license_plate)
}

fn mask_url(url: &str) -> String {
    crate::database::connection::mask_database_url(url)
}
