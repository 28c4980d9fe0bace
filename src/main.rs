use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use vehicle_intake::config::environment::{EnvironmentConfig, StoreBackend};
use vehicle_intake::database::{self, RedisClient};
use vehicle_intake::repositories::{
    MemoryRecordRepository, PgRecordRepository, RecordStore, RedisRecordRepository,
};
use vehicle_intake::routes::create_app;
use vehicle_intake::services::JwtIdentityProvider;
use vehicle_intake::state::AppState;
use vehicle_intake::utils::jwt::JwtConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚗 Vehicle Intake - registro de vehículos");
    info!("=========================================");

    let config = EnvironmentConfig::from_env()?;
    let store = build_store(&config).await?;
    let identity = Arc::new(JwtIdentityProvider::new(JwtConfig::from(&config)));

    info!("🗄️ Store de registros: {}", store.backend_tag());
    if config.cors_origins.is_empty() && !config.is_development() {
        warn!("⚠️ CORS_ORIGINS vacío: se aceptan peticiones de cualquier origen");
    }

    let app_state = AppState::new(config.clone(), store, identity);
    info!(
        "📏 Umbral de aviso de imágenes: {} bytes",
        app_state.codec.size_warning_threshold()
    );
    let app = create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /api/session - Sesión anónima");
    info!("   POST /api/records - Guardar registro");
    info!("   GET  /api/records/:plate - Buscar por matrícula");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Construir el backend del store según la configuración
async fn build_store(config: &EnvironmentConfig) -> Result<Arc<dyn RecordStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
            let pool = database::create_pool(url).await?;
            database::run_migrations(&pool).await?;
            Ok(Arc::new(PgRecordRepository::new(pool)))
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("REDIS_URL must be set"))?;
            let redis = RedisClient::new(url).await?;
            Ok(Arc::new(RedisRecordRepository::new(redis)))
        }
        StoreBackend::Memory => {
            info!("⚠️ Store en memoria: los registros se pierden al reiniciar");
            Ok(Arc::new(MemoryRecordRepository::new()))
        }
    }
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
