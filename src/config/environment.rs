//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// Umbral por defecto del tamaño agregado de imágenes (~800 KB).
/// El límite del documento en el store es ~1 MB incluyendo el resto de campos.
pub const DEFAULT_IMAGE_SIZE_WARNING_BYTES: usize = 800_000;

/// Límite por defecto del body HTTP; debe aceptar payloads por encima del umbral
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Backend del store de registros
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("STORE_BACKEND desconocido: '{}'", other)),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub image_size_warning_bytes: usize,
    pub body_limit_bytes: usize,
}

impl Default for EnvironmentConfig {
    /// Valores de desarrollo local: store en memoria y secreto fijo
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "development-secret".to_string(),
            jwt_expiration: 86_400,
            cors_origins: Vec::new(),
            store_backend: StoreBackend::Memory,
            database_url: None,
            redis_url: None,
            image_size_warning_bytes: DEFAULT_IMAGE_SIZE_WARNING_BYTES,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.trim().is_empty())
            .unwrap_or(defaults.jwt_secret);

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.store_backend,
        };

        let config = Self {
            environment,
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            store_backend,
            database_url: env::var("DATABASE_URL").ok(),
            redis_url: env::var("REDIS_URL").ok(),
            image_size_warning_bytes: parse_var(
                "IMAGE_SIZE_WARNING_BYTES",
                defaults.image_size_warning_bytes,
            )?,
            body_limit_bytes: parse_var("BODY_LIMIT_BYTES", defaults.body_limit_bytes)?,
        };

        config.check_secret()?;
        config.check_backend()?;
        Ok(config)
    }

    /// En producción el secreto de desarrollo no vale
    fn check_secret(&self) -> Result<()> {
        if self.is_production() && self.jwt_secret == Self::default().jwt_secret {
            return Err(anyhow!("JWT_SECRET must be set in production"));
        }
        Ok(())
    }

    /// Verificar que el backend elegido tenga su URL
    fn check_backend(&self) -> Result<()> {
        match self.store_backend {
            StoreBackend::Postgres if self.database_url.is_none() => {
                Err(anyhow!("DATABASE_URL must be set when STORE_BACKEND=postgres"))
            }
            StoreBackend::Redis if self.redis_url.is_none() => {
                Err(anyhow!("REDIS_URL must be set when STORE_BACKEND=redis"))
            }
            _ => Ok(()),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_from_str() {
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!("PostgreSQL".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!(" redis ".parse::<StoreBackend>().unwrap(), StoreBackend::Redis);
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("firestore".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_default_config_is_development() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.image_size_warning_bytes, 800_000);
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }

    #[test]
    fn test_production_requires_secret() {
        let config = EnvironmentConfig {
            environment: "production".to_string(),
            ..EnvironmentConfig::default()
        };
        assert!(config.check_secret().is_err());

        let config = EnvironmentConfig {
            jwt_secret: "a-real-secret".to_string(),
            ..config
        };
        assert!(config.check_secret().is_ok());
        assert!(EnvironmentConfig::default().check_secret().is_ok());
    }

    #[test]
    fn test_backend_requires_url() {
        let config = EnvironmentConfig {
            store_backend: StoreBackend::Postgres,
            ..EnvironmentConfig::default()
        };
        assert!(config.check_backend().is_err());

        let config = EnvironmentConfig {
            store_backend: StoreBackend::Redis,
            redis_url: Some("redis://localhost:6379".to_string()),
            ..EnvironmentConfig::default()
        };
        assert!(config.check_backend().is_ok());
    }
}
