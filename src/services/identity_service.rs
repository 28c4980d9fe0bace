//! Proveedor de identidad
//!
//! Inicio de sesión anónimo de un solo intento: produce el `owner_id` que
//! particiona los registros. Sin reintentos; un fallo es fatal para la sesión.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::jwt::{self, JwtConfig};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct InitializationFailure(pub String);

/// Identidad resuelta de una sesión
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub owner_id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Emitir una identidad anónima nueva
    async fn sign_in_anonymously(&self) -> Result<SessionContext, InitializationFailure>;

    /// Resolver la sesión de un token presentado por el cliente
    fn verify(&self, token: &str) -> Result<SessionContext, AppError>;
}

/// Identidades anónimas firmadas como JWT
pub struct JwtIdentityProvider {
    config: JwtConfig,
}

impl JwtIdentityProvider {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn sign_in_anonymously(&self) -> Result<SessionContext, InitializationFailure> {
        let owner_id = Uuid::new_v4().to_string();
        let (token, expires_at) = jwt::generate_token(&owner_id, &self.config)
            .map_err(|e| InitializationFailure(e.to_string()))?;

        tracing::info!("🔑 Sesión anónima creada para owner {}", owner_id);
        Ok(SessionContext {
            owner_id,
            token,
            expires_at,
        })
    }

    fn verify(&self, token: &str) -> Result<SessionContext, AppError> {
        let claims = jwt::verify_token(token, &self.config)?;
        if claims.sub.trim().is_empty() {
            return Err(AppError::Unauthorized("Token without owner".to_string()));
        }

        Ok(SessionContext {
            expires_at: jwt::expires_at(&claims),
            owner_id: claims.sub,
            token: token.to_string(),
        })
    }
}
