//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::record_store::RecordStore;
use crate::services::identity_service::IdentityProvider;
use crate::services::record_codec::RecordCodec;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub codec: RecordCodec,
    pub store: Arc<dyn RecordStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        store: Arc<dyn RecordStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            codec: RecordCodec::new(config.image_size_warning_bytes),
            config,
            store,
            identity,
        }
    }
}
