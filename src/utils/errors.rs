//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::repositories::record_store::StoreError;
use crate::services::identity_service::InitializationFailure;
use crate::services::record_codec::RecordError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingField(Vec<String>),

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    #[error("Session initialization failed: {0}")]
    Initialization(#[from] InitializationFailure),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::MissingField { fields } => AppError::MissingField(fields),
        }
    }
}

// Cuerpo ilegible o con tipos incorrectos; los `null` ya se aceptan como vacíos
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::MissingField(fields) => {
                warn!("⚠️ Campos requeridos vacíos: {:?}", fields);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Missing Field".to_string(),
                        message: format!("Required fields are empty: {}", fields.join(", ")),
                        details: Some(json!({ "fields": fields })),
                        code: Some("MISSING_FIELD".to_string()),
                    },
                )
            }

            AppError::Store(e) => {
                error!("❌ Error del store: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "Store Failure".to_string(),
                        message: "The record store could not complete the request, please try again".to_string(),
                        details: None,
                        code: Some("STORE_FAILURE".to_string()),
                    },
                )
            }

            AppError::Initialization(e) => {
                error!("❌ Error inicializando sesión: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "Initialization Failure".to_string(),
                        message: "The session could not be initialized".to_string(),
                        details: None,
                        code: Some("INITIALIZATION_FAILURE".to_string()),
                    },
                )
            }

            AppError::Unauthorized(msg) => {
                warn!("🔒 Acceso no autorizado: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "Unauthorized".to_string(),
                        message: msg,
                        details: None,
                        code: Some("UNAUTHORIZED".to_string()),
                    },
                )
            }

            AppError::Jwt(msg) => {
                warn!("🔒 Error JWT: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "JWT Error".to_string(),
                        message: msg,
                        details: None,
                        code: Some("JWT_ERROR".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Solicitud incorrecta: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;
