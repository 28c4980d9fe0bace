use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use vehicle_intake::dto::record_dto::{LookupResponse, SaveRecordResponse};
use vehicle_intake::dto::ApiResponse;
use vehicle_intake::models::StoredRecord;
use vehicle_intake::services::{InitializationFailure, RecordInput, SessionContext};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("faltan campos: {}", .0.join(", "))]
    MissingField(Vec<String>),

    #[error("el store no pudo completar la operación, inténtalo de nuevo")]
    Store,

    #[error("error de red: {0}")]
    Http(#[from] reqwest::Error),

    #[error("respuesta inesperada ({0}): {1}")]
    Unexpected(StatusCode, String),
}

/// Cliente de la API con la sesión ya resuelta
pub struct IntakeClient {
    http: Client,
    base_url: String,
    session: SessionContext,
}

/// Arranque de sesión de un solo intento
pub async fn bootstrap_session(
    http: Client,
    base_url: &str,
) -> Result<IntakeClient, InitializationFailure> {
    let base_url = base_url.trim_end_matches('/').to_string();
    let response = http
        .post(format!("{}/api/session", base_url))
        .send()
        .await
        .map_err(|e| InitializationFailure(e.to_string()))?;

    if !response.status().is_success() {
        return Err(InitializationFailure(format!(
            "el servidor respondió {}",
            response.status()
        )));
    }

    let session = response
        .json::<SessionContext>()
        .await
        .map_err(|e| InitializationFailure(e.to_string()))?;

    Ok(IntakeClient {
        http,
        base_url,
        session,
    })
}

impl IntakeClient {
    pub fn owner_id(&self) -> &str {
        &self.session.owner_id
    }

    pub async fn save(&self, input: &RecordInput) -> Result<SaveRecordResponse, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/records", self.base_url))
            .bearer_auth(&self.session.token)
            .json(input)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.json::<ApiResponse<SaveRecordResponse>>().await?;
            return body
                .data
                .ok_or_else(|| ClientError::Unexpected(status, "respuesta sin datos".to_string()));
        }

        Err(error_from_body(status, response.json::<Value>().await.ok()))
    }

    pub async fn lookup(&self, license_plate: &str) -> Result<Option<StoredRecord>, ClientError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, lookup_path(license_plate)))
            .bearer_auth(&self.session.token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.json::<LookupResponse>().await?;
            return Ok(body.record.filter(|_| body.found));
        }

        Err(error_from_body(status, response.json::<Value>().await.ok()))
    }
}

/// La matrícula va como un único segmento; `/`, `#` o `?` no deben cambiar la ruta
fn lookup_path(license_plate: &str) -> String {
    format!("/api/records/{}", urlencoding::encode(license_plate.trim()))
}

fn error_from_body(status: StatusCode, body: Option<Value>) -> ClientError {
    let code = body
        .as_ref()
        .and_then(|b| b["code"].as_str())
        .unwrap_or_default();

    match code {
        "MISSING_FIELD" => {
            let fields = body
                .as_ref()
                .and_then(|b| b["details"]["fields"].as_array())
                .map(|fields| {
                    fields
                        .iter()
                        .filter_map(|f| f.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            ClientError::MissingField(fields)
        }
        "STORE_FAILURE" => ClientError::Store,
        _ => ClientError::Unexpected(
            status,
            body.map(|b| b.to_string()).unwrap_or_default(),
        ),
    }
}
