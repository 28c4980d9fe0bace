use serde::{Deserialize, Serialize};

use crate::models::StoredRecord;
use crate::services::record_codec::SizeWarning;

pub use crate::services::record_codec::RecordInput as SaveRecordRequest;

// Response de guardado: documento almacenado y aviso de tamaño opcional
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecordResponse {
    pub record: StoredRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<SizeWarning>,
}

// Response de búsqueda: "sin coincidencia" no es un error
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<StoredRecord>,
}

impl LookupResponse {
    pub fn found(record: StoredRecord) -> Self {
        Self {
            found: true,
            record: Some(record),
        }
    }

    pub fn not_found() -> Self {
        Self {
            found: false,
            record: None,
        }
    }
}
