//! Modelo de VehicleRecord
//!
//! Un registro de entrada de vehículo: matrícula, empleado, contrato y fotos.
//! La forma serializada (camelCase, `timestamp`) es la del documento en el store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clave de un registro: `(owner_id, matrícula canónica)`.
///
/// Solo se construye a través de `record_codec::key_for` o
/// `record_codec::normalize_search_key`, que canonicalizan la matrícula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    owner_id: String,
    license_plate: String,
}

impl RecordKey {
    pub(crate) fn new(owner_id: String, license_plate: String) -> Self {
        Self {
            owner_id,
            license_plate,
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }
}

/// Registro canónico listo para persistir
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub license_plate: String,
    pub employee_name: String,
    pub contract_number: String,
    pub vehicle_number: String,
    pub images: Vec<String>,
}

impl VehicleRecord {
    /// Bytes agregados de las imágenes codificadas
    pub fn total_image_bytes(&self) -> usize {
        self.images.iter().map(String::len).sum()
    }
}

/// Registro tal como lo devuelve el store, con el timestamp asignado por el servidor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(flatten)]
    pub record: VehicleRecord,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stored_record_document_shape() {
        let stored = StoredRecord {
            record: VehicleRecord {
                license_plate: "XYZ999".to_string(),
                employee_name: "Ali".to_string(),
                contract_number: "C-001".to_string(),
                vehicle_number: "XYZ999".to_string(),
                images: vec!["img1".to_string()],
            },
            created_at: "2026-01-02T03:04:05Z".parse().unwrap(),
        };

        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(
            value,
            json!({
                "licensePlate": "XYZ999",
                "employeeName": "Ali",
                "contractNumber": "C-001",
                "vehicleNumber": "XYZ999",
                "images": ["img1"],
                "timestamp": "2026-01-02T03:04:05Z"
            })
        );
    }

    #[test]
    fn test_total_image_bytes() {
        let record = VehicleRecord {
            license_plate: "A".to_string(),
            employee_name: "B".to_string(),
            contract_number: "C".to_string(),
            vehicle_number: "A".to_string(),
            images: vec!["abc".to_string(), "de".to_string()],
        };
        assert_eq!(record.total_image_bytes(), 5);
    }
}
