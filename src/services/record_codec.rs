//! RecordCodec
//!
//! Valida y normaliza la entrada del operador en un `VehicleRecord` canónico
//! y construye las claves de registro. Es el único punto donde se canonicaliza
//! una matrícula: guardado y búsqueda usan exactamente la misma regla.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::config::environment::DEFAULT_IMAGE_SIZE_WARNING_BYTES;
use crate::models::{RecordKey, VehicleRecord};
use crate::utils::validation::validate_not_empty;

/// Errores de validación del registro
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing required fields: {}", fields.join(", "))]
    MissingField { fields: Vec<String> },
}

/// Entrada cruda del operador
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct RecordInput {
    #[serde(rename = "licensePlate", default, deserialize_with = "null_as_empty")]
    #[validate(custom = "validate_not_empty")]
    pub license_plate: String,

    #[serde(rename = "employeeName", default, deserialize_with = "null_as_empty")]
    #[validate(custom = "validate_not_empty")]
    pub employee_name: String,

    #[serde(rename = "contractNumber", default, deserialize_with = "null_as_empty")]
    #[validate(custom = "validate_not_empty")]
    pub contract_number: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1))]
    pub images: Vec<String>,
}

// Un `null` explícito se trata igual que un campo ausente
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Aviso no bloqueante: las imágenes superan el umbral blando
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeWarning {
    pub total_bytes: usize,
    pub threshold_bytes: usize,
}

/// Resultado de `validate_for_save`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    pub record: VehicleRecord,
    pub size_warning: Option<SizeWarning>,
}

#[derive(Debug, Clone, Copy)]
pub struct RecordCodec {
    size_warning_threshold: usize,
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_SIZE_WARNING_BYTES)
    }
}

impl RecordCodec {
    pub fn new(size_warning_threshold: usize) -> Self {
        Self {
            size_warning_threshold,
        }
    }

    pub fn size_warning_threshold(&self) -> usize {
        self.size_warning_threshold
    }

    /// Validar la entrada y producir el registro canónico
    pub fn validate_for_save(&self, input: RecordInput) -> Result<ValidatedRecord, RecordError> {
        if let Err(errors) = input.validate() {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|field| camel_case(field))
                .collect();
            fields.sort();
            return Err(RecordError::MissingField { fields });
        }

        let plate = canonical_plate(&input.license_plate);
        let record = VehicleRecord {
            vehicle_number: plate.clone(),
            license_plate: plate,
            employee_name: input.employee_name,
            contract_number: input.contract_number,
            images: input.images,
        };

        let size_warning = self.check_size(record.total_image_bytes());
        Ok(ValidatedRecord {
            record,
            size_warning,
        })
    }

    /// Aviso si el total supera estrictamente el umbral
    pub fn check_size(&self, total_bytes: usize) -> Option<SizeWarning> {
        (total_bytes > self.size_warning_threshold).then_some(SizeWarning {
            total_bytes,
            threshold_bytes: self.size_warning_threshold,
        })
    }
}

/// Canonicalización de matrícula: trim + mayúsculas
pub fn canonical_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

/// Clave determinista usada tanto para guardar como para buscar
pub fn key_for(owner_id: &str, license_plate: &str) -> RecordKey {
    RecordKey::new(owner_id.to_string(), canonical_plate(license_plate))
}

/// Clave de búsqueda a partir de lo que teclea el operador
pub fn normalize_search_key(owner_id: &str, input: &str) -> Result<RecordKey, RecordError> {
    if input.trim().is_empty() {
        return Err(RecordError::MissingField {
            fields: vec!["licensePlate".to_string()],
        });
    }
    Ok(key_for(owner_id, input))
}

// validator reporta el nombre del campo Rust; la API expone camelCase
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(plate: &str, name: &str, contract: &str, images: &[&str]) -> RecordInput {
        RecordInput {
            license_plate: plate.to_string(),
            employee_name: name.to_string(),
            contract_number: contract.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_input_is_canonicalized() {
        let codec = RecordCodec::default();
        let validated = codec
            .validate_for_save(input("ab1234", "Ali", "C-001", &["img1", "img2"]))
            .unwrap();

        assert_eq!(validated.record.license_plate, "AB1234");
        assert_eq!(validated.record.vehicle_number, "AB1234");
        assert_eq!(validated.record.employee_name, "Ali");
        assert_eq!(validated.record.contract_number, "C-001");
        assert_eq!(validated.record.images, vec!["img1", "img2"]);
        assert_eq!(validated.size_warning, None);
    }

    #[test]
    fn test_plate_whitespace_is_trimmed() {
        let codec = RecordCodec::default();
        let validated = codec
            .validate_for_save(input("  xyz999 ", "Ali", "C-001", &["img1"]))
            .unwrap();
        assert_eq!(validated.record.license_plate, "XYZ999");
    }

    #[test]
    fn test_other_fields_pass_through_unchanged() {
        let codec = RecordCodec::default();
        let validated = codec
            .validate_for_save(input("AB1", " ali veli ", "c-001", &["img1"]))
            .unwrap();
        assert_eq!(validated.record.employee_name, " ali veli ");
        assert_eq!(validated.record.contract_number, "c-001");
    }

    #[test]
    fn test_each_required_field_is_checked() {
        let codec = RecordCodec::default();
        let cases = [
            input("", "Ali", "C-001", &["img1"]),
            input("AB1", "", "C-001", &["img1"]),
            input("AB1", "Ali", "", &["img1"]),
            input("AB1", "Ali", "C-001", &[]),
            input("   ", "Ali", "C-001", &["img1"]),
        ];

        for case in cases {
            let result = codec.validate_for_save(case.clone());
            assert!(
                matches!(result, Err(RecordError::MissingField { ref fields }) if fields.len() == 1),
                "expected one missing field for {case:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn test_missing_field_names_are_camel_case() {
        let codec = RecordCodec::default();
        let err = codec
            .validate_for_save(input("", "", "C-001", &[]))
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                fields: vec![
                    "employeeName".to_string(),
                    "images".to_string(),
                    "licensePlate".to_string(),
                ]
            }
        );
    }

    #[test]
    fn test_null_fields_are_reported_as_missing() {
        let raw = serde_json::json!({
            "licensePlate": null,
            "employeeName": "Ali",
            "contractNumber": "C-001",
            "images": null
        });
        let parsed: RecordInput = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.license_plate, "");
        assert!(parsed.images.is_empty());

        let err = RecordCodec::default().validate_for_save(parsed).unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                fields: vec!["images".to_string(), "licensePlate".to_string()]
            }
        );
    }

    #[test]
    fn test_size_warning_threshold_is_inclusive() {
        let codec = RecordCodec::new(10);

        let at_limit = codec
            .validate_for_save(input("AB1", "Ali", "C-001", &["12345", "67890"]))
            .unwrap();
        assert_eq!(at_limit.size_warning, None);

        let over = codec
            .validate_for_save(input("AB1", "Ali", "C-001", &["12345", "678901"]))
            .unwrap();
        assert_eq!(
            over.size_warning,
            Some(SizeWarning {
                total_bytes: 11,
                threshold_bytes: 10
            })
        );
        assert_eq!(over.record.images.len(), 2);
    }

    #[test]
    fn test_key_for_is_idempotent() {
        let a = key_for("owner", "ab1234");
        let b = key_for("owner", "AB1234");
        let c = key_for("owner", " ab1234 ");
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.license_plate(), "AB1234");
        assert_eq!(key_for("owner", a.license_plate()), a);
    }

    #[test]
    fn test_keys_differ_across_owners() {
        assert_ne!(key_for("owner-a", "AB1234"), key_for("owner-b", "AB1234"));
    }

    #[test]
    fn test_normalize_search_key() {
        assert_eq!(
            normalize_search_key("owner", "xyz999").unwrap(),
            key_for("owner", "XYZ999")
        );
        assert!(matches!(
            normalize_search_key("owner", "  "),
            Err(RecordError::MissingField { .. })
        ));
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("license_plate"), "licensePlate");
        assert_eq!(camel_case("licensePlate"), "licensePlate");
        assert_eq!(camel_case("images"), "images");
    }
}
