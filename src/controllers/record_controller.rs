use std::sync::Arc;
use tracing::{info, warn};

use crate::dto::record_dto::{LookupResponse, SaveRecordRequest, SaveRecordResponse};
use crate::dto::ApiResponse;
use crate::repositories::record_store::RecordStore;
use crate::services::record_codec::{self, RecordCodec};
use crate::utils::errors::AppResult;

pub struct RecordController {
    codec: RecordCodec,
    store: Arc<dyn RecordStore>,
}

impl RecordController {
    pub fn new(codec: RecordCodec, store: Arc<dyn RecordStore>) -> Self {
        Self { codec, store }
    }

    /// Validar, canonicalizar y persistir (sobrescribe la clave si existe)
    pub async fn save(
        &self,
        owner_id: &str,
        request: SaveRecordRequest,
    ) -> AppResult<ApiResponse<SaveRecordResponse>> {
        let validated = self.codec.validate_for_save(request)?;

        // El aviso de tamaño no bloquea el guardado
        if let Some(warning) = &validated.size_warning {
            warn!(
                "⚠️ Imágenes de {} ocupan {} bytes (umbral {})",
                validated.record.license_plate, warning.total_bytes, warning.threshold_bytes
            );
        }

        let key = record_codec::key_for(owner_id, &validated.record.license_plate);
        let stored = self.store.put(&key, &validated.record).await?;

        info!(
            "💾 Registro {} guardado ({} imágenes, backend {})",
            key.license_plate(),
            stored.record.images.len(),
            self.store.backend_tag()
        );

        Ok(ApiResponse::success_with_message(
            SaveRecordResponse {
                record: stored,
                warning: validated.size_warning,
            },
            "Record saved".to_string(),
        ))
    }

    /// Búsqueda exacta por matrícula dentro del namespace del propietario
    pub async fn lookup(&self, owner_id: &str, license_plate: &str) -> AppResult<LookupResponse> {
        let key = record_codec::normalize_search_key(owner_id, license_plate)?;

        match self.store.get(&key).await? {
            Some(record) => {
                info!("🔍 Registro {} encontrado", key.license_plate());
                Ok(LookupResponse::found(record))
            }
            None => {
                info!("🔍 Sin coincidencia para {}", key.license_plate());
                Ok(LookupResponse::not_found())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryRecordRepository;
    use crate::utils::errors::AppError;

    fn controller(threshold: usize) -> RecordController {
        RecordController::new(
            RecordCodec::new(threshold),
            Arc::new(MemoryRecordRepository::new()),
        )
    }

    fn request(plate: &str, name: &str, contract: &str, images: &[&str]) -> SaveRecordRequest {
        SaveRecordRequest {
            license_plate: plate.to_string(),
            employee_name: name.to_string(),
            contract_number: contract.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_save_then_lookup_scenario() {
        let controller = controller(800_000);
        controller
            .save("owner", request("XYZ999", "Ali", "C-001", &["img1"]))
            .await
            .unwrap();

        let lookup = controller.lookup("owner", "xyz999").await.unwrap();
        assert!(lookup.found);
        let record = lookup.record.unwrap().record;
        assert_eq!(record.license_plate, "XYZ999");
        assert_eq!(record.vehicle_number, "XYZ999");
        assert_eq!(record.employee_name, "Ali");
        assert_eq!(record.contract_number, "C-001");
        assert_eq!(record.images, vec!["img1".to_string()]);
    }

    #[tokio::test]
    async fn test_lookup_variants_find_same_record() {
        let controller = controller(800_000);
        let saved = controller
            .save("owner", request("ab1234", "Ali", "C-001", &["img1"]))
            .await
            .unwrap()
            .data
            .unwrap()
            .record;

        for variant in ["AB1234", "ab1234", " ab1234 "] {
            let lookup = controller.lookup("owner", variant).await.unwrap();
            assert_eq!(lookup.record.as_ref(), Some(&saved), "variant {variant:?}");
        }
    }

    #[tokio::test]
    async fn test_second_save_replaces_first() {
        let controller = controller(800_000);
        controller
            .save("owner", request("AB1", "Ali", "C-001", &["a", "b"]))
            .await
            .unwrap();
        controller
            .save("owner", request("ab1", "Veli", "C-002", &["c"]))
            .await
            .unwrap();

        let record = controller.lookup("owner", "AB1").await.unwrap().record.unwrap().record;
        assert_eq!(record.employee_name, "Veli");
        assert_eq!(record.contract_number, "C-002");
        assert_eq!(record.images, vec!["c".to_string()]);
    }

    #[tokio::test]
    async fn test_size_warning_does_not_block_save() {
        let controller = controller(4);
        let response = controller
            .save("owner", request("AB1", "Ali", "C-001", &["12345"]))
            .await
            .unwrap();

        let data = response.data.unwrap();
        assert!(data.warning.is_some());
        assert!(controller.lookup("owner", "AB1").await.unwrap().found);
    }

    #[tokio::test]
    async fn test_missing_field_is_not_persisted() {
        let controller = controller(800_000);
        let result = controller
            .save("owner", request("AB1", "Ali", "C-001", &[]))
            .await;
        assert!(matches!(result, Err(AppError::MissingField(_))));
        assert!(!controller.lookup("owner", "AB1").await.unwrap().found);
    }

    #[tokio::test]
    async fn test_unknown_plate_is_not_found() {
        let controller = controller(800_000);
        let lookup = controller.lookup("owner", "NOPE").await.unwrap();
        assert!(!lookup.found);
        assert!(lookup.record.is_none());
    }

    #[tokio::test]
    async fn test_empty_search_is_missing_field() {
        let controller = controller(800_000);
        assert!(matches!(
            controller.lookup("owner", "   ").await,
            Err(AppError::MissingField(_))
        ));
    }
}
