//! Borrador de registro
//!
//! El registro se construye campo a campo mientras el operador rellena el
//! formulario y captura fotos. Solo pasa por el codec al guardar.

use crate::services::record_codec::RecordInput;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    license_plate: String,
    employee_name: String,
    contract_number: String,
    images: Vec<String>,
}

impl RecordDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_license_plate(&mut self, value: impl Into<String>) {
        self.license_plate = value.into();
    }

    pub fn set_employee_name(&mut self, value: impl Into<String>) {
        self.employee_name = value.into();
    }

    pub fn set_contract_number(&mut self, value: impl Into<String>) {
        self.contract_number = value.into();
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    pub fn employee_name(&self) -> &str {
        &self.employee_name
    }

    pub fn contract_number(&self) -> &str {
        &self.contract_number
    }

    pub fn add_image(&mut self, payload: String) {
        self.images.push(payload);
    }

    /// Quita la imagen en `index`; fuera de rango no hace nada
    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn total_image_bytes(&self) -> usize {
        self.images.iter().map(String::len).sum()
    }

    pub fn to_input(&self) -> RecordInput {
        RecordInput {
            license_plate: self.license_plate.clone(),
            employee_name: self.employee_name.clone(),
            contract_number: self.contract_number.clone(),
            images: self.images.clone(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
