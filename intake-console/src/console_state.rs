//! Estado de la consola
//!
//! Todo el estado de pantalla vive en `ConsoleState`; cada transición
//! consume el estado y devuelve el siguiente.

use vehicle_intake::services::{RecordDraft, SizeWarning};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Menu,
    Intake,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleState {
    pub view: View,
    pub busy: bool,
    pub draft: RecordDraft,
    pub notice: Option<Notice>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            view: View::Menu,
            busy: false,
            draft: RecordDraft::new(),
            notice: None,
        }
    }
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(self, view: View) -> Self {
        Self {
            view,
            notice: None,
            ..self
        }
    }

    /// Una sola operación en vuelo: si ya hay una, el estado vuelve sin cambios
    pub fn begin_request(self) -> Result<Self, Self> {
        if self.busy {
            return Err(self);
        }
        Ok(Self {
            busy: true,
            notice: None,
            ..self
        })
    }

    pub fn invalid_input(self, message: String) -> Self {
        Self {
            notice: Some(Notice::Error(message)),
            ..self
        }
    }

    /// Guardado correcto: el borrador se descarta
    pub fn save_succeeded(mut self, license_plate: &str, warning: Option<SizeWarning>) -> Self {
        self.draft.clear();
        let notice = match warning {
            Some(w) => Notice::Warning(format!(
                "{} guardado, pero las imágenes ocupan {} bytes (umbral {})",
                license_plate, w.total_bytes, w.threshold_bytes
            )),
            None => Notice::Info(format!("{} guardado", license_plate)),
        };
        Self {
            busy: false,
            notice: Some(notice),
            ..self
        }
    }

    pub fn lookup_finished(self, license_plate: &str, found: bool) -> Self {
        let notice = if found {
            Notice::Info(format!("{} encontrado", license_plate))
        } else {
            Notice::Info(format!("Sin coincidencia para {}", license_plate))
        };
        Self {
            busy: false,
            notice: Some(notice),
            ..self
        }
    }

    /// Fallo de red o del store: el borrador se conserva para reintentar
    pub fn request_failed(self, message: String) -> Self {
        Self {
            busy: false,
            notice: Some(Notice::Error(message)),
            ..self
        }
    }
}
