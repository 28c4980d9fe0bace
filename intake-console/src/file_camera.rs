use std::path::PathBuf;

use vehicle_intake::services::image_capture::{CaptureDevice, CaptureError, CapturedFrame};
use vehicle_intake::services::image_payload::mime_for_path;

/// "Cámara" que lee un frame fijo de un archivo de imagen
pub struct FileCamera {
    path: PathBuf,
    running: bool,
}

impl FileCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl CaptureDevice for FileCamera {
    fn start(&mut self) -> Result<(), CaptureError> {
        if !self.path.is_file() {
            return Err(CaptureError::Unavailable(format!(
                "{} no existe",
                self.path.display()
            )));
        }
        self.running = true;
        Ok(())
    }

    fn grab_frame(&mut self) -> Result<CapturedFrame, CaptureError> {
        if !self.running {
            return Err(CaptureError::Frame("camera not started".to_string()));
        }
        let bytes = std::fs::read(&self.path).map_err(|e| CaptureError::Frame(e.to_string()))?;
        Ok(CapturedFrame {
            mime: mime_for_path(&self.path).to_string(),
            bytes,
        })
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
