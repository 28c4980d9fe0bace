//! Captura de imágenes
//!
//! `CaptureDevice` es el colaborador externo que entrega frames fijos.
//! `CameraSession` lo adquiere de forma acotada: el dispositivo se detiene
//! exactamente una vez, sea por `close`, por error o al salir de scope.

use thiserror::Error;

use crate::services::image_payload::encode_data_url;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("capture device unavailable: {0}")]
    Unavailable(String),

    #[error("frame capture failed: {0}")]
    Frame(String),
}

/// Frame fijo capturado completamente en memoria
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl CapturedFrame {
    /// Payload listo para `RecordDraft::add_image`
    pub fn to_payload(&self) -> String {
        encode_data_url(&self.mime, &self.bytes)
    }
}

pub trait CaptureDevice {
    fn start(&mut self) -> Result<(), CaptureError>;
    fn grab_frame(&mut self) -> Result<CapturedFrame, CaptureError>;
    /// Libera el recurso de forma síncrona
    fn stop(&mut self);
}

/// Sesión de cámara con liberación garantizada
pub struct CameraSession<'a, D: CaptureDevice + ?Sized> {
    device: &'a mut D,
    active: bool,
}

impl<'a, D: CaptureDevice + ?Sized> CameraSession<'a, D> {
    pub fn open(device: &'a mut D) -> Result<Self, CaptureError> {
        device.start()?;
        tracing::debug!("📷 Cámara iniciada");
        Ok(Self {
            device,
            active: true,
        })
    }

    pub fn capture(&mut self) -> Result<CapturedFrame, CaptureError> {
        self.device.grab_frame()
    }

    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.active {
            self.active = false;
            self.device.stop();
            tracing::debug!("📷 Cámara detenida");
        }
    }
}

impl<D: CaptureDevice + ?Sized> Drop for CameraSession<'_, D> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeCamera {
        starts: u32,
        stops: u32,
        fail_start: bool,
        fail_frame: bool,
    }

    impl CaptureDevice for FakeCamera {
        fn start(&mut self) -> Result<(), CaptureError> {
            if self.fail_start {
                return Err(CaptureError::Unavailable("no device".to_string()));
            }
            self.starts += 1;
            Ok(())
        }

        fn grab_frame(&mut self) -> Result<CapturedFrame, CaptureError> {
            if self.fail_frame {
                return Err(CaptureError::Frame("sensor error".to_string()));
            }
            Ok(CapturedFrame {
                mime: "image/jpeg".to_string(),
                bytes: vec![1, 2, 3],
            })
        }

        fn stop(&mut self) {
            self.stops += 1;
        }
    }

    #[test]
    fn test_explicit_close_stops_once() {
        let mut camera = FakeCamera::default();
        let mut session = CameraSession::open(&mut camera).unwrap();
        let frame = session.capture().unwrap();
        assert_eq!(frame.to_payload(), "data:image/jpeg;base64,AQID");
        session.close();
        assert_eq!(camera.starts, 1);
        assert_eq!(camera.stops, 1);
    }

    #[test]
    fn test_drop_stops_device() {
        let mut camera = FakeCamera::default();
        {
            let _session = CameraSession::open(&mut camera).unwrap();
        }
        assert_eq!(camera.stops, 1);
    }

    #[test]
    fn test_error_path_stops_device() {
        fn capture_once(camera: &mut FakeCamera) -> Result<CapturedFrame, CaptureError> {
            let mut session = CameraSession::open(camera)?;
            session.capture()
        }

        let mut camera = FakeCamera {
            fail_frame: true,
            ..FakeCamera::default()
        };
        assert!(capture_once(&mut camera).is_err());
        assert_eq!(camera.stops, 1);
    }

    #[test]
    fn test_failed_start_does_not_stop() {
        let mut camera = FakeCamera {
            fail_start: true,
            ..FakeCamera::default()
        };
        assert!(CameraSession::open(&mut camera).is_err());
        assert_eq!(camera.stops, 0);
    }
}
