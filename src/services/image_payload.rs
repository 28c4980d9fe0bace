//! Payloads de imagen
//!
//! Las fotos viajan como data URLs (`data:image/jpeg;base64,...`), igual que
//! las produce una captura de cámara en el navegador.

use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payload is not a base64 data URL")]
    NotDataUrl,

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Imagen decodificada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Codificar bytes de imagen como data URL
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decodificar un data URL en base64
pub fn decode_data_url(payload: &str) -> Result<DecodedImage, PayloadError> {
    let rest = payload.strip_prefix("data:").ok_or(PayloadError::NotDataUrl)?;
    let (header, data) = rest.split_once(',').ok_or(PayloadError::NotDataUrl)?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or(PayloadError::NotDataUrl)?;

    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|e| PayloadError::InvalidBase64(e.to_string()))?;

    Ok(DecodedImage {
        mime: mime.to_string(),
        bytes,
    })
}

/// Tipo MIME según la extensión del archivo
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_data_url() {
        let payload = encode_data_url("image/png", &[0x89, b'P', b'N', b'G']);
        assert!(payload.starts_with("data:image/png;base64,"));

        let decoded = decode_data_url(&payload).unwrap();
        assert_eq!(decoded.mime, "image/png");
        assert_eq!(decoded.bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_decode_rejects_plain_strings() {
        assert_eq!(decode_data_url("img1"), Err(PayloadError::NotDataUrl));
        assert_eq!(
            decode_data_url("data:image/png,raw"),
            Err(PayloadError::NotDataUrl)
        );
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(PayloadError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("car.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("car.jpg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("car")), "image/jpeg");
    }
}
