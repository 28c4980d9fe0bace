//! Services module
//!
//! Lógica de dominio: codec de registros, borrador, identidad y captura
//! de imágenes.

pub mod identity_service;
pub mod image_capture;
pub mod image_payload;
pub mod record_codec;
pub mod record_draft;

pub use identity_service::{IdentityProvider, InitializationFailure, JwtIdentityProvider, SessionContext};
pub use record_codec::{RecordCodec, RecordError, RecordInput, SizeWarning, ValidatedRecord};
pub use record_draft::RecordDraft;
