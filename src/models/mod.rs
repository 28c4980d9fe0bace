//! Modelos del sistema

pub mod vehicle_record;

pub use vehicle_record::{RecordKey, StoredRecord, VehicleRecord};
