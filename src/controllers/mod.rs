pub mod record_controller;
pub mod session_controller;
