pub mod api_response;
pub mod record_dto;

pub use api_response::ApiResponse;
