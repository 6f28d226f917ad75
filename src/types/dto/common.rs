use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Plain acknowledgement
#[derive(Object, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Multipart body for every CSV upload endpoint
#[derive(Multipart)]
pub struct CsvUpload {
    /// CSV file with a header row
    pub file: Upload,
}
