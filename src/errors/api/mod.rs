// API-facing error types
pub mod api_error;

// Re-exports for convenience
pub use api_error::{ApiError, ErrorResponse, FieldErrorDetail, RowErrorDetail, ValidationErrorResponse};
