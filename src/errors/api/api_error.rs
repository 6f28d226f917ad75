use crate::errors::internal::{
    FieldViolation, FitnessError, InternalError, RowViolation, SectionError, UserError,
    ValidationError,
};
use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

#[derive(Object, Debug, Clone, PartialEq)]
pub struct FieldErrorDetail {
    /// Request field (camelCase) the message refers to
    pub field: String,
    pub message: String,
}

#[derive(Object, Debug, Clone, PartialEq)]
pub struct RowErrorDetail {
    /// 1-based line number in the uploaded file
    pub line: u64,
    pub errors: Vec<FieldErrorDetail>,
}

/// 422 body listing every rejected field or CSV row
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ValidationErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    pub errors: Vec<FieldErrorDetail>,
    pub rows: Vec<RowErrorDetail>,
}

impl From<FieldViolation> for FieldErrorDetail {
    fn from(violation: FieldViolation) -> Self {
        Self {
            field: violation.field,
            message: violation.message,
        }
    }
}

impl From<RowViolation> for RowErrorDetail {
    fn from(row: RowViolation) -> Self {
        Self {
            line: row.line,
            errors: row.violations.into_iter().map(FieldErrorDetail::from).collect(),
        }
    }
}

/// Error responses shared by every endpoint
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Business rule violation
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Referenced entity does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Unique value already taken
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Malformed or missing request fields
    #[oai(status = 422)]
    ValidationFailed(Json<ValidationErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ApiError {
    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        ApiError::BadRequest(Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
            status_code: 400,
        }))
    }

    pub fn not_found(error: &str, message: impl Into<String>) -> Self {
        ApiError::NotFound(Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
            status_code: 404,
        }))
    }

    pub fn conflict(error: &str, message: impl Into<String>) -> Self {
        ApiError::Conflict(Json(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
            status_code: 409,
        }))
    }

    /// Create a 422 error listing field problems
    pub fn validation_failed(errors: Vec<FieldErrorDetail>) -> Self {
        ApiError::ValidationFailed(Json(ValidationErrorResponse {
            error: "validation_failed".to_string(),
            message: "Request validation failed".to_string(),
            status_code: 422,
            errors,
            rows: Vec::new(),
        }))
    }

    /// Create a 422 error listing rejected CSV rows
    pub fn invalid_csv_rows(rows: Vec<RowErrorDetail>) -> Self {
        ApiError::ValidationFailed(Json(ValidationErrorResponse {
            error: "invalid_csv_rows".to_string(),
            message: format!("{} CSV row(s) failed validation", rows.len()),
            status_code: 422,
            errors: Vec::new(),
            rows,
        }))
    }

    /// Create a 422 error for a request the framework could not parse
    pub fn malformed_request(message: impl Into<String>) -> Self {
        ApiError::ValidationFailed(Json(ValidationErrorResponse {
            error: "malformed_request".to_string(),
            message: message.into(),
            status_code: 422,
            errors: Vec::new(),
            rows: Vec::new(),
        }))
    }

    fn invalid_csv(message: String) -> Self {
        ApiError::ValidationFailed(Json(ValidationErrorResponse {
            error: "invalid_csv".to_string(),
            message,
            status_code: 422,
            errors: Vec::new(),
            rows: Vec::new(),
        }))
    }

    /// Convert InternalError to ApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Infrastructure details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match err {
            InternalError::Database(ref source) => {
                tracing::error!("Database error: {}", source);
                Self::internal_server_error()
            }
            InternalError::Crypto { ref operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }

            InternalError::Validation(ValidationError::Fields(violations)) => {
                Self::validation_failed(violations.into_iter().map(FieldErrorDetail::from).collect())
            }
            InternalError::Validation(ValidationError::Rows(rows)) => {
                Self::invalid_csv_rows(rows.into_iter().map(RowErrorDetail::from).collect())
            }
            InternalError::Csv(csv_error) => {
                tracing::debug!("Rejected CSV upload: {}", csv_error);
                Self::invalid_csv(csv_error.to_string())
            }

            InternalError::User(user_error) => {
                let message = user_error.to_string();
                match user_error {
                    UserError::NotFound { .. } => Self::not_found("user_not_found", message),
                    UserError::TeacherNotFound { .. } => Self::not_found("teacher_not_found", message),
                    UserError::StudentNotFound { .. } => Self::not_found("student_not_found", message),
                    UserError::EmailTaken { .. } | UserError::DuplicateEmails { .. } => {
                        Self::conflict("email_taken", message)
                    }
                    UserError::Rostered { .. } => Self::bad_request("student_rostered", message),
                }
            }

            InternalError::Section(section_error) => {
                let message = section_error.to_string();
                match section_error {
                    SectionError::NotFound { .. } => Self::not_found("section_not_found", message),
                    SectionError::DuplicateCode { .. } | SectionError::DuplicateCodes { .. } => {
                        Self::conflict("duplicate_section_code", message)
                    }
                    SectionError::HasRosteredStudents { .. } => {
                        Self::bad_request("section_has_rostered_students", message)
                    }
                    SectionError::Inactive { .. } => Self::bad_request("section_inactive", message),
                }
            }

            InternalError::Fitness(fitness_error) => {
                let message = fitness_error.to_string();
                match fitness_error {
                    FitnessError::AnthroNotFound { .. } => Self::not_found("anthro_not_found", message),
                    FitnessError::PerformanceTypeNotFound { .. } => {
                        Self::not_found("performance_type_not_found", message)
                    }
                    FitnessError::DuplicatePerformanceType { .. } => {
                        Self::conflict("duplicate_performance_type", message)
                    }
                    FitnessError::PerformanceTestNotFound { .. } => {
                        Self::not_found("performance_test_not_found", message)
                    }
                    FitnessError::PerformanceTestAlreadyAssigned { .. } => {
                        Self::conflict("performance_test_already_assigned", message)
                    }
                    FitnessError::PerformanceGradeNotFound { .. } => {
                        Self::not_found("performance_grade_not_found", message)
                    }
                }
            }
        }
    }

    /// Generic 500 without internal details
    fn internal_server_error() -> Self {
        ApiError::InternalError(Json(ErrorResponse {
            error: "internal_error".to_string(),
            message: "An internal error occurred".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json) => json.0.message.clone(),
            ApiError::ValidationFailed(json) => json.0.message.clone(),
        }
    }

    /// Get the HTTP status code from the error variant
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json) => json.0.status_code,
            ApiError::ValidationFailed(json) => json.0.status_code,
        }
    }

    /// Get the error code identifier
    pub fn error_code(&self) -> &str {
        match self {
            ApiError::BadRequest(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::InternalError(json) => &json.0.error,
            ApiError::ValidationFailed(json) => &json.0.error,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.error_code(), self.status_code(), self.message())
    }
}
