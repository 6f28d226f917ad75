use thiserror::Error;

pub mod csv;
pub mod database;
pub mod fitness;
pub mod section;
pub mod user;
pub mod validation;

pub use csv::CsvError;
pub use database::DatabaseError;
pub use fitness::FitnessError;
pub use section::SectionError;
pub use user::UserError;
pub use validation::{FieldViolation, RowViolation, ValidationError};

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors are shared; domain errors live in their own enums.
/// Never exposed via API - endpoints convert through `ApiError::from_internal_error`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Section(#[from] SectionError),

    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error(transparent)]
    Fitness(#[from] FitnessError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> InternalError {
        InternalError::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
