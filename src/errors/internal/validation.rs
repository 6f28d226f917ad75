use thiserror::Error;

/// One rejected field with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Every violation found on one CSV line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowViolation {
    pub line: u64,
    pub violations: Vec<FieldViolation>,
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Validation failed for {} field(s)", .0.len())]
    Fields(Vec<FieldViolation>),

    #[error("Validation failed for {} CSV row(s)", .0.len())]
    Rows(Vec<RowViolation>),
}
