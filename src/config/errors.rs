use std::fmt;

#[derive(Debug)]
pub enum ApplicationError {
    DatabaseConnection(String),
    InvalidSetting { setting_name: String, reason: String },
    ParseError { setting_name: String, error: String },
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DatabaseConnection(msg) => {
                write!(f, "Database connection error: {}", msg)
            }
            Self::InvalidSetting { setting_name, reason } => {
                write!(f, "Invalid setting '{}': {}", setting_name, reason)
            }
            Self::ParseError { setting_name, error } => {
                write!(f, "Failed to parse setting '{}': {}", setting_name, error)
            }
        }
    }
}

impl std::error::Error for ApplicationError {}
