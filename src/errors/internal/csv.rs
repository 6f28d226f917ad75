use thiserror::Error;

/// Structural CSV failures that abort the whole ingestion
#[derive(Error, Debug)]
pub enum CsvError {
    #[error("CSV is missing required column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("CSV file is empty")]
    Empty,

    #[error("CSV could not be read: {message}")]
    Unreadable { message: String },
}
