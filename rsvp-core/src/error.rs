//! Error types for rsvp operations.

use thiserror::Error;

/// Errors that can occur in rsvp operations.
#[derive(Error, Debug)]
pub enum RsvpError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("CSV export error: {0}")]
    CsvExport(String),

    #[error("Report export error: {0}")]
    ReportExport(String),

    #[error("ICS export error: {0}")]
    IcsExport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RsvpError {
    fn from(err: serde_json::Error) -> Self {
        RsvpError::Serialization(err.to_string())
    }
}

/// Result type alias for rsvp operations.
pub type RsvpResult<T> = Result<T, RsvpError>;
