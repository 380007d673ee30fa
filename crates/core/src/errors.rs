//! Core error types for the AssetPlan engine.
//!
//! Every fallible operation in the crate returns [`Result`]. Operations fail
//! before touching the ledger, so an `Err` never leaves partial effects behind.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A batch import was rejected. `row` is the 1-based row of the source
    /// document (CSV line or JSON array element); 0 addresses the document
    /// as a whole.
    #[error("Import failed at row {row}: {reason}")]
    Import { row: usize, reason: String },

    #[error("Invalid simulation input: {0}")]
    InvalidInput(String),

    #[error("Ledger has no valuation to allocate")]
    EmptyLedger,

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn import(row: usize, reason: impl Into<String>) -> Self {
        Error::Import {
            row,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }
}

/// Validation errors for single-field user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Valuation must be 0 or greater, got {0}")]
    NegativeValuation(i64),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid target allocation: {0}")]
    InvalidTarget(String),
}

// === From implementations for common error types ===

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
