//! Common error types for givtrack

use thiserror::Error;

/// Common result type for givtrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the QR-resolution pipeline
///
/// `NoCode` and `EmptyResult` are terminal "nothing found" states for the UI,
/// not faults. `Storage` never surfaces to the user (logged only).
#[derive(Error, Debug)]
pub enum Error {
    /// No code was supplied to the resolver (no network call made)
    #[error("No QR Code.")]
    NoCode,

    /// The backend returned zero records for a valid request
    #[error("No Contribution found against this QR code.")]
    EmptyResult,

    /// Non-2xx response or transport failure; carries the backend's message
    #[error("{0}")]
    Backend(String),

    /// A code mapped to more than one record under the `Reject` policy
    #[error("QR code matches {0} records")]
    MultiMatch(usize),

    /// Seen-set read/write failure (corrupt encoding, unavailable storage)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for outcomes the UI renders as an empty state rather than an error banner
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Error::NoCode | Error::EmptyResult)
    }
}
