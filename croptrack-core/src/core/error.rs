//! Error types for the Crop Tracker core library.

use thiserror::Error;

/// All errors that can occur within the Crop Tracker core library.
#[derive(Debug, Error)]
pub enum CropTrackError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record failed the write-boundary invariant checks.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The opened file is not a valid Crop Tracker store.
    #[error("Invalid store: {0}")]
    InvalidStore(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the CSV export failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The record collection could not be serialized to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`CropTrackError`].
pub type Result<T> = std::result::Result<T, CropTrackError>;

impl CropTrackError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::ValidationFailed(msg) => msg.clone(),
            Self::InvalidStore(_) => "Could not open data file".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Csv(e) => format!("Export error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}
