//! Progress persistence error types.

use std::path::PathBuf;
use thiserror::Error;

/// Progress persistence errors
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Reading or writing the progress file failed
    #[error("Progress file {} I/O error: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored progress could not be encoded or decoded
    #[error("Progress serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store refused the operation
    #[error("Progress store unavailable: {0}")]
    Unavailable(String),
}

impl ProgressError {
    /// Message safe to show a player. File paths stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            ProgressError::Io { .. } => "Could not save your progress".to_string(),
            ProgressError::Serialization(_) => "Saved progress is unreadable".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for progress operations
pub type ProgressResult<T> = Result<T, ProgressError>;
