//! Progress store configuration.

use std::{env, path::PathBuf};

use super::store::JsonFileStore;

/// Default progress file, relative to the working directory
pub const DEFAULT_PROGRESS_PATH: &str = "word_kit_progress.json";

/// Where progress is kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the JSON progress file
    pub path: PathBuf,
}

impl StoreConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `WK_PROGRESS_PATH`: progress file path (default: `word_kit_progress.json`)
    pub fn from_env() -> Self {
        Self {
            path: env::var("WK_PROGRESS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROGRESS_PATH)),
        }
    }

    /// Default configuration for development
    pub fn development() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PROGRESS_PATH),
        }
    }

    /// Open the configured file store
    pub fn open(&self) -> JsonFileStore {
        JsonFileStore::new(&self.path)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::development()
    }
}
