//! Progress module providing the persistence boundary for level progress.
//!
//! This module implements:
//! - The persisted [`Progress`] record (unlocks, completions, hint budget)
//! - A synchronous [`ProgressStore`] trait with immediate durability
//! - A JSON file store using write-to-temp then rename
//! - An in-memory store for tests and embedding
//!
//! ## Example
//!
//! ```no_run
//! use word_kit::progress::{ProgressStore, StoreConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = StoreConfig::from_env().open();
//!     let progress = store.load()?.unwrap_or_default();
//!     println!("Levels unlocked up to {}", progress.max_unlocked_level + 1);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod models;
pub mod store;

pub use config::StoreConfig;
pub use errors::{ProgressError, ProgressResult};
pub use models::Progress;
pub use store::{JsonFileStore, MemoryStore, ProgressStore};
