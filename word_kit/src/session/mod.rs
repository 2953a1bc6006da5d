//! Session module running one game engine as an async actor.
//!
//! This module implements:
//! - SessionActor: owns a [`GameEngine`](crate::GameEngine) and its countdown
//! - SessionHandle: cloneable sender side with typed request helpers
//! - Message-based communication with tokio channels
//!
//! ## Architecture
//!
//! The actor runs in its own Tokio task. Commands arrive through an mpsc
//! inbox and countdown ticks come from an interval owned by the same task, so
//! both are applied to the engine one at a time. The interval is armed when a
//! round starts and dropped as soon as the round ends.
//!
//! ## Example
//!
//! ```
//! use word_kit::{GameEngine, SessionActor, SessionConfig, progress::MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = GameEngine::with_store(Box::new(MemoryStore::new()))?;
//!     let (actor, handle) = SessionActor::new(engine, SessionConfig::default())?;
//!     tokio::spawn(actor.run());
//!
//!     handle.start_level(0).await?;
//!     handle.guess_letter('c').await?;
//!     assert_eq!(handle.view().await?.masked_word, "C _ _");
//!
//!     handle.close().await?;
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod config;
pub mod messages;

pub use actor::{SessionActor, SessionError, SessionHandle};
pub use config::SessionConfig;
pub use messages::{SessionMessage, SessionResponse};
