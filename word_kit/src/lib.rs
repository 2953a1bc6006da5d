//! # Word Kit
//!
//! A word-guessing (hangman-style) game engine with level progression.
//!
//! The engine owns the rules of play: a fixed catalog of levels, letter
//! guesses, attempt and countdown accounting, a persisted hint budget, and
//! persisted level unlock/completion progress.
//!
//! ## Core Modules
//!
//! - [`game`]: Level catalog, round state machine, and the [`GameEngine`]
//! - [`progress`]: Persistence boundary for unlock/completion/hint progress
//! - [`session`]: Async actor that drives one engine and its countdown
//!
//! ## Example
//!
//! ```
//! use word_kit::{GameEngine, Outcome, progress::MemoryStore};
//!
//! let mut engine = GameEngine::with_store(Box::new(MemoryStore::new())).unwrap();
//! engine.start_level(0);
//! for letter in ['c', 'a', 't'] {
//!     engine.guess_letter(letter).unwrap();
//! }
//! assert_eq!(engine.outcome(), Some(Outcome::Won));
//! assert!(engine.is_level_unlocked(1));
//! ```

/// Level catalog, round rules, and the game engine.
pub mod game;
pub use game::{
    Catalog, EngineError, GameEngine, GameSettings, Round, SettingsError,
    constants,
    entities::{
        self, Difficulty, GameEvent, Letter, LevelDefinition, LevelId, LevelStatus, Outcome,
        RoundId, RoundView,
    },
};

/// Progress persistence.
pub mod progress;
pub use progress::{Progress, ProgressError, ProgressResult, ProgressStore};

/// Single-owner async session driving the countdown.
pub mod session;
pub use session::{SessionActor, SessionConfig, SessionHandle};
