//! Word game engine - catalog, round rules, and progression.
//!
//! This module provides:
//! - A fixed catalog of levels, each bound to a word and a hint
//! - Round state with a four-way outcome (playing, won, lost, timed out)
//! - Countdown bookkeeping guarded by a round generation counter
//! - Level unlock/completion tracking and the hint budget

pub mod catalog;
pub mod constants;
pub mod engine;
pub mod entities;

pub use catalog::{Catalog, CatalogError};
pub use engine::{EngineError, GameEngine, GameSettings, Round, SettingsError};
