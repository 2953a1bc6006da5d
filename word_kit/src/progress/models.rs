//! Persisted progress record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::game::{constants::MAX_HINTS, entities::LevelId};

/// Level progress and hint budget, carried across sessions.
///
/// Completed levels serialize as a JSON array of ids. Missing fields fall
/// back to a fresh player's values.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Progress {
    /// Highest level id the player may start
    pub max_unlocked_level: LevelId,

    /// Levels won at least once
    pub completed_levels: BTreeSet<LevelId>,

    /// Hints left in the budget
    pub hints_remaining: u32,

    /// Last time this record was written
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(MAX_HINTS)
    }
}

impl Progress {
    /// Progress for a new player with a full hint budget of `hints`.
    pub fn new(hints: u32) -> Self {
        Self {
            max_unlocked_level: 0,
            completed_levels: BTreeSet::new(),
            hints_remaining: hints,
            updated_at: None,
        }
    }

    pub fn is_unlocked(&self, level: LevelId) -> bool {
        level <= self.max_unlocked_level
    }

    pub fn is_completed(&self, level: LevelId) -> bool {
        self.completed_levels.contains(&level)
    }
}
