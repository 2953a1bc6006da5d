//! Game engine: round rules, countdown bookkeeping, and progression.
//!
//! Invalid commands (unknown level, guesses after a round ended, hints that
//! aren't available) are silent no-ops. Only persistence failures surface as
//! errors, from the command whose write failed.

use chrono::Utc;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use thiserror::Error;

use super::{
    catalog::Catalog,
    constants::{
        ALPHABET, HINT_PENALTY_SECS, MASK_GLYPH, MAX_ATTEMPTS, MAX_HINTS, MAX_PENDING_EVENTS,
    },
    entities::{
        Difficulty, GameEvent, Letter, LevelDefinition, LevelId, LevelStatus, Outcome, RoundId,
        RoundView,
    },
};
use crate::progress::{Progress, ProgressError, ProgressResult, ProgressStore};

#[derive(Debug, Eq, Error, PartialEq)]
pub enum SettingsError {
    #[error("max attempts must be at least 1")]
    NoAttempts,
    #[error("hint penalty of {0}s exceeds every time limit")]
    PenaltyTooLarge(u32),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Rule parameters
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSettings {
    pub max_attempts: u32,
    pub hint_penalty_secs: u32,
    pub max_hints: u32,
    /// Difficulty for the first round. Changeable later with
    /// [`GameEngine::set_difficulty`].
    pub difficulty: Difficulty,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, HINT_PENALTY_SECS, MAX_HINTS, Difficulty::Medium)
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(
        max_attempts: u32,
        hint_penalty_secs: u32,
        max_hints: u32,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            max_attempts,
            hint_penalty_secs,
            max_hints,
            difficulty,
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_attempts == 0 {
            return Err(SettingsError::NoAttempts);
        }

        let longest = Difficulty::ALL
            .iter()
            .map(|d| d.time_limit_secs())
            .max()
            .unwrap_or_default();
        if self.hint_penalty_secs > longest {
            return Err(SettingsError::PenaltyTooLarge(self.hint_penalty_secs));
        }

        Ok(())
    }
}

/// One attempt at a level, from start to a terminal outcome.
#[derive(Clone, Debug)]
pub struct Round {
    id: RoundId,
    level: LevelId,
    word: &'static str,
    hint: &'static str,
    guessed: BTreeSet<Letter>,
    incorrect_attempts: u32,
    outcome: Outcome,
    time_remaining_secs: u32,
    hint_used: bool,
    hints_remaining: u32,
    is_level_completed: bool,
    timer_active: bool,
}

impl Round {
    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn level(&self) -> LevelId {
        self.level
    }

    pub fn word(&self) -> &'static str {
        self.word
    }

    pub fn hint(&self) -> &'static str {
        self.hint
    }

    pub fn guessed_letters(&self) -> &BTreeSet<Letter> {
        &self.guessed
    }

    pub fn incorrect_attempts(&self) -> u32 {
        self.incorrect_attempts
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    pub fn is_level_completed(&self) -> bool {
        self.is_level_completed
    }

    pub fn timer_active(&self) -> bool {
        self.timer_active
    }

    fn is_revealed(&self, c: char) -> bool {
        Letter::new(c).is_some_and(|letter| self.guessed.contains(&letter))
    }

    pub fn is_word_complete(&self) -> bool {
        self.word.chars().all(|c| self.is_revealed(c))
    }

    /// The word with unguessed letters masked, e.g. `"C _ _"`.
    pub fn masked_word(&self) -> String {
        let mut masked = String::with_capacity(self.word.len() * 2);
        for (i, c) in self.word.chars().enumerate() {
            if i > 0 {
                masked.push(' ');
            }
            masked.push(if self.is_revealed(c) { c } else { MASK_GLYPH });
        }
        masked
    }

    /// Alphabet minus the letters already guessed.
    pub fn remaining_letters(&self) -> Vec<Letter> {
        ALPHABET
            .chars()
            .filter_map(Letter::new)
            .filter(|letter| !self.guessed.contains(letter))
            .collect()
    }

    /// Ends the round. The countdown stops with it.
    fn finish(&mut self, outcome: Outcome) {
        self.timer_active = false;
        self.outcome = outcome;
    }
}

/// Pending events, oldest first. Past [`MAX_PENDING_EVENTS`] the oldest
/// event is dropped for each new one.
#[derive(Debug, Default)]
struct EventQueue(VecDeque<GameEvent>);

impl EventQueue {
    fn push(&mut self, event: GameEvent) {
        if self.0.len() >= MAX_PENDING_EVENTS {
            self.0.pop_front();
        }
        self.0.push_back(event);
    }

    fn take(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.0)
    }
}

/// The word game engine.
///
/// Owns the catalog, the current round, and the in-memory mirror of saved
/// progress. Progress is written back through the store on every change.
pub struct GameEngine {
    catalog: Catalog,
    settings: GameSettings,
    difficulty: Difficulty,
    progress: Progress,
    store: Box<dyn ProgressStore>,
    round: Option<Round>,
    last_round_id: RoundId,
    /// Pending state changes for the presentation layer.
    events: EventQueue,
}

impl GameEngine {
    /// Create an engine, loading saved progress from `store`.
    pub fn new(
        catalog: Catalog,
        settings: GameSettings,
        store: Box<dyn ProgressStore>,
    ) -> Result<Self, EngineError> {
        settings.validate()?;

        let progress = match store.load()? {
            Some(progress) => {
                info!(
                    "Loaded progress: {} level(s) completed, up to level {} unlocked, {} hint(s)",
                    progress.completed_levels.len(),
                    progress.max_unlocked_level + 1,
                    progress.hints_remaining
                );
                progress
            }
            None => Progress::new(settings.max_hints),
        };

        Ok(Self {
            catalog,
            difficulty: settings.difficulty,
            settings,
            progress,
            store,
            round: None,
            last_round_id: 0,
            events: EventQueue::default(),
        })
    }

    /// Engine over the standard catalog with default settings.
    pub fn with_store(store: Box<dyn ProgressStore>) -> Result<Self, EngineError> {
        Self::new(Catalog::standard(), GameSettings::default(), store)
    }

    /// Start (or restart) `level`. Unknown levels are ignored.
    ///
    /// Any countdown from an earlier round is dead from here on: ticks are
    /// tagged with their round id and the new round gets a fresh one.
    pub fn start_level(&mut self, level: LevelId) {
        let Some(definition) = self.catalog.get(level).copied() else {
            debug!("Ignoring start of unknown level {level}");
            return;
        };

        self.last_round_id += 1;
        self.round = Some(Round {
            id: self.last_round_id,
            level,
            word: definition.word,
            hint: definition.hint,
            guessed: BTreeSet::new(),
            incorrect_attempts: 0,
            outcome: Outcome::Playing,
            time_remaining_secs: self.difficulty.time_limit_secs(),
            hint_used: false,
            hints_remaining: self.progress.hints_remaining,
            is_level_completed: self.progress.is_completed(level),
            timer_active: true,
        });

        self.events.push(GameEvent::RoundStarted {
            level,
            difficulty: self.difficulty,
        });
        debug!(
            "Round {} started on level {} ({})",
            self.last_round_id, level, self.difficulty
        );
    }

    /// Start the level after the current one, if there is one.
    pub fn start_next_level(&mut self) {
        match self.round.as_ref().map(|round| round.level + 1) {
            Some(next) if next < self.catalog.len() => self.start_level(next),
            Some(next) => debug!("No level {next} to advance to"),
            None => debug!("Ignoring next level: no round started"),
        }
    }

    /// Start the current level over.
    pub fn restart_level(&mut self) {
        if let Some(level) = self.current_level() {
            self.start_level(level);
        }
    }

    /// Guess a letter, case-insensitively.
    ///
    /// Ignored when no round is being played, for non-letters, and for
    /// letters already guessed.
    ///
    /// # Errors
    ///
    /// Returns an error if the guess won the level and saving progress
    /// failed. The win itself still stands in memory.
    pub fn guess_letter(&mut self, letter: char) -> ProgressResult<()> {
        let Some(letter) = Letter::new(letter) else {
            debug!("Ignoring non-letter guess {letter:?}");
            return Ok(());
        };

        let Some(round) = self
            .round
            .as_mut()
            .filter(|round| round.outcome == Outcome::Playing)
        else {
            debug!("Ignoring guess {letter}: no round in play");
            return Ok(());
        };

        if !round.guessed.insert(letter) {
            return Ok(());
        }

        if !round.word.contains(letter.as_char()) {
            round.incorrect_attempts += 1;
            self.events.push(GameEvent::LetterMissed {
                letter,
                attempts: round.incorrect_attempts,
            });

            if round.incorrect_attempts >= self.settings.max_attempts {
                round.finish(Outcome::Lost);
                self.events.push(GameEvent::RoundLost(round.level));
                info!("Level {} lost on word {}", round.level + 1, round.word);
            }
            return Ok(());
        }

        self.events.push(GameEvent::LetterRevealed(letter));
        if !round.is_word_complete() {
            return Ok(());
        }

        round.finish(Outcome::Won);
        self.events.push(GameEvent::RoundWon(round.level));
        info!(
            "Level {} won with {} miss(es) and {}s left",
            round.level + 1,
            round.incorrect_attempts,
            round.time_remaining_secs
        );
        self.complete_current_level()
    }

    fn complete_current_level(&mut self) -> ProgressResult<()> {
        let Some(round) = self.round.as_mut() else {
            return Ok(());
        };

        let level = round.level;
        round.is_level_completed = true;
        self.progress.completed_levels.insert(level);

        if level >= self.progress.max_unlocked_level {
            self.progress.max_unlocked_level = level + 1;
            if level + 1 < self.catalog.len() {
                self.events.push(GameEvent::LevelUnlocked(level + 1));
            }
        }

        self.persist()
    }

    /// Spend a hint: costs the hint penalty off the clock, once per round.
    ///
    /// # Errors
    ///
    /// Returns an error if the reduced hint budget could not be saved.
    pub fn use_hint(&mut self) -> ProgressResult<()> {
        let Some(round) = self.round.as_mut().filter(|round| {
            round.outcome == Outcome::Playing && !round.hint_used && round.hints_remaining > 0
        }) else {
            debug!("Ignoring hint request: not available");
            return Ok(());
        };

        round.hint_used = true;
        round.hints_remaining -= 1;
        round.time_remaining_secs = round
            .time_remaining_secs
            .saturating_sub(self.settings.hint_penalty_secs);
        self.progress.hints_remaining = round.hints_remaining;
        self.events.push(GameEvent::HintUsed {
            hints_remaining: round.hints_remaining,
        });

        if round.time_remaining_secs == 0 {
            round.finish(Outcome::TimedOut);
            self.events.push(GameEvent::RoundTimedOut(round.level));
            info!("Level {} timed out by hint penalty", round.level + 1);
        }

        self.persist()
    }

    /// Fill the hint budget back up.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget could not be saved.
    pub fn reset_hints(&mut self) -> ProgressResult<()> {
        let hints = self.settings.max_hints;
        self.progress.hints_remaining = hints;
        if let Some(round) = self.round.as_mut() {
            round.hints_remaining = hints;
        }

        self.events.push(GameEvent::HintsRestored(hints));
        self.persist()
    }

    /// Lock every level but the first and forget completions. The hint
    /// budget is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset could not be saved.
    pub fn reset_progress(&mut self) -> ProgressResult<()> {
        self.progress.max_unlocked_level = 0;
        self.progress.completed_levels.clear();

        self.events.push(GameEvent::ProgressReset);
        info!("Progress reset");
        self.persist()
    }

    /// Difficulty for rounds started from now on.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty != difficulty {
            self.difficulty = difficulty;
            self.events.push(GameEvent::DifficultyChanged(difficulty));
        }
    }

    /// One second of countdown for round `round_id`.
    ///
    /// Ticks for any round but the current one, or after the countdown
    /// stopped, are ignored. A tick at zero ends the round as timed out.
    pub fn tick(&mut self, round_id: RoundId) {
        let Some(round) = self.round.as_mut().filter(|round| {
            round.id == round_id && round.timer_active && round.outcome == Outcome::Playing
        }) else {
            debug!("Ignoring stale tick for round {round_id}");
            return;
        };

        if round.time_remaining_secs > 0 {
            round.time_remaining_secs -= 1;
        } else {
            round.finish(Outcome::TimedOut);
            self.events.push(GameEvent::RoundTimedOut(round.level));
            info!("Level {} timed out", round.level + 1);
        }
    }

    /// Round whose countdown should be running, if any.
    pub fn countdown(&self) -> Option<RoundId> {
        self.round
            .as_ref()
            .filter(|round| round.timer_active)
            .map(|round| round.id)
    }

    fn persist(&mut self) -> ProgressResult<()> {
        self.progress.updated_at = Some(Utc::now());
        self.store
            .save(&self.progress)
            .inspect_err(|e| error!("Failed to save progress: {e}"))
    }

    /// Take the pending events. Callers that want every event should drain
    /// after each command; only the latest [`MAX_PENDING_EVENTS`] are kept.
    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        self.events.take()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn levels(&self) -> &[LevelDefinition] {
        self.catalog.levels()
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn current_level(&self) -> Option<LevelId> {
        self.round.as_ref().map(Round::level)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.round.as_ref().map(Round::outcome)
    }

    pub fn incorrect_attempts(&self) -> u32 {
        self.round.as_ref().map_or(0, Round::incorrect_attempts)
    }

    pub fn max_attempts(&self) -> u32 {
        self.settings.max_attempts
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.round.as_ref().map_or(0, Round::time_remaining_secs)
    }

    pub fn hints_remaining(&self) -> u32 {
        self.progress.hints_remaining
    }

    pub fn masked_word(&self) -> String {
        self.round.as_ref().map(Round::masked_word).unwrap_or_default()
    }

    pub fn remaining_letters(&self) -> Vec<Letter> {
        match &self.round {
            Some(round) => round.remaining_letters(),
            None => ALPHABET.chars().filter_map(Letter::new).collect(),
        }
    }

    pub fn is_level_unlocked(&self, level: LevelId) -> bool {
        self.progress.is_unlocked(level)
    }

    pub fn is_level_passed(&self, level: LevelId) -> bool {
        self.progress.is_completed(level)
    }

    /// Level to open when the player hits "play": the furthest unlocked one.
    pub fn resume_level(&self) -> LevelId {
        self.progress
            .max_unlocked_level
            .min(self.catalog.len().saturating_sub(1))
    }

    pub fn level_statuses(&self) -> Vec<LevelStatus> {
        self.catalog
            .iter()
            .map(|level| LevelStatus {
                id: level.id,
                unlocked: self.is_level_unlocked(level.id),
                passed: self.is_level_passed(level.id),
            })
            .collect()
    }

    #[must_use]
    pub fn view(&self) -> RoundView {
        let round = self.round.as_ref();
        RoundView {
            level: round.map(Round::level),
            level_count: self.catalog.len(),
            masked_word: self.masked_word(),
            remaining_letters: self.remaining_letters(),
            hint: round.map(Round::hint),
            incorrect_attempts: self.incorrect_attempts(),
            max_attempts: self.settings.max_attempts,
            time_remaining_secs: self.time_remaining_secs(),
            hints_remaining: self.progress.hints_remaining,
            hint_used: round.is_some_and(Round::hint_used),
            outcome: round.map(Round::outcome),
            difficulty: self.difficulty,
            timer_active: round.is_some_and(Round::timer_active),
            is_level_completed: round.is_some_and(Round::is_level_completed),
        }
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("difficulty", &self.difficulty)
            .field("progress", &self.progress)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}
