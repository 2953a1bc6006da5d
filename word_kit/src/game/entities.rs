use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Index of a level in the catalog.
pub type LevelId = usize;

/// Generation counter for rounds. Every level start gets a new one, and
/// countdown ticks carry the id of the round they were armed for.
pub type RoundId = u64;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum LetterError {
    #[error("'{0}' is not a letter")]
    NotALetter(char),
}

/// A single uppercase ASCII letter.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Letter(char);

impl Letter {
    /// Normalizes to uppercase. Anything outside `a-z`/`A-Z` is rejected.
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_alphabetic().then(|| Self(c.to_ascii_uppercase()))
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<char> for Letter {
    type Error = LetterError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(LetterError::NotALetter(value))
    }
}

/// A playable level: a word to guess and a clue shown to the player.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct LevelDefinition {
    pub id: LevelId,
    pub word: &'static str,
    pub hint: &'static str,
}

impl LevelDefinition {
    pub const fn new(id: LevelId, word: &'static str, hint: &'static str) -> Self {
        Self { id, word, hint }
    }
}

/// Difficulty presets. Only the countdown length is used by the rules.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Seconds on the countdown when a round starts.
    pub const fn time_limit_secs(self) -> u32 {
        match self {
            Self::Easy => 60,
            Self::Medium => 40,
            Self::Hard => 25,
        }
    }

    /// Longest word this preset is meant for. Informational only; the
    /// catalog decides which word a level uses.
    pub const fn max_word_length(self) -> usize {
        match self {
            Self::Easy => 4,
            Self::Medium => 6,
            Self::Hard => 8,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown difficulty '{0}' (expected easy, medium, or hard)")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Where a round stands. Everything but `Playing` is terminal.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Playing,
    Won,
    Lost,
    TimedOut,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Self::Playing
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::TimedOut => "timed out",
        };
        write!(f, "{repr}")
    }
}

/// State changes a presentation layer may react to (sounds, haptics,
/// review prompts). Drained from the engine after each command.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameEvent {
    RoundStarted {
        level: LevelId,
        difficulty: Difficulty,
    },
    LetterRevealed(Letter),
    LetterMissed {
        letter: Letter,
        attempts: u32,
    },
    RoundWon(LevelId),
    RoundLost(LevelId),
    RoundTimedOut(LevelId),
    HintUsed {
        hints_remaining: u32,
    },
    LevelUnlocked(LevelId),
    ProgressReset,
    HintsRestored(u32),
    DifficultyChanged(Difficulty),
}

impl GameEvent {
    /// Whether this event finishes the round in play.
    pub fn ends_round(&self) -> bool {
        matches!(
            self,
            Self::RoundWon(_) | Self::RoundLost(_) | Self::RoundTimedOut(_)
        )
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::RoundStarted { level, difficulty } => {
                format!("level {} started on {difficulty}", level + 1)
            }
            Self::LetterRevealed(letter) => format!("{letter} is in the word"),
            Self::LetterMissed { letter, attempts } => {
                format!("{letter} is not in the word ({attempts} wrong)")
            }
            Self::RoundWon(level) => format!("level {} solved", level + 1),
            Self::RoundLost(level) => format!("level {} lost", level + 1),
            Self::RoundTimedOut(level) => format!("level {} ran out of time", level + 1),
            Self::HintUsed { hints_remaining } => {
                format!("hint used, {hints_remaining} left")
            }
            Self::LevelUnlocked(level) => format!("level {} unlocked", level + 1),
            Self::ProgressReset => "progress reset".to_string(),
            Self::HintsRestored(hints) => format!("hints restored to {hints}"),
            Self::DifficultyChanged(difficulty) => format!("difficulty set to {difficulty}"),
        };
        write!(f, "{repr}")
    }
}

/// Lock/pass state of one level, for level selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct LevelStatus {
    pub id: LevelId,
    pub unlocked: bool,
    pub passed: bool,
}

/// Plain snapshot of everything a presentation layer shows for a round.
///
/// `level`, `hint` and `outcome` are `None` until the first level is started.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundView {
    pub level: Option<LevelId>,
    pub level_count: usize,
    pub masked_word: String,
    pub remaining_letters: Vec<Letter>,
    pub hint: Option<&'static str>,
    pub incorrect_attempts: u32,
    pub max_attempts: u32,
    pub time_remaining_secs: u32,
    pub hints_remaining: u32,
    pub hint_used: bool,
    pub outcome: Option<Outcome>,
    pub difficulty: Difficulty,
    pub timer_active: bool,
    pub is_level_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_normalizes_case() {
        assert_eq!(Letter::new('q'), Letter::new('Q'));
        assert_eq!(Letter::new('q').map(Letter::as_char), Some('Q'));
    }

    #[test]
    fn test_letter_rejects_non_letters() {
        for c in ['1', ' ', '-', 'é', '\n'] {
            assert_eq!(Letter::new(c), None, "{c:?} should be rejected");
        }
        assert_eq!(Letter::try_from('7'), Err(LetterError::NotALetter('7')));
    }

    #[test]
    fn test_difficulty_time_limits() {
        assert_eq!(Difficulty::Easy.time_limit_secs(), 60);
        assert_eq!(Difficulty::Medium.time_limit_secs(), 40);
        assert_eq!(Difficulty::Hard.time_limit_secs(), 25);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_difficulty_parse_and_display() {
        for difficulty in Difficulty::ALL {
            let parsed: Difficulty = difficulty.to_string().parse().unwrap();
            assert_eq!(parsed, difficulty);
        }
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_outcome_terminal() {
        assert!(!Outcome::Playing.is_terminal());
        assert!(Outcome::Won.is_terminal());
        assert!(Outcome::Lost.is_terminal());
        assert!(Outcome::TimedOut.is_terminal());
    }

    #[test]
    fn test_event_ends_round() {
        assert!(GameEvent::RoundWon(3).ends_round());
        assert!(GameEvent::RoundLost(3).ends_round());
        assert!(GameEvent::RoundTimedOut(3).ends_round());
        assert!(!GameEvent::LevelUnlocked(4).ends_round());
        assert!(
            !GameEvent::RoundStarted {
                level: 3,
                difficulty: Difficulty::Hard
            }
            .ends_round()
        );
    }

    #[test]
    fn test_event_display_uses_one_based_levels() {
        assert_eq!(GameEvent::RoundWon(0).to_string(), "level 1 solved");
        assert_eq!(
            GameEvent::LetterMissed {
                letter: Letter::new('z').unwrap(),
                attempts: 2
            }
            .to_string(),
            "Z is not in the word (2 wrong)"
        );
    }
}
