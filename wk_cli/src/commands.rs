use std::fmt;
use word_kit::{Difficulty, LevelId};

/// Commands typed at the game prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a level by its zero-based index.
    Start(LevelId),
    /// Start the furthest unlocked level.
    Play,
    Next,
    Retry,
    Guess(char),
    Hint,
    Levels,
    Status,
    ResetProgress,
    ResetHints,
    Difficulty(Difficulty),
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Level number missing, not a number, or zero.
    InvalidLevel(String),
    /// Guess was not a single letter.
    InvalidGuess(String),
    /// Unknown difficulty name.
    InvalidDifficulty(String),
    /// Reset without saying what to reset.
    InvalidReset,
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLevel(value) => write!(
                f,
                "Invalid level '{}'. Levels are numbered from 1 (e.g., 'start 3')",
                value
            ),
            Self::InvalidGuess(value) => write!(
                f,
                "Invalid guess '{}'. Guess a single letter (e.g., 'guess e' or just 'e')",
                value
            ),
            Self::InvalidDifficulty(value) => write!(
                f,
                "Unknown difficulty '{}'. Use easy, medium, or hard",
                value
            ),
            Self::InvalidReset => write!(f, "Use 'reset progress' or 'reset hints'"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a line of input into a [`Command`].
///
/// A single letter on its own is a guess. Level numbers are one-based, as
/// shown to the player.
///
/// # Examples
///
/// ```
/// use wk_cli::commands::{Command, parse_command};
/// use word_kit::Difficulty;
///
/// assert_eq!(parse_command("e"), Ok(Command::Guess('e')));
/// assert_eq!(parse_command("start 3"), Ok(Command::Start(2)));
/// assert_eq!(parse_command("difficulty hard"), Ok(Command::Difficulty(Difficulty::Hard)));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let lowered = trimmed.to_ascii_lowercase();

    // Try single-word commands first
    match lowered.as_str() {
        "play" => return Ok(Command::Play),
        "next" => return Ok(Command::Next),
        "retry" | "restart" => return Ok(Command::Retry),
        "hint" => return Ok(Command::Hint),
        "levels" => return Ok(Command::Levels),
        "status" | "" => return Ok(Command::Status),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return parse_letter(c, trimmed);
    }

    // Parse multi-word commands
    let parts: Vec<&str> = lowered.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"start") => parse_start_command(&parts),
        Some(&"guess") => parse_guess_command(&parts),
        Some(&"difficulty") => parse_difficulty_command(&parts),
        Some(&"reset") => parse_reset_command(&parts),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

fn parse_letter(c: char, raw: &str) -> Result<Command, ParseError> {
    if c.is_ascii_alphabetic() {
        Ok(Command::Guess(c))
    } else {
        Err(ParseError::InvalidGuess(raw.to_string()))
    }
}

/// Parse a start command: "start N" with N one-based
fn parse_start_command(parts: &[&str]) -> Result<Command, ParseError> {
    let value = parts.get(1).copied().unwrap_or_default();
    match value.parse::<LevelId>() {
        Ok(n) if n > 0 => Ok(Command::Start(n - 1)),
        _ => Err(ParseError::InvalidLevel(value.to_string())),
    }
}

/// Parse a guess command: "guess X"
fn parse_guess_command(parts: &[&str]) -> Result<Command, ParseError> {
    let value = parts.get(1).copied().unwrap_or_default();
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => parse_letter(c, value),
        _ => Err(ParseError::InvalidGuess(value.to_string())),
    }
}

/// Parse a difficulty command: "difficulty easy|medium|hard"
fn parse_difficulty_command(parts: &[&str]) -> Result<Command, ParseError> {
    let value = parts.get(1).copied().unwrap_or_default();
    value
        .parse()
        .map(Command::Difficulty)
        .map_err(|_| ParseError::InvalidDifficulty(value.to_string()))
}

/// Parse a reset command: "reset progress" or "reset hints"
fn parse_reset_command(parts: &[&str]) -> Result<Command, ParseError> {
    match parts.get(1) {
        Some(&"progress") => Ok(Command::ResetProgress),
        Some(&"hints") => Ok(Command::ResetHints),
        _ => Err(ParseError::InvalidReset),
    }
}
