//! Session actor message types.

use crate::game::entities::{Difficulty, GameEvent, LevelId, LevelStatus, RoundView};
use tokio::sync::oneshot;

/// Messages that can be sent to a SessionActor
#[derive(Debug)]
pub enum SessionMessage {
    /// Start (or restart) a level
    StartLevel {
        level: LevelId,
        response: oneshot::Sender<SessionResponse>,
    },

    /// Advance to the level after the current one
    StartNextLevel {
        response: oneshot::Sender<SessionResponse>,
    },

    /// Play the current level again
    RestartLevel {
        response: oneshot::Sender<SessionResponse>,
    },

    /// Guess one letter
    GuessLetter {
        letter: char,
        response: oneshot::Sender<SessionResponse>,
    },

    /// Spend a hint on the current round
    UseHint {
        response: oneshot::Sender<SessionResponse>,
    },

    /// Lock everything but the first level again
    ResetProgress {
        response: oneshot::Sender<SessionResponse>,
    },

    /// Refill the hint budget
    ResetHints {
        response: oneshot::Sender<SessionResponse>,
    },

    /// Difficulty for the next round
    SetDifficulty {
        difficulty: Difficulty,
        response: oneshot::Sender<SessionResponse>,
    },

    /// Snapshot of the current round
    GetView {
        response: oneshot::Sender<RoundView>,
    },

    /// Lock/pass state of every level
    GetLevels {
        response: oneshot::Sender<Vec<LevelStatus>>,
    },

    /// Take the pending game events
    DrainEvents {
        response: oneshot::Sender<Vec<GameEvent>>,
    },

    /// Stop the actor
    Close {
        response: oneshot::Sender<SessionResponse>,
    },
}

/// Response from session commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResponse {
    /// Command applied
    Success,

    /// Command applied in memory, but something went wrong (e.g. saving)
    Error(String),
}

impl SessionResponse {
    /// Check if response is success
    pub fn is_success(&self) -> bool {
        matches!(self, SessionResponse::Success)
    }

    /// Get error message if response is error
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SessionResponse::Error(msg) => Some(msg),
            SessionResponse::Success => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_helpers() {
        assert!(SessionResponse::Success.is_success());
        assert_eq!(SessionResponse::Success.error_message(), None);

        let err = SessionResponse::Error("disk full".to_string());
        assert!(!err.is_success());
        assert_eq!(err.error_message(), Some("disk full"));
    }
}
