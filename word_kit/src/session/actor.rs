//! Session actor implementation with async message handling.

use super::{
    config::SessionConfig,
    messages::{SessionMessage, SessionResponse},
};
use crate::{
    game::{
        GameEngine,
        entities::{Difficulty, GameEvent, LevelId, LevelStatus, RoundId, RoundView},
    },
    progress::ProgressResult,
};
use log::{debug, info, warn};
use thiserror::Error;
use tokio::{
    sync::{mpsc, oneshot},
    time::{Instant, Interval, interval_at},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session is closed")]
    Closed,
    #[error("{0}")]
    Failed(String),
    #[error("invalid session config: {0}")]
    InvalidConfig(String),
}

/// Session actor handle for sending messages
#[derive(Clone, Debug)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
}

impl SessionHandle {
    /// Create a new session handle
    pub fn new(sender: mpsc::Sender<SessionMessage>) -> Self {
        Self { sender }
    }

    /// Whether the actor has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Send a raw message to the session
    pub async fn send(&self, message: SessionMessage) -> Result<(), SessionError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| SessionError::Closed)
    }

    async fn query<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> SessionMessage,
    ) -> Result<T, SessionError> {
        let (response, reply) = oneshot::channel();
        self.send(message(response)).await?;
        reply.await.map_err(|_| SessionError::Closed)
    }

    async fn command(
        &self,
        message: impl FnOnce(oneshot::Sender<SessionResponse>) -> SessionMessage,
    ) -> Result<(), SessionError> {
        match self.query(message).await? {
            SessionResponse::Success => Ok(()),
            SessionResponse::Error(msg) => Err(SessionError::Failed(msg)),
        }
    }

    pub async fn start_level(&self, level: LevelId) -> Result<(), SessionError> {
        self.command(|response| SessionMessage::StartLevel { level, response })
            .await
    }

    pub async fn start_next_level(&self) -> Result<(), SessionError> {
        self.command(|response| SessionMessage::StartNextLevel { response })
            .await
    }

    pub async fn restart_level(&self) -> Result<(), SessionError> {
        self.command(|response| SessionMessage::RestartLevel { response })
            .await
    }

    pub async fn guess_letter(&self, letter: char) -> Result<(), SessionError> {
        self.command(|response| SessionMessage::GuessLetter { letter, response })
            .await
    }

    pub async fn use_hint(&self) -> Result<(), SessionError> {
        self.command(|response| SessionMessage::UseHint { response })
            .await
    }

    pub async fn reset_progress(&self) -> Result<(), SessionError> {
        self.command(|response| SessionMessage::ResetProgress { response })
            .await
    }

    pub async fn reset_hints(&self) -> Result<(), SessionError> {
        self.command(|response| SessionMessage::ResetHints { response })
            .await
    }

    pub async fn set_difficulty(&self, difficulty: Difficulty) -> Result<(), SessionError> {
        self.command(|response| SessionMessage::SetDifficulty {
            difficulty,
            response,
        })
        .await
    }

    pub async fn view(&self) -> Result<RoundView, SessionError> {
        self.query(|response| SessionMessage::GetView { response })
            .await
    }

    pub async fn levels(&self) -> Result<Vec<LevelStatus>, SessionError> {
        self.query(|response| SessionMessage::GetLevels { response })
            .await
    }

    pub async fn drain_events(&self) -> Result<Vec<GameEvent>, SessionError> {
        self.query(|response| SessionMessage::DrainEvents { response })
            .await
    }

    pub async fn close(&self) -> Result<(), SessionError> {
        self.command(|response| SessionMessage::Close { response })
            .await
    }
}

/// Countdown armed for one round.
struct Countdown {
    round: RoundId,
    interval: Interval,
}

/// Resolves with the round id on each tick, or never if no countdown runs.
async fn next_tick(countdown: &mut Option<Countdown>) -> RoundId {
    match countdown {
        Some(countdown) => {
            countdown.interval.tick().await;
            countdown.round
        }
        None => std::future::pending().await,
    }
}

/// Session actor owning a single game engine
pub struct SessionActor {
    /// Game rules and progression
    engine: GameEngine,

    /// Session configuration
    config: SessionConfig,

    /// Message inbox
    inbox: mpsc::Receiver<SessionMessage>,

    /// Countdown of the round in play, if any
    countdown: Option<Countdown>,

    /// Is session closed
    is_closed: bool,
}

impl SessionActor {
    /// Create a new session actor
    ///
    /// # Returns
    ///
    /// * `(SessionActor, SessionHandle)` - Actor and handle for sending messages
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidConfig`] if `config` fails validation
    pub fn new(
        engine: GameEngine,
        config: SessionConfig,
    ) -> Result<(Self, SessionHandle), SessionError> {
        config.validate().map_err(SessionError::InvalidConfig)?;

        let (sender, inbox) = mpsc::channel(config.inbox_capacity);

        let actor = Self {
            engine,
            config,
            inbox,
            countdown: None,
            is_closed: false,
        };

        Ok((actor, SessionHandle::new(sender)))
    }

    /// Run the session event loop. Returns the engine once the session is
    /// closed or every handle is dropped.
    pub async fn run(mut self) -> GameEngine {
        info!("Session starting");

        loop {
            tokio::select! {
                biased;

                round = next_tick(&mut self.countdown) => {
                    self.engine.tick(round);
                    self.sync_countdown();
                }

                message = self.inbox.recv() => {
                    let Some(message) = message else {
                        debug!("All session handles dropped");
                        break;
                    };

                    self.handle_message(message);
                    self.sync_countdown();

                    if self.is_closed {
                        break;
                    }
                }
            }
        }

        info!("Session closed");
        self.engine
    }

    /// Arm a fresh interval for a new round, drop it once the round ends.
    fn sync_countdown(&mut self) {
        let armed = self.countdown.as_ref().map(|countdown| countdown.round);

        match self.engine.countdown() {
            Some(round) if armed != Some(round) => {
                let period = self.config.tick_interval;
                self.countdown = Some(Countdown {
                    round,
                    interval: interval_at(Instant::now() + period, period),
                });
                debug!("Countdown armed for round {round}");
            }
            Some(_) => {}
            None => {
                if let Some(countdown) = self.countdown.take() {
                    debug!("Countdown stopped for round {}", countdown.round);
                }
            }
        }
    }

    fn respond(result: ProgressResult<()>) -> SessionResponse {
        match result {
            Ok(()) => SessionResponse::Success,
            Err(e) => {
                warn!("Session command failed: {e}");
                SessionResponse::Error(e.client_message())
            }
        }
    }

    /// Handle a session message
    fn handle_message(&mut self, message: SessionMessage) {
        match message {
            SessionMessage::StartLevel { level, response } => {
                self.engine.start_level(level);
                let _ = response.send(SessionResponse::Success);
            }

            SessionMessage::StartNextLevel { response } => {
                self.engine.start_next_level();
                let _ = response.send(SessionResponse::Success);
            }

            SessionMessage::RestartLevel { response } => {
                self.engine.restart_level();
                let _ = response.send(SessionResponse::Success);
            }

            SessionMessage::GuessLetter { letter, response } => {
                let result = Self::respond(self.engine.guess_letter(letter));
                let _ = response.send(result);
            }

            SessionMessage::UseHint { response } => {
                let result = Self::respond(self.engine.use_hint());
                let _ = response.send(result);
            }

            SessionMessage::ResetProgress { response } => {
                let result = Self::respond(self.engine.reset_progress());
                let _ = response.send(result);
            }

            SessionMessage::ResetHints { response } => {
                let result = Self::respond(self.engine.reset_hints());
                let _ = response.send(result);
            }

            SessionMessage::SetDifficulty {
                difficulty,
                response,
            } => {
                self.engine.set_difficulty(difficulty);
                let _ = response.send(SessionResponse::Success);
            }

            SessionMessage::GetView { response } => {
                let _ = response.send(self.engine.view());
            }

            SessionMessage::GetLevels { response } => {
                let _ = response.send(self.engine.level_statuses());
            }

            SessionMessage::DrainEvents { response } => {
                let _ = response.send(self.engine.drain_events().into());
            }

            SessionMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(SessionResponse::Success);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{game::entities::Outcome, progress::MemoryStore};
    use std::time::Duration;

    fn spawn_session() -> (SessionHandle, MemoryStore) {
        let store = MemoryStore::new();
        let engine = GameEngine::with_store(Box::new(store.clone())).unwrap();
        let (actor, handle) = SessionActor::new(engine, SessionConfig::default()).unwrap();
        tokio::spawn(actor.run());
        (handle, store)
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ticks_once_per_second() {
        let (handle, _) = spawn_session();
        handle.start_level(0).await.unwrap();

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        let view = handle.view().await.unwrap();
        assert_eq!(view.time_remaining_secs, 37);
        assert!(view.timer_active);
    }

    #[tokio::test(start_paused = true)]
    async fn test_win_stops_countdown() {
        let (handle, store) = spawn_session();
        handle.start_level(0).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2_500)).await;

        for letter in ['C', 'A', 'T'] {
            handle.guess_letter(letter).await.unwrap();
        }
        tokio::time::sleep(Duration::from_secs(60)).await;

        let view = handle.view().await.unwrap();
        assert_eq!(view.outcome, Some(Outcome::Won));
        assert_eq!(view.time_remaining_secs, 38);
        assert!(!view.timer_active);
        assert_eq!(store.snapshot().unwrap().max_unlocked_level, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_is_reported() {
        let (handle, store) = spawn_session();
        store.set_fail_writes(true);
        handle.start_level(0).await.unwrap();

        let err = handle.use_hint().await.unwrap_err();
        assert!(matches!(err, SessionError::Failed(_)));
        assert_eq!(handle.view().await.unwrap().hints_remaining, 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        for config in [
            SessionConfig {
                tick_interval: Duration::ZERO,
                ..SessionConfig::default()
            },
            SessionConfig {
                inbox_capacity: 0,
                ..SessionConfig::default()
            },
        ] {
            let engine = GameEngine::with_store(Box::new(MemoryStore::new())).unwrap();
            let result = SessionActor::new(engine, config);
            assert!(matches!(result, Err(SessionError::InvalidConfig(_))));
        }
    }

    #[tokio::test]
    async fn test_close_stops_actor() {
        let engine = GameEngine::with_store(Box::new(MemoryStore::new())).unwrap();
        let (actor, handle) = SessionActor::new(engine, SessionConfig::default()).unwrap();
        let task = tokio::spawn(actor.run());

        handle.close().await.unwrap();
        let engine = task.await.unwrap();
        assert!(engine.round().is_none());

        assert_eq!(handle.view().await, Err(SessionError::Closed));
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn test_dropping_handles_stops_actor() {
        let engine = GameEngine::with_store(Box::new(MemoryStore::new())).unwrap();
        let (actor, handle) = SessionActor::new(engine, SessionConfig::default()).unwrap();
        let task = tokio::spawn(actor.run());

        handle.start_level(2).await.unwrap();
        drop(handle);

        let engine = task.await.unwrap();
        assert_eq!(engine.current_level(), Some(2));
    }
}
