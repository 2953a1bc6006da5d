//! Structured logging configuration.
//!
//! Log records from the game library arrive through the `log` facade and are
//! picked up by the subscriber alongside the terminal's own `tracing` events.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use word_kit::{GameEvent, RoundView};

/// Initialize logging to stderr
///
/// Configurable log levels via the RUST_LOG env var (default: `warn`, so log
/// lines don't interleave with the game board).
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("Structured logging initialized");
}

/// Log a game event with structured data
pub fn log_game_event(event: &GameEvent) {
    tracing::debug!(event = %event, ends_round = event.ends_round(), "Game event");
}

/// Log the outcome once, for the batch of events that finished the round.
///
/// Returns whether an outcome was logged.
pub fn log_round_end(events: &[GameEvent], view: &RoundView) -> bool {
    if !events.iter().any(GameEvent::ends_round) {
        return false;
    }
    log_round_outcome(view)
}

/// Log the state a round ended in. Returns false while the round is still
/// being played.
pub fn log_round_outcome(view: &RoundView) -> bool {
    let Some(outcome) = view.outcome.filter(|outcome| outcome.is_terminal()) else {
        return false;
    };

    tracing::info!(
        game_level = view.level.map(|level| level + 1),
        outcome = %outcome,
        difficulty = %view.difficulty,
        incorrect_attempts = view.incorrect_attempts,
        time_remaining_secs = view.time_remaining_secs,
        hint_used = view.hint_used,
        "Round outcome"
    );
    true
}
