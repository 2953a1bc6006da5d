/// Wrong guesses allowed before a round is lost.
pub const MAX_ATTEMPTS: u32 = 5;

/// Seconds taken off the countdown when a hint is used.
pub const HINT_PENALTY_SECS: u32 = 10;

/// Size of the hint budget when it's full.
pub const MAX_HINTS: u32 = 3;

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Shown in place of letters that haven't been guessed yet.
pub const MASK_GLYPH: char = '_';

/// Undrained events kept by the engine before the oldest are dropped.
pub const MAX_PENDING_EVENTS: usize = 256;
