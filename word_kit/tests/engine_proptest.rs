//! Property-based tests for the round rules using proptest
//!
//! These tests check the guessing, attempt, hint and unlock rules across
//! randomly chosen levels, letter orders and letter cases.

use proptest::prelude::*;
use std::collections::BTreeSet;
use word_kit::{GameEngine, Outcome, constants::ALPHABET, progress::MemoryStore};

fn new_engine() -> GameEngine {
    GameEngine::with_store(Box::new(MemoryStore::new())).unwrap()
}

fn word_of(level: usize) -> &'static str {
    new_engine().levels()[level].word
}

// Strategy for a level index together with its letters in a shuffled order,
// each letter in a random case
fn shuffled_word_strategy() -> impl Strategy<Value = (usize, Vec<char>)> {
    (0usize..50).prop_flat_map(|level| {
        let letters: Vec<char> = word_of(level)
            .chars()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let len = letters.len();
        (
            Just(level),
            Just(letters).prop_shuffle(),
            prop::collection::vec(any::<bool>(), len),
        )
            .prop_map(|(level, letters, lower)| {
                let cased = letters
                    .into_iter()
                    .zip(lower)
                    .map(|(c, lower)| if lower { c.to_ascii_lowercase() } else { c })
                    .collect();
                (level, cased)
            })
    })
}

// Strategy for a level index together with letters absent from its word
fn absent_letters_strategy() -> impl Strategy<Value = (usize, Vec<char>)> {
    (0usize..50).prop_flat_map(|level| {
        let word = word_of(level);
        let absent: Vec<char> = ALPHABET.chars().filter(|c| !word.contains(*c)).collect();
        (Just(level), Just(absent).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn test_any_order_any_case_wins((level, letters) in shuffled_word_strategy()) {
        let mut engine = new_engine();
        engine.start_level(level);

        for c in letters {
            prop_assert_eq!(engine.outcome(), Some(Outcome::Playing));
            engine.guess_letter(c).unwrap();
        }

        prop_assert_eq!(engine.outcome(), Some(Outcome::Won));
        prop_assert_eq!(engine.incorrect_attempts(), 0);
        prop_assert!(engine.is_level_passed(level));
        prop_assert_eq!(engine.masked_word().replace(' ', ""), word_of(level));
    }

    #[test]
    fn test_five_absent_letters_lose((level, absent) in absent_letters_strategy()) {
        let mut engine = new_engine();
        engine.start_level(level);

        for (i, c) in absent.iter().take(5).enumerate() {
            engine.guess_letter(*c).unwrap();
            prop_assert_eq!(engine.incorrect_attempts(), i as u32 + 1);
        }

        prop_assert_eq!(engine.outcome(), Some(Outcome::Lost));
        prop_assert_eq!(engine.countdown(), None);
        prop_assert!(!engine.is_level_passed(level));
    }

    #[test]
    fn test_repeated_guesses_change_nothing(
        level in 0usize..50,
        letter in prop::sample::select(ALPHABET.chars().collect::<Vec<_>>()),
        repeats in 2usize..6,
    ) {
        let mut engine = new_engine();
        engine.start_level(level);
        engine.guess_letter(letter).unwrap();
        let first = engine.view();

        for _ in 1..repeats {
            engine.guess_letter(letter.to_ascii_lowercase()).unwrap();
        }

        prop_assert_eq!(engine.view(), first);
    }

    #[test]
    fn test_non_letters_never_cost_attempts(level in 0usize..50, c in any::<char>()) {
        prop_assume!(!c.is_ascii_alphabetic());

        let mut engine = new_engine();
        engine.start_level(level);
        engine.guess_letter(c).unwrap();

        prop_assert_eq!(engine.incorrect_attempts(), 0);
        prop_assert_eq!(engine.remaining_letters().len(), 26);
    }

    #[test]
    fn test_unlock_never_skips_levels(order in prop::collection::vec(0usize..50, 1..40)) {
        let mut engine = new_engine();

        for level in order {
            let before = engine.progress().max_unlocked_level;
            engine.start_level(level);
            for c in word_of(level).chars() {
                engine.guess_letter(c).unwrap();
            }

            let after = engine.progress().max_unlocked_level;
            prop_assert!(after >= before);
            prop_assert!(after == before || after == level + 1);
        }
    }
}
