//! Terminal configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::{path::PathBuf, time::Duration};
use word_kit::{Difficulty, SessionConfig, progress::StoreConfig};

/// Complete terminal configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Progress file location
    pub store: StoreConfig,
    /// Difficulty for the first round
    pub difficulty: Difficulty,
    /// Session actor configuration
    pub session: SessionConfig,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `progress_override` - Optional progress file override (from CLI args)
    /// * `difficulty_override` - Optional difficulty override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be used
    pub fn from_env(
        progress_override: Option<PathBuf>,
        difficulty_override: Option<Difficulty>,
    ) -> Result<Self, ConfigError> {
        let mut store = StoreConfig::from_env();
        if let Some(path) = progress_override {
            store.path = path;
        }

        let difficulty = match difficulty_override {
            Some(difficulty) => difficulty,
            None => match std::env::var("WK_DIFFICULTY") {
                Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
                    var: "WK_DIFFICULTY".to_string(),
                    reason: format!("'{value}' is not easy, medium, or hard"),
                })?,
                Err(_) => Difficulty::default(),
            },
        };

        let defaults = SessionConfig::default();
        let session = SessionConfig {
            tick_interval: Duration::from_millis(parse_env_or(
                "WK_TICK_MILLIS",
                defaults.tick_interval.as_millis() as u64,
            )),
            inbox_capacity: parse_env_or("WK_INBOX_CAPACITY", defaults.inbox_capacity),
        };

        Ok(CliConfig {
            store,
            difficulty,
            session,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "WK_PROGRESS_PATH".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.session.tick_interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: "WK_TICK_MILLIS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.session.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "WK_INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: tests touching the environment run serially
        unsafe {
            std::env::remove_var("WK_PROGRESS_PATH");
            std::env::remove_var("WK_DIFFICULTY");
            std::env::remove_var("WK_TICK_MILLIS");
            std::env::remove_var("WK_INBOX_CAPACITY");
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = CliConfig::from_env(None, None).unwrap();

        assert_eq!(config.store, StoreConfig::development());
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.session, SessionConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_env_values_are_read() {
        clear_env();
        // SAFETY: tests touching the environment run serially
        unsafe {
            std::env::set_var("WK_PROGRESS_PATH", "/tmp/wk/progress.json");
            std::env::set_var("WK_DIFFICULTY", "Hard");
            std::env::set_var("WK_TICK_MILLIS", "250");
            std::env::set_var("WK_INBOX_CAPACITY", "8");
        }

        let config = CliConfig::from_env(None, None).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/wk/progress.json"));
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.session.tick_interval, Duration::from_millis(250));
        assert_eq!(config.session.inbox_capacity, 8);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_overrides_win_over_env() {
        clear_env();
        // SAFETY: tests touching the environment run serially
        unsafe {
            std::env::set_var("WK_PROGRESS_PATH", "from_env.json");
            std::env::set_var("WK_DIFFICULTY", "nonsense");
        }

        let config =
            CliConfig::from_env(Some(PathBuf::from("from_args.json")), Some(Difficulty::Easy))
                .unwrap();
        assert_eq!(config.store.path, PathBuf::from("from_args.json"));
        assert_eq!(config.difficulty, Difficulty::Easy);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_bad_difficulty_is_an_error() {
        clear_env();
        // SAFETY: tests touching the environment run serially
        unsafe {
            std::env::set_var("WK_DIFFICULTY", "nightmare");
        }

        let err = CliConfig::from_env(None, None).unwrap_err();
        assert!(err.to_string().contains("WK_DIFFICULTY"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_zero_tick_fails_validation() {
        clear_env();
        // SAFETY: tests touching the environment run serially
        unsafe {
            std::env::set_var("WK_TICK_MILLIS", "0");
        }

        let config = CliConfig::from_env(None, None).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "WK_TICK_MILLIS"));
        clear_env();
    }
}
