//! Internal modules for the word game terminal.
//!
//! This library provides command parsing, configuration, and logging setup
//! used by the wk_cli binary.

pub mod commands;
pub mod config;
pub mod logging;
