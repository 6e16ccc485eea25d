//! Daily Wordle
//!
//! A server for a daily word-guessing game. Clients play one game per
//! connection over newline-delimited JSON; every finished game feeds a shared,
//! file-backed statistics store that resets each day.
//!
//! # Quick Start
//!
//! ```rust
//! use daily_wordle::core::{GameSession, LetterOutcome, Word};
//!
//! let mut game = GameSession::new(Word::new("allow").unwrap());
//! let result = game.evaluate_guess("llama");
//!
//! assert_eq!(result.guesses_left, 5);
//! assert_eq!(result.letter_results[1].outcome, LetterOutcome::CorrectPosition);
//! ```

// Core domain types
pub mod core;

// Source of the current day
pub mod clock;

// Server configuration
pub mod config;

// Word lists
pub mod wordlists;

// Daily word and word validation
pub mod oracle;

// Cross-session statistics
pub mod stats;

// Streaming game sessions
pub mod session;

// TCP front end
pub mod server;

// Terminal output formatting
pub mod output;
