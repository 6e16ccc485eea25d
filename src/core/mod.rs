//! Core domain types for the daily game
//!
//! Words, per-letter feedback, letter knowledge and the game session itself.
//! Everything here is synchronous and free of I/O.

mod feedback;
mod game;
mod letters;
mod word;

pub use feedback::{Feedback, LetterOutcome};
pub use game::{GameSession, GuessResult, LetterResult, MAX_GUESSES};
pub use letters::LetterKnowledge;
pub use word::{WORD_LENGTH, Word, WordError};
