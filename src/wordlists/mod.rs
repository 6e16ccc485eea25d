//! Word lists for the daily game
//!
//! Provides the embedded word list compiled into the binary, and loaders for
//! replacing it with a list from disk.

mod embedded;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};
