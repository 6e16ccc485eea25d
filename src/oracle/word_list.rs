//! In-process oracle backed by a loaded word list

use super::{OracleError, WordOracle};
use crate::clock::Clock;
use crate::core::Word;
use crate::wordlists::{
    WORDS,
    loader::{LoadError, load_from_file, words_from_slice},
};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rustc_hash::FxHashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Word oracle over an explicitly loaded list
///
/// The daily word is a deterministic function of the calendar day, so every
/// session on the same day plays against the same word.
pub struct WordListOracle {
    words: Vec<Word>,
    index: FxHashSet<String>,
    clock: Arc<dyn Clock>,
}

impl WordListOracle {
    /// Build an oracle from an already loaded list
    #[must_use]
    pub fn from_words(words: Vec<Word>, clock: Arc<dyn Clock>) -> Self {
        if words.is_empty() {
            warn!("Word list is empty, no daily word can be chosen");
        } else {
            info!(count = words.len(), "Loaded word list");
        }

        let index = words.iter().map(|w| w.text().to_string()).collect();
        Self {
            words,
            index,
            clock,
        }
    }

    /// Oracle over the list compiled into the binary
    #[must_use]
    pub fn embedded(clock: Arc<dyn Clock>) -> Self {
        Self::from_words(words_from_slice(WORDS), clock)
    }

    /// Oracle over a list on disk
    ///
    /// # Errors
    /// Returns `LoadError` if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P, clock: Arc<dyn Clock>) -> Result<Self, LoadError> {
        let words = load_from_file(path)?;
        Ok(Self::from_words(words, clock))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The word assigned to `date`, if the list is not empty
    #[must_use]
    pub fn word_for(&self, date: NaiveDate) -> Option<&Word> {
        if self.words.is_empty() {
            return None;
        }

        let mut rng = StdRng::seed_from_u64(day_seed(date));
        self.words.get(rng.random_range(0..self.words.len()))
    }
}

/// Seed derived from the date as a `yyyymmdd` number
fn day_seed(date: NaiveDate) -> u64 {
    let year = u64::try_from(date.year()).unwrap_or_default();
    year * 10_000 + u64::from(date.month()) * 100 + u64::from(date.day())
}

#[async_trait]
impl WordOracle for WordListOracle {
    async fn daily_word(&self) -> Result<String, OracleError> {
        self.word_for(self.clock.today())
            .map(|word| word.text().to_string())
            .ok_or(OracleError::EmptyWordList)
    }

    async fn validate_word(&self, word: &str) -> Result<bool, OracleError> {
        Ok(self.index.contains(&word.trim().to_lowercase()))
    }
}
