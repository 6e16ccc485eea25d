//! The word oracle collaborator
//!
//! Supplies the word of the day and decides whether a guess is a real word.
//! Sessions only see the `WordOracle` trait; the in-process word list and the
//! timeout wrapper are the two implementations shipped here.

mod timeout;
mod word_list;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use timeout::TimeoutOracle;
pub use word_list::WordListOracle;

/// Error type for oracle calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("word list is empty")]
    EmptyWordList,
    #[error("oracle did not answer within {0:?}")]
    Timeout(Duration),
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
}

/// Daily word selection and word validation
#[async_trait]
pub trait WordOracle: Send + Sync {
    /// The word of the day
    ///
    /// # Errors
    /// Returns `OracleError` if no word can be supplied.
    async fn daily_word(&self) -> Result<String, OracleError>;

    /// Whether `word` is a playable word
    ///
    /// # Errors
    /// Returns `OracleError` if the oracle cannot answer.
    async fn validate_word(&self, word: &str) -> Result<bool, OracleError>;
}
