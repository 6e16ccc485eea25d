//! Deadline enforcement for oracle calls

use super::{OracleError, WordOracle};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

/// Wraps an oracle so that no call waits longer than `limit`
pub struct TimeoutOracle<O> {
    inner: O,
    limit: Duration,
}

impl<O: WordOracle> TimeoutOracle<O> {
    #[must_use]
    pub const fn new(inner: O, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl<O: WordOracle> WordOracle for TimeoutOracle<O> {
    async fn daily_word(&self) -> Result<String, OracleError> {
        timeout(self.limit, self.inner.daily_word())
            .await
            .map_err(|_| OracleError::Timeout(self.limit))?
    }

    async fn validate_word(&self, word: &str) -> Result<bool, OracleError> {
        timeout(self.limit, self.inner.validate_word(word))
            .await
            .map_err(|_| OracleError::Timeout(self.limit))?
    }
}
