//! File-backed statistics store shared by every session
//!
//! All access goes through one mutex and every operation reads or writes the
//! whole file. The lock is only held for the file work of a single operation,
//! never while a session waits on the network.

use super::record::Stats;
use crate::clock::Clock;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type for stats file access
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Process-wide statistics with a daily reset
pub struct StatsStore {
    path: PathBuf,
    lock: Mutex<()>,
    clock: Arc<dyn Clock>,
}

impl StatsStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            clock,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Today's statistics
    ///
    /// A snapshot from an earlier day is replaced by a zeroed one, which is
    /// written back before it is returned.
    #[must_use]
    pub fn current_stats(&self) -> Stats {
        let _guard = self.acquire();
        self.load_current()
    }

    /// Count one finished game and persist the result
    ///
    /// Returns the updated snapshot even if writing it failed.
    pub fn record_result(&self, won: bool, attempts: u8) -> Stats {
        let _guard = self.acquire();

        let mut stats = self.load_current();
        stats.record_game(won, attempts);
        self.persist(&stats);

        debug!(
            won,
            attempts,
            total_players = stats.total_players,
            "recorded game result"
        );
        stats
    }

    /// Replace the statistics with a zeroed snapshot stamped today
    #[must_use]
    pub fn reset(&self) -> Stats {
        let _guard = self.acquire();

        let stats = Stats::new(self.clock.today());
        self.persist(&stats);

        info!(path = %self.path.display(), "stats reset");
        stats
    }

    fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Callers must hold the lock.
    fn load_current(&self) -> Stats {
        let today = self.clock.today();

        let stats = match self.load() {
            Ok(Some(stats)) => stats,
            Ok(None) => return Stats::new(today),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to load stats, starting fresh");
                return Stats::new(today);
            }
        };

        if stats.last_reset_date < today {
            info!(
                last_reset_date = %stats.last_reset_date,
                %today,
                "new day, resetting stats"
            );
            let fresh = Stats::new(today);
            self.persist(&fresh);
            return fresh;
        }

        stats
    }

    fn load(&self) -> Result<Option<Stats>, StatsError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, stats: &Stats) -> Result<(), StatsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");

        let json = serde_json::to_string_pretty(stats)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn persist(&self, stats: &Stats) {
        if let Err(e) = self.save(stats) {
            warn!(path = %self.path.display(), error = %e, "failed to save stats");
        }
    }
}
