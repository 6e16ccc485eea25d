//! Server configuration

use clap::ValueEnum;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default listen address for game clients
pub const DEFAULT_LISTEN: &str = "127.0.0.1:7018";

/// Default location of the statistics file
pub const DEFAULT_STATS_FILE: &str = "game_stats.json";

/// Default deadline for a single word oracle call
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_millis(2000);

/// What to do with a game whose client disconnected before it finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AbandonedSessionPolicy {
    /// Do not count the game at all
    #[default]
    Discard,
    /// Count the game as a loss, if at least one attempt was made
    RecordLoss,
}

/// Everything needed to run the game server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub stats_file: PathBuf,
    /// Word list to load instead of the embedded one
    pub word_list: Option<PathBuf>,
    pub oracle_timeout: Duration,
    pub abandoned_policy: AbandonedSessionPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 7018)),
            stats_file: PathBuf::from(DEFAULT_STATS_FILE),
            word_list: None,
            oracle_timeout: DEFAULT_ORACLE_TIMEOUT,
            abandoned_policy: AbandonedSessionPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listen_matches_constant() {
        let config = ServerConfig::default();
        assert_eq!(config.listen.to_string(), DEFAULT_LISTEN);
        assert_eq!(config.abandoned_policy, AbandonedSessionPolicy::Discard);
    }

    #[test]
    fn policy_parses_from_kebab_case() {
        let policy = AbandonedSessionPolicy::from_str("record-loss", true).unwrap();
        assert_eq!(policy, AbandonedSessionPolicy::RecordLoss);
    }
}
