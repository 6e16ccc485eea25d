//! Daily Wordle - CLI
//!
//! Runs the game server, or inspects the statistics it keeps.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daily_wordle::{
    clock::{Clock, SystemClock},
    config::{AbandonedSessionPolicy, DEFAULT_LISTEN, DEFAULT_STATS_FILE, ServerConfig},
    oracle::{TimeoutOracle, WordListOracle},
    output::print_stats,
    server,
    session::SessionHandler,
    stats::StatsStore,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "daily_wordle",
    about = "Daily word-guessing game server",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    serve: ServeArgs,

    /// Statistics file shared by all games
    #[arg(long, global = true, env = "DAILY_WORDLE_STATS_FILE", default_value = DEFAULT_STATS_FILE)]
    stats_file: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the game server (default)
    Serve(ServeArgs),

    /// Print today's statistics
    ///
    /// The lock around the statistics file only covers one process, so run
    /// `--reset` while the server is stopped.
    Stats {
        /// Zero the statistics before printing them
        #[arg(long)]
        reset: bool,
    },
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Address to accept game clients on
    #[arg(long, env = "DAILY_WORDLE_LISTEN", default_value = DEFAULT_LISTEN)]
    listen: SocketAddr,

    /// Word list file (one word per line, or a JSON array); embedded list if omitted
    #[arg(short = 'w', long, env = "DAILY_WORDLE_WORDS")]
    words: Option<PathBuf>,

    /// Deadline for each word oracle call, in milliseconds
    #[arg(long, env = "DAILY_WORDLE_ORACLE_TIMEOUT_MS", default_value = "2000")]
    oracle_timeout_ms: u64,

    /// What to do with games whose client disconnects early
    #[arg(long, env = "DAILY_WORDLE_ABANDONED", value_enum, default_value = "discard")]
    abandoned: AbandonedSessionPolicy,
}

impl ServeArgs {
    fn into_config(self, stats_file: PathBuf) -> ServerConfig {
        ServerConfig {
            listen: self.listen,
            stats_file,
            word_list: self.words,
            oracle_timeout: Duration::from_millis(self.oracle_timeout_ms),
            abandoned_policy: self.abandoned,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Default to Serve mode if no command given
    let command = cli.command.unwrap_or(Commands::Serve(cli.serve));

    match command {
        Commands::Serve(args) => run_server(args.into_config(cli.stats_file), clock).await,
        Commands::Stats { reset } => run_stats_command(cli.stats_file, reset, clock).await,
    }
}

async fn run_server(config: ServerConfig, clock: Arc<dyn Clock>) -> Result<()> {
    let words = match &config.word_list {
        Some(path) => WordListOracle::from_file(path, Arc::clone(&clock))
            .with_context(|| format!("failed to load word list from {}", path.display()))?,
        None => WordListOracle::embedded(Arc::clone(&clock)),
    };
    if words.is_empty() {
        warn!("No playable words loaded, every game will end immediately");
    }

    let oracle = TimeoutOracle::new(words, config.oracle_timeout);
    let stats = Arc::new(StatsStore::new(config.stats_file.clone(), clock));
    let handler = SessionHandler::new(Arc::new(oracle), stats, config.abandoned_policy);

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;

    info!(
        stats_file = %config.stats_file.display(),
        oracle_timeout = ?config.oracle_timeout,
        abandoned_policy = ?config.abandoned_policy,
        "server configured"
    );

    server::serve(listener, handler, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    })
    .await?;

    Ok(())
}

async fn run_stats_command(stats_file: PathBuf, reset: bool, clock: Arc<dyn Clock>) -> Result<()> {
    let store = StatsStore::new(stats_file.clone(), clock);

    let stats = tokio::task::spawn_blocking(move || {
        if reset {
            store.reset()
        } else {
            store.current_stats()
        }
    })
    .await
    .context("stats task failed")?;

    print_stats(&stats, &stats_file);
    Ok(())
}
