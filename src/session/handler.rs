//! The per-client game loop
//!
//! A session walks `AwaitingGuess -> Validating -> Scoring -> Emitting` once per
//! guess until the game is over, then records the result exactly once. It owns
//! its `GameSession` outright; the only shared state it touches is the stats
//! store, and only from a blocking task so the lock never spans an await.

use super::protocol::GuessRequest;
use crate::config::AbandonedSessionPolicy;
use crate::core::{GameSession, GuessResult, WORD_LENGTH, Word};
use crate::oracle::WordOracle;
use crate::stats::StatsStore;
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Won { attempts: u8 },
    Lost,
    /// The client went away before the game was over
    Abandoned { attempts: u8 },
    /// No daily word was available, so no game was played
    Unavailable,
}

/// Runs games against the word oracle and feeds finished games into the stats
#[derive(Clone)]
pub struct SessionHandler {
    oracle: Arc<dyn WordOracle>,
    stats: Arc<StatsStore>,
    abandoned_policy: AbandonedSessionPolicy,
}

impl SessionHandler {
    #[must_use]
    pub fn new(
        oracle: Arc<dyn WordOracle>,
        stats: Arc<StatsStore>,
        abandoned_policy: AbandonedSessionPolicy,
    ) -> Self {
        Self {
            oracle,
            stats,
            abandoned_policy,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &Arc<StatsStore> {
        &self.stats
    }

    /// Play one game
    ///
    /// Reads guesses from `guesses` and writes exactly one `GuessResult` per
    /// guess to `results`, in order. Stops reading as soon as the game is over.
    /// The end of `guesses` or a failed write abandons the game.
    pub async fn play<S, K>(&self, session_id: Uuid, mut guesses: S, mut results: K) -> SessionOutcome
    where
        S: Stream<Item = GuessRequest> + Unpin,
        K: Sink<GuessResult> + Unpin,
        K::Error: Display,
    {
        info!(%session_id, stage = "start", "starting game");

        let Some(word) = self.daily_word(session_id).await else {
            if let Err(e) = results.send(GuessResult::unavailable()).await {
                warn!(%session_id, stage = "emit", error = %e, "failed to send unavailable response");
            }
            flush(session_id, &mut results).await;
            return SessionOutcome::Unavailable;
        };

        let mut game = GameSession::new(word);

        while !game.is_game_over() {
            let Some(request) = guesses.next().await else {
                return self.abandon(session_id, "await", &game).await;
            };

            let guess = normalize(&request.guess);
            let result = if self.is_valid(session_id, &guess).await {
                game.evaluate_guess(&guess)
            } else {
                debug!(%session_id, stage = "validate", %guess, "rejected guess");
                game.invalid_result()
            };

            if result.is_valid_word {
                debug!(
                    %session_id,
                    stage = "score",
                    %guess,
                    guesses_left = result.guesses_left,
                    "scored guess"
                );
            }

            if let Err(e) = results.send(result).await {
                warn!(%session_id, stage = "emit", error = %e, "failed to send result");
                return self.abandon(session_id, "emit", &game).await;
            }
        }

        let won = game.has_won();
        let attempts = game.attempts_used();
        info!(%session_id, stage = "terminal", won, attempts, "game over");

        self.record(session_id, won, attempts).await;
        flush(session_id, &mut results).await;

        if won {
            SessionOutcome::Won { attempts }
        } else {
            SessionOutcome::Lost
        }
    }

    async fn daily_word(&self, session_id: Uuid) -> Option<Word> {
        match self.oracle.daily_word().await {
            Ok(word) => match Word::new(word) {
                Ok(word) => Some(word),
                Err(e) => {
                    error!(%session_id, stage = "start", error = %e, "oracle returned an unplayable word");
                    None
                }
            },
            Err(e) => {
                error!(%session_id, stage = "start", error = %e, "failed to get daily word");
                None
            }
        }
    }

    /// A guess is valid when it has the right length and the oracle knows it.
    /// Oracle failures reject the guess.
    async fn is_valid(&self, session_id: Uuid, guess: &str) -> bool {
        if guess.chars().count() != WORD_LENGTH {
            return false;
        }

        match self.oracle.validate_word(guess).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!(%session_id, stage = "validate", error = %e, "word validation failed");
                false
            }
        }
    }

    async fn abandon(&self, session_id: Uuid, stage: &'static str, game: &GameSession) -> SessionOutcome {
        let attempts = game.attempts_used();
        info!(%session_id, stage, attempts, "client left before the game was over");

        match self.abandoned_policy {
            AbandonedSessionPolicy::Discard => {}
            AbandonedSessionPolicy::RecordLoss if attempts > 0 => {
                self.record(session_id, false, attempts).await;
            }
            AbandonedSessionPolicy::RecordLoss => {}
        }

        SessionOutcome::Abandoned { attempts }
    }

    async fn record(&self, session_id: Uuid, won: bool, attempts: u8) {
        let stats = Arc::clone(&self.stats);
        match tokio::task::spawn_blocking(move || stats.record_result(won, attempts)).await {
            Ok(stats) => info!(
                %session_id,
                stage = "terminal",
                total_players = stats.total_players,
                "stats updated"
            ),
            Err(e) => error!(%session_id, stage = "terminal", error = %e, "stats update task failed"),
        }
    }
}

/// The sink is flushed rather than closed; the connection behind it outlives the game.
async fn flush<K>(session_id: Uuid, results: &mut K)
where
    K: Sink<GuessResult> + Unpin,
    K::Error: Display,
{
    if let Err(e) = results.flush().await {
        debug!(%session_id, error = %e, "failed to flush result stream");
    }
}

fn normalize(guess: &str) -> String {
    guess.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::core::LetterOutcome;
    use crate::oracle::OracleError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use futures::stream;
    use tempfile::TempDir;

    struct StubOracle {
        word: Result<&'static str, OracleError>,
        words: &'static [&'static str],
        validation_down: bool,
    }

    impl StubOracle {
        fn new(word: &'static str) -> Self {
            Self {
                word: Ok(word),
                words: &["crane", "slate", "llama", "allow", "irate", "audio", "robot"],
                validation_down: false,
            }
        }
    }

    #[async_trait]
    impl WordOracle for StubOracle {
        async fn daily_word(&self) -> Result<String, OracleError> {
            self.word.clone().map(str::to_string)
        }

        async fn validate_word(&self, word: &str) -> Result<bool, OracleError> {
            if self.validation_down {
                return Err(OracleError::Unavailable("connection refused".into()));
            }
            Ok(self.words.contains(&word))
        }
    }

    struct Fixture {
        _dir: TempDir,
        handler: SessionHandler,
    }

    fn fixture(oracle: StubOracle, policy: AbandonedSessionPolicy) -> Fixture {
        let dir = TempDir::new().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let stats = Arc::new(StatsStore::new(
            dir.path().join("game_stats.json"),
            Arc::new(FixedClock(today)),
        ));
        Fixture {
            _dir: dir,
            handler: SessionHandler::new(Arc::new(oracle), stats, policy),
        }
    }

    fn guesses(words: &[&str]) -> stream::Iter<std::vec::IntoIter<GuessRequest>> {
        stream::iter(words.iter().map(|&w| GuessRequest::new(w)).collect::<Vec<_>>())
    }

    async fn play(fixture: &Fixture, words: &[&str]) -> (SessionOutcome, Vec<GuessResult>) {
        let mut results = Vec::new();
        let outcome = fixture
            .handler
            .play(Uuid::new_v4(), guesses(words), &mut results)
            .await;
        (outcome, results)
    }

    #[tokio::test]
    async fn win_after_invalid_guesses() {
        let fixture = fixture(StubOracle::new("crane"), AbandonedSessionPolicy::Discard);
        let (outcome, results) = play(&fixture, &["abc", "zzzzz", " SLATE ", "crane"]).await;

        assert_eq!(outcome, SessionOutcome::Won { attempts: 2 });
        assert_eq!(results.len(), 4);

        assert!(!results[0].is_valid_word);
        assert_eq!(results[0].guesses_left, 6);
        assert!(!results[1].is_valid_word);
        assert_eq!(results[1].guesses_left, 6);
        assert!(results[2].is_valid_word);
        assert_eq!(results[2].guesses_left, 5);
        assert!(results[3].is_correct);
        assert!(results[3].is_game_over);

        let stats = fixture.handler.stats().current_stats();
        assert_eq!(stats.total_players, 1);
        assert_eq!(stats.total_winners, 1);
        assert_eq!(stats.guess_count(2), 1);
    }

    #[tokio::test]
    async fn six_misses_lose_the_game() {
        let fixture = fixture(StubOracle::new("crane"), AbandonedSessionPolicy::Discard);
        let (outcome, results) = play(&fixture, &["slate"; 6]).await;

        assert_eq!(outcome, SessionOutcome::Lost);
        assert_eq!(results.len(), 6);
        assert!(results[..5].iter().all(|r| !r.is_game_over));
        assert!(results[5].is_game_over);
        assert_eq!(results[5].guesses_left, 0);

        let stats = fixture.handler.stats().current_stats();
        assert_eq!(stats.total_players, 1);
        assert_eq!(stats.total_winners, 0);
    }

    #[tokio::test]
    async fn stops_reading_once_game_is_over() {
        let fixture = fixture(StubOracle::new("crane"), AbandonedSessionPolicy::Discard);
        let (outcome, results) = play(&fixture, &["crane", "slate", "irate"]).await;

        assert_eq!(outcome, SessionOutcome::Won { attempts: 1 });
        assert_eq!(results.len(), 1);
        assert_eq!(fixture.handler.stats().current_stats().total_players, 1);
    }

    #[tokio::test]
    async fn duplicate_letters_reach_the_client() {
        let fixture = fixture(StubOracle::new("allow"), AbandonedSessionPolicy::Discard);
        let (_, results) = play(&fixture, &["llama"]).await;

        let outcomes: Vec<LetterOutcome> = results[0].letter_results.iter().map(|r| r.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                LetterOutcome::WrongPosition,
                LetterOutcome::CorrectPosition,
                LetterOutcome::WrongPosition,
                LetterOutcome::NotInWord,
                LetterOutcome::NotInWord,
            ]
        );
    }

    #[tokio::test]
    async fn missing_daily_word_ends_session_without_stats() {
        let mut oracle = StubOracle::new("crane");
        oracle.word = Err(OracleError::Timeout(std::time::Duration::from_secs(2)));
        let fixture = fixture(oracle, AbandonedSessionPolicy::RecordLoss);
        let (outcome, results) = play(&fixture, &["crane"]).await;

        assert_eq!(outcome, SessionOutcome::Unavailable);
        assert_eq!(results, vec![GuessResult::unavailable()]);
        assert!(!fixture.handler.stats().path().exists());
    }

    #[tokio::test]
    async fn unplayable_daily_word_is_unavailable() {
        let fixture = fixture(StubOracle::new(""), AbandonedSessionPolicy::Discard);
        let (outcome, results) = play(&fixture, &["crane"]).await;

        assert_eq!(outcome, SessionOutcome::Unavailable);
        assert_eq!(results.len(), 1);
        assert!(results[0].is_game_over);
    }

    #[tokio::test]
    async fn validation_outage_rejects_guesses() {
        let mut oracle = StubOracle::new("crane");
        oracle.validation_down = true;
        let fixture = fixture(oracle, AbandonedSessionPolicy::Discard);
        let (outcome, results) = play(&fixture, &["crane", "slate"]).await;

        assert_eq!(outcome, SessionOutcome::Abandoned { attempts: 0 });
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.is_valid_word && r.guesses_left == 6));
    }

    #[tokio::test]
    async fn abandoned_game_is_discarded_by_default() {
        let fixture = fixture(StubOracle::new("crane"), AbandonedSessionPolicy::Discard);
        let (outcome, _) = play(&fixture, &["slate", "irate"]).await;

        assert_eq!(outcome, SessionOutcome::Abandoned { attempts: 2 });
        assert_eq!(fixture.handler.stats().current_stats().total_players, 0);
    }

    #[tokio::test]
    async fn abandoned_game_counts_as_loss_when_configured() {
        let fixture = fixture(StubOracle::new("crane"), AbandonedSessionPolicy::RecordLoss);
        let (outcome, _) = play(&fixture, &["slate"]).await;
        assert_eq!(outcome, SessionOutcome::Abandoned { attempts: 1 });

        let (outcome, _) = play(&fixture, &[]).await;
        assert_eq!(outcome, SessionOutcome::Abandoned { attempts: 0 });

        let stats = fixture.handler.stats().current_stats();
        assert_eq!(stats.total_players, 1);
        assert_eq!(stats.total_winners, 0);
    }

    #[tokio::test]
    async fn failed_write_abandons_session() {
        let fixture = fixture(StubOracle::new("crane"), AbandonedSessionPolicy::Discard);
        let broken = futures::sink::unfold((), |(), _result: GuessResult| async {
            Err::<(), _>("connection reset")
        });
        futures::pin_mut!(broken);

        let outcome = fixture
            .handler
            .play(Uuid::new_v4(), guesses(&["slate", "crane"]), broken)
            .await;

        assert_eq!(outcome, SessionOutcome::Abandoned { attempts: 1 });
        assert_eq!(fixture.handler.stats().current_stats().total_players, 0);
    }
}
