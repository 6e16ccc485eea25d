//! The persisted statistics snapshot

use crate::core::MAX_GUESSES;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate results of every game played since `last_reset_date`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_players: u32,
    pub total_winners: u32,
    /// Winning games keyed by the number of attempts they took (1 to 6)
    pub guess_counts: BTreeMap<u8, u32>,
    pub last_reset_date: NaiveDate,
}

impl Stats {
    /// Zeroed snapshot stamped with `date`
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            total_players: 0,
            total_winners: 0,
            guess_counts: (1..=MAX_GUESSES).map(|attempts| (attempts, 0)).collect(),
            last_reset_date: date,
        }
    }

    /// Count one finished game
    ///
    /// Every game counts as a player. Wins only count when `attempts` is a
    /// possible attempt count.
    pub fn record_game(&mut self, won: bool, attempts: u8) {
        self.total_players += 1;

        if won && (1..=MAX_GUESSES).contains(&attempts) {
            self.total_winners += 1;
            *self.guess_counts.entry(attempts).or_insert(0) += 1;
        }
    }

    /// Share of players who won, as a percentage rounded to one decimal
    #[must_use]
    pub fn win_percentage(&self) -> f64 {
        if self.total_players == 0 {
            return 0.0;
        }
        round_one_decimal(f64::from(self.total_winners) / f64::from(self.total_players) * 100.0)
    }

    /// Mean attempts over winning games, rounded to one decimal
    #[must_use]
    pub fn average_guesses(&self) -> f64 {
        let (total_guesses, winners) = (1..=MAX_GUESSES)
            .map(|attempts| (attempts, self.guess_count(attempts)))
            .fold((0u64, 0u64), |(guesses, wins), (attempts, count)| {
                (
                    guesses + u64::from(attempts) * u64::from(count),
                    wins + u64::from(count),
                )
            });

        if winners == 0 {
            return 0.0;
        }
        round_one_decimal(total_guesses as f64 / winners as f64)
    }

    /// Winning games that took exactly `attempts` guesses
    #[must_use]
    pub fn guess_count(&self, attempts: u8) -> u32 {
        self.guess_counts.get(&attempts).copied().unwrap_or(0)
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn new_stats_are_zeroed_with_six_buckets() {
        let stats = Stats::new(today());
        assert_eq!(stats.total_players, 0);
        assert_eq!(stats.total_winners, 0);
        assert_eq!(stats.guess_counts.len(), 6);
        assert!(stats.guess_counts.values().all(|&count| count == 0));
        assert_eq!(stats.win_percentage(), 0.0);
        assert_eq!(stats.average_guesses(), 0.0);
    }

    #[test]
    fn record_game_counts_wins_and_losses() {
        let mut stats = Stats::new(today());
        stats.record_game(true, 3);
        stats.record_game(false, 6);
        stats.record_game(true, 3);

        assert_eq!(stats.total_players, 3);
        assert_eq!(stats.total_winners, 2);
        assert_eq!(stats.guess_count(3), 2);
        assert_eq!(stats.guess_count(6), 0);
    }

    #[test]
    fn win_with_impossible_attempts_only_counts_player() {
        let mut stats = Stats::new(today());
        stats.record_game(true, 0);
        stats.record_game(true, 7);

        assert_eq!(stats.total_players, 2);
        assert_eq!(stats.total_winners, 0);
        assert!(!stats.guess_counts.contains_key(&7));
    }

    #[test]
    fn aggregate_math() {
        let mut stats = Stats::new(today());
        stats.total_players = 5;
        stats.total_winners = 4;
        stats.guess_counts = BTreeMap::from([(1, 0), (2, 1), (3, 2), (4, 0), (5, 0), (6, 1)]);

        assert_eq!(stats.average_guesses(), 3.5);
        assert_eq!(stats.win_percentage(), 80.0);
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        let mut stats = Stats::new(today());
        stats.record_game(true, 2);
        stats.record_game(false, 6);
        stats.record_game(false, 6);

        assert_eq!(stats.win_percentage(), 33.3);
    }

    #[test]
    fn stats_round_trip_through_json() {
        let mut stats = Stats::new(today());
        stats.record_game(true, 4);
        stats.record_game(false, 6);

        let json = serde_json::to_string(&stats).unwrap();
        let restored: Stats = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, stats);
    }

    #[test]
    fn stats_json_layout() {
        let stats = Stats::new(today());
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["totalPlayers"], 0);
        assert_eq!(json["guessCounts"]["6"], 0);
        assert_eq!(json["lastResetDate"], "2025-03-07");
    }
}
