//! A single game against the daily word
//!
//! `GameSession` owns the mutable state of one game and turns guesses into
//! `GuessResult`s. Only guesses that are real 5-letter words consume an attempt.

use super::feedback::{Feedback, LetterOutcome};
use super::letters::LetterKnowledge;
use super::word::Word;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Attempts available in every game
pub const MAX_GUESSES: u8 = 6;

/// Outcome for one guessed character, in guess order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterResult {
    pub letter: char,
    pub outcome: LetterOutcome,
}

/// Everything the player learns from one processed guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResult {
    pub is_valid_word: bool,
    pub guesses_left: u8,
    pub is_game_over: bool,
    pub is_correct: bool,
    pub letter_results: Vec<LetterResult>,
    pub available_letters: BTreeSet<char>,
    pub included_letters: BTreeSet<char>,
    pub excluded_letters: BTreeSet<char>,
}

impl GuessResult {
    /// Terminal response for a game that could not be started
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            is_valid_word: false,
            guesses_left: 0,
            is_game_over: true,
            is_correct: false,
            letter_results: Vec::new(),
            available_letters: BTreeSet::new(),
            included_letters: BTreeSet::new(),
            excluded_letters: BTreeSet::new(),
        }
    }
}

/// State of one game: target word, attempts and letter knowledge
#[derive(Debug, Clone)]
pub struct GameSession {
    word_to_guess: Word,
    guesses_remaining: u8,
    has_won: bool,
    letters: LetterKnowledge,
}

impl GameSession {
    /// Start a game against `word_to_guess` with all attempts available
    #[must_use]
    pub fn new(word_to_guess: Word) -> Self {
        Self {
            word_to_guess,
            guesses_remaining: MAX_GUESSES,
            has_won: false,
            letters: LetterKnowledge::new(),
        }
    }

    #[must_use]
    pub const fn guesses_remaining(&self) -> u8 {
        self.guesses_remaining
    }

    /// Attempts consumed so far
    #[must_use]
    pub const fn attempts_used(&self) -> u8 {
        MAX_GUESSES - self.guesses_remaining
    }

    #[must_use]
    pub const fn has_won(&self) -> bool {
        self.has_won
    }

    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.guesses_remaining == 0 || self.has_won
    }

    /// Score a guess against the target word
    ///
    /// Guesses that are not five ASCII letters are reported with
    /// `is_valid_word == false` and leave the game untouched. Calling this on a
    /// finished game behaves the same way.
    ///
    /// # Examples
    /// ```
    /// use daily_wordle::core::{GameSession, Word};
    ///
    /// let mut game = GameSession::new(Word::new("slate").unwrap());
    ///
    /// let result = game.evaluate_guess("abc");
    /// assert!(!result.is_valid_word);
    /// assert_eq!(game.guesses_remaining(), 6);
    ///
    /// let result = game.evaluate_guess("slate");
    /// assert!(result.is_correct && result.is_game_over);
    /// ```
    pub fn evaluate_guess(&mut self, guess: &str) -> GuessResult {
        if self.is_game_over() {
            return self.invalid_result();
        }

        let Ok(guess) = Word::new(guess) else {
            return self.invalid_result();
        };

        self.guesses_remaining -= 1;

        let feedback = if guess == self.word_to_guess {
            self.has_won = true;
            Feedback::PERFECT
        } else {
            Feedback::calculate(&guess, &self.word_to_guess)
        };

        self.letters.record(&guess, &feedback);

        let letter_results = guess
            .chars()
            .iter()
            .zip(feedback.outcomes())
            .map(|(&letter, &outcome)| LetterResult {
                letter: char::from(letter),
                outcome,
            })
            .collect();

        GuessResult {
            is_valid_word: true,
            is_correct: self.has_won,
            letter_results,
            ..self.snapshot()
        }
    }

    /// Result for a guess that was rejected without consuming an attempt
    #[must_use]
    pub fn invalid_result(&self) -> GuessResult {
        GuessResult {
            is_valid_word: false,
            is_correct: false,
            letter_results: Vec::new(),
            ..self.snapshot()
        }
    }

    fn snapshot(&self) -> GuessResult {
        GuessResult {
            is_valid_word: false,
            guesses_left: self.guesses_remaining,
            is_game_over: self.is_game_over(),
            is_correct: false,
            letter_results: Vec::new(),
            available_letters: self.letters.available().clone(),
            included_letters: self.letters.included().clone(),
            excluded_letters: self.letters.excluded().clone(),
        }
    }
}
