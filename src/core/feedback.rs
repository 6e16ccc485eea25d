//! Per-letter feedback for a guess
//!
//! Feedback is computed with Wordle's duplicate-aware rules: exact matches claim
//! their letter first, and only the leftover occurrences of a letter in the target
//! can be reported as misplaced.

use super::word::{WORD_LENGTH, Word};
use serde::{Deserialize, Serialize};

/// Outcome for a single guessed letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterOutcome {
    /// Letter is in the target at this exact position
    CorrectPosition,
    /// Letter is in the target, but somewhere else
    WrongPosition,
    /// No remaining occurrence of this letter in the target
    NotInWord,
}

impl LetterOutcome {
    /// True for outcomes that prove the letter occurs in the target
    #[inline]
    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::CorrectPosition | Self::WrongPosition)
    }
}

/// Feedback for a whole guess, one outcome per position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback([LetterOutcome; WORD_LENGTH]);

impl Feedback {
    /// All letters in their correct positions
    pub const PERFECT: Self = Self([LetterOutcome::CorrectPosition; WORD_LENGTH]);

    /// Calculate the feedback when `guess` is guessed and `answer` is the target
    ///
    /// # Algorithm
    /// 1. Count every letter of the answer
    /// 2. First pass: mark all exact matches and spend one count per match
    /// 3. Second pass: for the remaining positions, mark misplaced while the letter
    ///    still has counts left, otherwise not in word
    ///
    /// The first pass must finish before the second starts, otherwise an early
    /// misplaced letter could steal the count a later exact match needs.
    ///
    /// # Examples
    /// ```
    /// use daily_wordle::core::{Feedback, LetterOutcome, Word};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let answer = Word::new("slate").unwrap();
    /// let feedback = Feedback::calculate(&guess, &answer);
    ///
    /// assert_eq!(feedback.outcomes()[2], LetterOutcome::CorrectPosition);
    /// assert_eq!(feedback.outcomes()[4], LetterOutcome::CorrectPosition);
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, answer: &Word) -> Self {
        let mut result = [LetterOutcome::NotInWord; WORD_LENGTH];
        let mut resolved = [false; WORD_LENGTH];
        let mut answer_available = answer.char_counts();

        // First pass: exact position matches
        for (i, (&guessed, &expected)) in guess.chars().iter().zip(answer.chars()).enumerate() {
            if guessed == expected {
                result[i] = LetterOutcome::CorrectPosition;
                resolved[i] = true;

                if let Some(count) = answer_available.get_mut(&guessed) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: misplaced letters, limited by the remaining counts
        for (i, &guessed) in guess.chars().iter().enumerate() {
            if resolved[i] {
                continue;
            }

            if let Some(count) = answer_available.get_mut(&guessed)
                && *count > 0
            {
                result[i] = LetterOutcome::WrongPosition;
                *count -= 1;
            }
        }

        Self(result)
    }

    /// Get the outcomes in guess order
    #[inline]
    #[must_use]
    pub const fn outcomes(&self) -> &[LetterOutcome; WORD_LENGTH] {
        &self.0
    }
}
