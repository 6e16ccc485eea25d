//! Letter knowledge accumulated over a game
//!
//! Every alphabet letter lives in exactly one of three sets: still available
//! (never guessed, or guessed without any verdict yet), included (proven to be
//! in the target) or excluded (proven absent). Inclusion is permanent; a letter
//! that was ever included is never excluded afterwards.

use super::feedback::Feedback;
use super::word::Word;
use std::collections::BTreeSet;

/// The three per-session letter sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterKnowledge {
    available: BTreeSet<char>,
    included: BTreeSet<char>,
    excluded: BTreeSet<char>,
}

impl LetterKnowledge {
    /// Fresh knowledge: the whole alphabet is available
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: ('a'..='z').collect(),
            included: BTreeSet::new(),
            excluded: BTreeSet::new(),
        }
    }

    /// Fold the feedback of one guess into the sets
    ///
    /// Found letters are included before any exclusion is considered, so a letter
    /// reported `NotInWord` at one position but found at another stays included.
    pub fn record(&mut self, guess: &Word, feedback: &Feedback) {
        let letters = guess.chars().iter().map(|&b| char::from(b));

        for (letter, outcome) in letters.clone().zip(feedback.outcomes()) {
            if outcome.is_found() {
                self.include(letter);
            }
        }

        for (letter, outcome) in letters.zip(feedback.outcomes()) {
            if !outcome.is_found() {
                self.exclude(letter);
            }
        }
    }

    fn include(&mut self, letter: char) {
        self.available.remove(&letter);
        self.excluded.remove(&letter);
        self.included.insert(letter);
    }

    fn exclude(&mut self, letter: char) {
        if self.included.contains(&letter) {
            return;
        }
        self.available.remove(&letter);
        self.excluded.insert(letter);
    }

    /// Letters with no verdict yet
    #[must_use]
    pub const fn available(&self) -> &BTreeSet<char> {
        &self.available
    }

    /// Letters known to be in the target
    #[must_use]
    pub const fn included(&self) -> &BTreeSet<char> {
        &self.included
    }

    /// Letters known to be absent from the target
    #[must_use]
    pub const fn excluded(&self) -> &BTreeSet<char> {
        &self.excluded
    }
}

impl Default for LetterKnowledge {
    fn default() -> Self {
        Self::new()
    }
}
