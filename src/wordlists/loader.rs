//! Word list loading utilities
//!
//! Lists on disk are either one word per line, or a JSON array of strings when
//! the file name ends in `.json`.

use crate::core::Word;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Error type for word list loading
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read word list: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse word list JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load words from a file
///
/// Returns a vector of valid Word instances, skipping any invalid entries.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, or `LoadError::Json` if a
/// `.json` file is not an array of strings.
///
/// # Examples
/// ```no_run
/// use daily_wordle::wordlists::loader::load_from_file;
///
/// let words = load_from_file("wordle.json").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let entries: Vec<String> = serde_json::from_str(&content)?;
        return Ok(entries
            .iter()
            .filter_map(|entry| Word::new(entry.trim()).ok())
            .collect());
    }

    let words = content
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else {
                Word::new(trimmed).ok()
            }
        })
        .collect();

    Ok(words)
}

/// Convert embedded string slice to Word vector
///
/// # Examples
/// ```
/// use daily_wordle::wordlists::loader::words_from_slice;
/// use daily_wordle::wordlists::WORDS;
///
/// let words = words_from_slice(WORDS);
/// assert_eq!(words.len(), WORDS.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
