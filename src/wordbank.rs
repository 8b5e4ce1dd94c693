use crate::error::WordSourceError;
use crate::info_log;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::fs;
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.txt");
pub const MIN_WORD_LEN: usize = 5;
pub const MAX_WORD_LEN: usize = 12;

/// Supplies secret words to the game loop.
pub trait WordSource {
    /// Picks one word whose length lies in `min_len..=max_len`.
    ///
    /// # Errors
    ///
    /// `WordSourceError::NoSuitableWord` if no word fits the range.
    fn pick_word(&mut self, min_len: usize, max_len: usize) -> Result<Vec<char>, WordSourceError>;
}

fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| is_valid_word(word))
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, WordSourceError> {
    let data = fs::read_to_string(path)?;
    Ok(load_wordbank_from_str(&data))
}

/// An in-memory word list with its own random generator.
pub struct WordBank {
    words: Vec<String>,
    rng: StdRng,
}

impl WordBank {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Same as `new`, but reproducible.
    pub fn with_seed(words: Vec<String>, seed: u64) -> Self {
        Self {
            words,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn suitable_words(&self, min_len: usize, max_len: usize) -> Vec<&String> {
        words_in_range(&self.words, min_len, max_len)
    }
}

fn words_in_range(words: &[String], min_len: usize, max_len: usize) -> Vec<&String> {
    words
        .iter()
        .filter(|word| (min_len..=max_len).contains(&word.chars().count()))
        .collect()
}

impl WordSource for WordBank {
    fn pick_word(&mut self, min_len: usize, max_len: usize) -> Result<Vec<char>, WordSourceError> {
        let candidates = words_in_range(&self.words, min_len, max_len);
        info_log!(
            "pick_word() - {} of {} words fit {}..={}",
            candidates.len(),
            self.words.len(),
            min_len,
            max_len
        );
        let word = candidates
            .choose(&mut self.rng)
            .ok_or(WordSourceError::NoSuitableWord {
                min: min_len,
                max: max_len,
            })?;
        Ok(word.chars().collect())
    }
}
