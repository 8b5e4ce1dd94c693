//! Save slot persistence.
//!
//! A game is stored as one comma-separated line:
//! `guess_history,remaining_letters,secret_word,revealed,lives`.
//! The outcome is never stored; it is re-derived on load and a finished game
//! is rejected as corrupt.

use crate::engine::{GameState, MAX_LIVES, Outcome, PLACEHOLDER};
use crate::error::{CorruptSave, SaveError};
use crate::info_log;
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const FIELD_DELIMITER: char = ',';
const SAVE_DIR_NAME: &str = "hangman";
const SAVE_FILE_NAME: &str = "save.txt";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveRecord {
    pub guess_history: Vec<char>,
    pub remaining_letters: BTreeSet<char>,
    pub secret_word: Vec<char>,
    pub revealed: Vec<char>,
    pub lives: u32,
}

impl fmt::Display for SaveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history: String = self.guess_history.iter().collect();
        let remaining: String = self.remaining_letters.iter().collect();
        let secret: String = self.secret_word.iter().collect();
        let revealed: String = self.revealed.iter().collect();
        write!(
            f,
            "{history}{d}{remaining}{d}{secret}{d}{revealed}{d}{}",
            self.lives,
            d = FIELD_DELIMITER
        )
    }
}

impl FromStr for SaveRecord {
    type Err = CorruptSave;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s
            .trim_end_matches(['\r', '\n'])
            .split(FIELD_DELIMITER)
            .collect();
        let &[history, remaining, secret, revealed, lives] = fields.as_slice() else {
            return Err(CorruptSave::FieldCount(fields.len()));
        };

        let lives_field = lives.trim();
        let lives: u32 = lives_field
            .parse()
            .map_err(|_| CorruptSave::BadLives(lives_field.to_string()))?;

        Ok(Self {
            guess_history: history.chars().collect(),
            remaining_letters: remaining.chars().collect(),
            secret_word: secret.chars().collect(),
            revealed: revealed.chars().collect(),
            lives,
        })
    }
}

/// Snapshots a game. Only meaningful while the game is in progress; callers
/// check `GameState::is_in_progress` first.
pub fn encode(state: &GameState) -> SaveRecord {
    SaveRecord {
        guess_history: state.guess_history().to_vec(),
        remaining_letters: state.remaining_letters().clone(),
        secret_word: state.secret_word().to_vec(),
        revealed: state.revealed().to_vec(),
        lives: state.lives(),
    }
}

/// Rebuilds a game from a record, re-deriving its outcome.
///
/// The record must describe a game that `GameState::apply_guess` could have
/// produced: distinct guesses, remaining letters equal to the alphabet minus
/// the guesses, a teaser showing exactly the guessed letters of the word, and
/// one life lost per miss.
///
/// # Errors
///
/// Returns `CorruptSave` for any record that breaks those rules or describes
/// a finished game.
pub fn decode(record: SaveRecord) -> Result<GameState, CorruptSave> {
    if record.revealed.len() != record.secret_word.len() {
        return Err(CorruptSave::LengthMismatch {
            secret: record.secret_word.len(),
            revealed: record.revealed.len(),
        });
    }
    if record.lives > MAX_LIVES {
        return Err(CorruptSave::TooManyLives(record.lives));
    }
    if let Some(&c) = record
        .secret_word
        .iter()
        .find(|c| !c.is_ascii_lowercase())
    {
        return Err(CorruptSave::NotALetter(c));
    }

    let mut guessed = BTreeSet::new();
    for &c in &record.guess_history {
        if !c.is_ascii_lowercase() {
            return Err(CorruptSave::NotALetter(c));
        }
        if !guessed.insert(c) {
            return Err(CorruptSave::DuplicateGuess(c));
        }
    }

    let expected_remaining: BTreeSet<char> =
        ('a'..='z').filter(|c| !guessed.contains(c)).collect();
    if record.remaining_letters != expected_remaining {
        return Err(CorruptSave::RemainingMismatch);
    }

    for (index, (&shown, &c)) in record.revealed.iter().zip(&record.secret_word).enumerate() {
        if shown == PLACEHOLDER {
            if guessed.contains(&c) {
                return Err(CorruptSave::HiddenGuess(c));
            }
        } else if shown != c {
            return Err(CorruptSave::BadSlot {
                index,
                found: shown,
            });
        } else if !guessed.contains(&c) {
            return Err(CorruptSave::UnguessedReveal(c));
        }
    }

    let misses = guessed
        .iter()
        .filter(|c| !record.secret_word.contains(c))
        .count();
    let expected_lives = u32::try_from(misses)
        .map_or(0, |misses| MAX_LIVES.saturating_sub(misses));
    if record.lives != expected_lives {
        return Err(CorruptSave::LivesMismatch {
            lives: record.lives,
            expected: expected_lives,
        });
    }

    if Outcome::derive(&record.secret_word, &record.revealed, record.lives).is_finished() {
        return Err(CorruptSave::AlreadyFinished);
    }

    Ok(GameState::from_parts(
        record.guess_history,
        record.remaining_letters,
        record.secret_word,
        record.revealed,
        record.lives,
    ))
}

/// Parses one save line straight into a game.
///
/// # Errors
///
/// Returns `CorruptSave` for any malformed or finished record.
pub fn decode_str(line: &str) -> Result<GameState, CorruptSave> {
    decode(line.parse()?)
}

#[must_use]
pub fn default_save_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(SAVE_DIR_NAME).join(SAVE_FILE_NAME))
}

/// Writes the game to the save slot, replacing whatever was there.
///
/// # Errors
///
/// `SaveError::GameFinished` for a won or lost game, `SaveError::Io` if the
/// file cannot be written.
pub fn save_game(path: &Path, state: &GameState) -> Result<(), SaveError> {
    if !state.is_in_progress() {
        return Err(SaveError::GameFinished);
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let record = encode(state);
    fs::write(path, format!("{record}\n"))?;
    info_log!("save_game() - Wrote {} to {}", record, path.display());
    Ok(())
}

/// Reads the game stored in the save slot.
///
/// # Errors
///
/// `SaveError::Io` if the file cannot be read, `SaveError::Corrupt` if its
/// contents do not describe a game in progress.
pub fn load_game(path: &Path) -> Result<GameState, SaveError> {
    let contents = fs::read_to_string(path)?;
    info_log!("load_game() - Read save from {}", path.display());
    Ok(decode_str(&contents)?)
}
