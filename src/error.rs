use std::io;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidGuess {
    #[error("Please enter a letter")]
    Empty,
    #[error("Please enter exactly one letter")]
    TooLong,
    #[error("'{0}' is not a letter")]
    NotALetter(char),
    #[error("'{0}' has already been guessed or is not available")]
    Unavailable(char),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("Game already ended, no new guesses are accepted")]
    AlreadyEnded,
    #[error("Invalid guess: {0}")]
    Invalid(#[from] InvalidGuess),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorruptSave {
    #[error("expected 5 fields, found {0}")]
    FieldCount(usize),
    #[error("lives field '{0}' is not a non-negative integer")]
    BadLives(String),
    #[error("lives field {0} exceeds the maximum of {max}", max = crate::engine::MAX_LIVES)]
    TooManyLives(u32),
    #[error("revealed word has {revealed} letters but the secret word has {secret}")]
    LengthMismatch { secret: usize, revealed: usize },
    #[error("'{0}' is not a lower-case letter")]
    NotALetter(char),
    #[error("'{0}' was guessed more than once")]
    DuplicateGuess(char),
    #[error("remaining letters do not match the guess history")]
    RemainingMismatch,
    #[error("revealed slot {index} holds '{found}'")]
    BadSlot { index: usize, found: char },
    #[error("'{0}' is revealed but was never guessed")]
    UnguessedReveal(char),
    #[error("'{0}' was guessed but is still hidden")]
    HiddenGuess(char),
    #[error("lives field {lives} does not match {expected} after the recorded misses")]
    LivesMismatch { lives: u32, expected: u32 },
    #[error("saved game has already finished")]
    AlreadyFinished,
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Corrupt save file: {0}")]
    Corrupt(#[from] CorruptSave),
    #[error("Save file I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Only a game in progress can be saved")]
    GameFinished,
    #[error("Saving is disabled")]
    Disabled,
}

#[derive(Error, Debug)]
pub enum WordSourceError {
    #[error("No word with {min} to {max} letters in the word list")]
    NoSuitableWord { min: usize, max: usize },
    #[error("Failed to read word list: {0}")]
    Io(#[from] io::Error),
}
