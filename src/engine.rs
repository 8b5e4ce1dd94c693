//! Game engine: the hangman state machine.
//!
//! A `GameState` is created from a secret word and mutated only through
//! `GameState::apply_guess`. Everything else is a read-only view for rendering.

use crate::debug_log;
use crate::error::{GuessError, InvalidGuess};
use std::collections::BTreeSet;

pub const MAX_LIVES: u32 = 6;
pub const PLACEHOLDER: char = '_';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Classifies a game from its teaser and lives. Used after every turn and
    /// when restoring a save, so both paths agree.
    pub fn derive(secret_word: &[char], revealed: &[char], lives: u32) -> Self {
        if revealed == secret_word {
            Self::Won
        } else if lives == 0 {
            Self::Lost
        } else {
            Self::InProgress
        }
    }
}

/// Result of an accepted guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    pub letter: char,
    pub hit: bool,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    secret_word: Vec<char>,
    revealed: Vec<char>,
    remaining_letters: BTreeSet<char>,
    guess_history: Vec<char>,
    lives: u32,
    outcome: Outcome,
}

impl GameState {
    /// Starts a fresh game. The word is expected to be lower-case already.
    pub fn new(secret_word: Vec<char>) -> Self {
        let revealed = vec![PLACEHOLDER; secret_word.len()];
        Self {
            secret_word,
            revealed,
            remaining_letters: ('a'..='z').collect(),
            guess_history: Vec::new(),
            lives: MAX_LIVES,
            outcome: Outcome::InProgress,
        }
    }

    /// Rebuilds a state from already-validated parts; the outcome is derived.
    pub(crate) fn from_parts(
        guess_history: Vec<char>,
        remaining_letters: BTreeSet<char>,
        secret_word: Vec<char>,
        revealed: Vec<char>,
        lives: u32,
    ) -> Self {
        let outcome = Outcome::derive(&secret_word, &revealed, lives);
        Self {
            secret_word,
            revealed,
            remaining_letters,
            guess_history,
            lives,
            outcome,
        }
    }

    pub fn secret_word(&self) -> &[char] {
        &self.secret_word
    }

    pub fn revealed(&self) -> &[char] {
        &self.revealed
    }

    pub fn remaining_letters(&self) -> &BTreeSet<char> {
        &self.remaining_letters
    }

    pub fn guess_history(&self) -> &[char] {
        &self.guess_history
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_in_progress(&self) -> bool {
        !self.outcome.is_finished()
    }

    pub fn secret_word_string(&self) -> String {
        self.secret_word.iter().collect()
    }

    pub fn teaser(&self) -> String {
        self.revealed.iter().collect()
    }

    /// Applies one guessed letter.
    ///
    /// # Errors
    ///
    /// `GuessError::AlreadyEnded` once the game is won or lost, and
    /// `GuessError::Invalid` when the input is not a single letter that is
    /// still available. Neither error touches the state.
    pub fn apply_guess(&mut self, raw_input: &str) -> Result<Turn, GuessError> {
        if self.outcome.is_finished() {
            return Err(GuessError::AlreadyEnded);
        }

        let letter = self.validate(raw_input)?;

        self.remaining_letters.remove(&letter);
        self.guess_history.push(letter);

        let mut hit = false;
        for (slot, &c) in self.revealed.iter_mut().zip(&self.secret_word) {
            if c == letter {
                *slot = letter;
                hit = true;
            }
        }
        if !hit {
            self.lives = self.lives.saturating_sub(1);
        }

        self.outcome = Outcome::derive(&self.secret_word, &self.revealed, self.lives);
        debug_log!(
            "apply_guess() - '{}' hit={} lives={} outcome={:?}",
            letter,
            hit,
            self.lives,
            self.outcome
        );

        Ok(Turn {
            letter,
            hit,
            outcome: self.outcome,
        })
    }

    fn validate(&self, raw_input: &str) -> Result<char, InvalidGuess> {
        let normalized = raw_input.to_lowercase();
        let mut chars = normalized.chars();
        let letter = match (chars.next(), chars.next()) {
            (None, _) => return Err(InvalidGuess::Empty),
            (Some(_), Some(_)) => return Err(InvalidGuess::TooLong),
            (Some(c), None) => c,
        };
        if !letter.is_alphabetic() {
            return Err(InvalidGuess::NotALetter(letter));
        }
        if !self.remaining_letters.contains(&letter) {
            return Err(InvalidGuess::Unavailable(letter));
        }
        Ok(letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(word: &str) -> GameState {
        GameState::new(word.chars().collect())
    }

    #[test]
    fn test_new_game_defaults() {
        let state = game("apple");
        assert_eq!(state.teaser(), "_____");
        assert_eq!(state.lives(), MAX_LIVES);
        assert_eq!(state.remaining_letters().len(), 26);
        assert!(state.guess_history().is_empty());
        assert_eq!(state.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_repeated_letter_revealed_in_one_guess() {
        let mut state = game("apple");
        let turn = state.apply_guess("p").unwrap();
        assert!(turn.hit);
        assert_eq!(turn.outcome, Outcome::InProgress);
        assert_eq!(state.teaser(), "_pp__");
        assert_eq!(state.lives(), MAX_LIVES);
    }

    #[test]
    fn test_uppercase_guess_is_normalized() {
        let mut state = game("apple");
        let turn = state.apply_guess("A").unwrap();
        assert_eq!(turn.letter, 'a');
        assert_eq!(state.teaser(), "a____");
        assert_eq!(state.guess_history(), ['a']);
    }

    #[test]
    fn test_miss_costs_a_life() {
        let mut state = game("apple");
        let turn = state.apply_guess("z").unwrap();
        assert!(!turn.hit);
        assert_eq!(state.lives(), MAX_LIVES - 1);
        assert!(!state.remaining_letters().contains(&'z'));
        assert_eq!(state.teaser(), "_____");
    }

    #[test]
    fn test_loss_after_six_misses() {
        let mut state = game("apple");
        for guess in ["z", "x", "q", "j", "v"] {
            let turn = state.apply_guess(guess).unwrap();
            assert_eq!(turn.outcome, Outcome::InProgress);
        }
        let turn = state.apply_guess("w").unwrap();
        assert_eq!(turn.outcome, Outcome::Lost);
        assert_eq!(state.lives(), 0);
        assert_eq!(state.outcome(), Outcome::Lost);
    }

    #[test]
    fn test_win_keeps_all_lives() {
        let mut state = game("cat");
        for guess in ["c", "a"] {
            state.apply_guess(guess).unwrap();
            assert_eq!(state.lives(), MAX_LIVES);
            assert_eq!(state.outcome(), Outcome::InProgress);
        }
        let turn = state.apply_guess("t").unwrap();
        assert_eq!(turn.outcome, Outcome::Won);
        assert_eq!(state.teaser(), "cat");
        assert_eq!(state.lives(), MAX_LIVES);
    }

    #[test]
    fn test_invalid_inputs_do_not_mutate() {
        let mut state = game("apple");
        state.apply_guess("a").unwrap();
        let before = state.clone();

        assert_eq!(
            state.apply_guess(""),
            Err(GuessError::Invalid(InvalidGuess::Empty))
        );
        assert_eq!(
            state.apply_guess("ab"),
            Err(GuessError::Invalid(InvalidGuess::TooLong))
        );
        assert_eq!(
            state.apply_guess("7"),
            Err(GuessError::Invalid(InvalidGuess::NotALetter('7')))
        );
        assert_eq!(
            state.apply_guess("é"),
            Err(GuessError::Invalid(InvalidGuess::Unavailable('é')))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_no_double_guessing() {
        let mut state = game("apple");
        state.apply_guess("p").unwrap();
        state.apply_guess("z").unwrap();
        let before = state.clone();

        assert_eq!(
            state.apply_guess("p"),
            Err(GuessError::Invalid(InvalidGuess::Unavailable('p')))
        );
        assert_eq!(
            state.apply_guess("Z"),
            Err(GuessError::Invalid(InvalidGuess::Unavailable('z')))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let mut state = game("cat");
        for guess in ["c", "a", "t"] {
            state.apply_guess(guess).unwrap();
        }
        let before = state.clone();
        assert_eq!(state.apply_guess("b"), Err(GuessError::AlreadyEnded));
        assert_eq!(state.apply_guess("not a guess"), Err(GuessError::AlreadyEnded));
        assert_eq!(state, before);
    }

    #[test]
    fn test_monotonic_progress() {
        let mut state = game("banana");
        let mut prev_lives = state.lives();
        let mut prev_remaining = state.remaining_letters().len();
        let mut prev_history = state.guess_history().to_vec();

        for guess in ["e", "a", "a", "x", "n", "?", "q", "b"] {
            let _ = state.apply_guess(guess);
            assert!(state.lives() <= prev_lives);
            assert!(state.remaining_letters().len() <= prev_remaining);
            assert!(state.guess_history().starts_with(&prev_history));

            let misses = state
                .guess_history()
                .iter()
                .filter(|c| !state.secret_word().contains(c))
                .count() as u32;
            assert_eq!(state.lives(), MAX_LIVES - misses);

            prev_lives = state.lives();
            prev_remaining = state.remaining_letters().len();
            prev_history = state.guess_history().to_vec();
        }
        assert_eq!(state.outcome(), Outcome::Won);
    }

    #[test]
    fn test_outcome_derive() {
        let word: Vec<char> = "cat".chars().collect();
        assert_eq!(Outcome::derive(&word, &word, 3), Outcome::Won);
        assert_eq!(Outcome::derive(&word, &word, 0), Outcome::Won);
        assert_eq!(Outcome::derive(&word, &['c', '_', 't'], 0), Outcome::Lost);
        assert_eq!(
            Outcome::derive(&word, &['c', '_', 't'], 1),
            Outcome::InProgress
        );
    }
}
