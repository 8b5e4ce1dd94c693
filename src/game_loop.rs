//! Driver loop that connects a `GameInterface` to the engine.

use crate::engine::{GameState, Turn};
use crate::error::{GuessError, InvalidGuess, SaveError, WordSourceError};
use crate::save::{load_game, save_game};
use crate::wordbank::{MAX_WORD_LEN, MIN_WORD_LEN, WordSource};
use crate::{debug_log, info_log};
use std::path::Path;

pub const SAVE_INPUT: &str = "1";
pub const LOAD_INPUT: &str = "2";
pub const NEW_GAME_INPUT: &str = "3";
pub const EXIT_INPUT: &str = "0";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Save,
    Load,
    NewGame,
    Exit,
}

impl UserAction {
    /// Classifies one line of input. Control commands are digits, so they
    /// never collide with a letter guess.
    pub fn from_input(input: &str) -> Self {
        match input.trim() {
            SAVE_INPUT => Self::Save,
            LOAD_INPUT => Self::Load,
            NEW_GAME_INPUT => Self::NewGame,
            EXIT_INPUT => Self::Exit,
            guess => Self::Guess(guess.to_string()),
        }
    }
}

/// Presentation layer used by `game_loop`.
pub trait GameInterface {
    fn display_intro(&mut self);
    fn display_state(&mut self, state: &GameState);
    /// Returns `None` when no complete action was produced yet.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_turn(&mut self, turn: &Turn);
    fn display_invalid_guess(&mut self, reason: &InvalidGuess);
    fn display_outro(&mut self, state: &GameState);
    fn display_saved(&mut self, path: &Path);
    fn display_loaded(&mut self, path: &Path);
    fn display_save_error(&mut self, error: &SaveError);
    /// `error` is a `SaveError::Corrupt` exactly when a fresh game follows.
    fn display_load_error(&mut self, error: &SaveError);
    fn display_new_game(&mut self);
    fn display_exit_message(&mut self);
}

/// Plays games until the player quits, returning the game that was on the
/// table at that point.
///
/// # Errors
///
/// Fails only when the word source cannot supply a word for a new game.
pub fn game_loop<W, I>(
    words: &mut W,
    save_path: Option<&Path>,
    interface: &mut I,
) -> Result<GameState, WordSourceError>
where
    W: WordSource + ?Sized,
    I: GameInterface + ?Sized,
{
    let mut state = new_game(words)?;
    interface.display_intro();
    interface.display_state(&state);

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - Action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                return Ok(state);
            }
            UserAction::NewGame => {
                state = new_game(words)?;
                interface.display_new_game();
                interface.display_state(&state);
            }
            UserAction::Save => {
                match save_path.ok_or(SaveError::Disabled).and_then(|path| {
                    save_game(path, &state)?;
                    Ok(path)
                }) {
                    Ok(path) => interface.display_saved(path),
                    Err(e) => {
                        log::warn!("Save failed: {e}");
                        interface.display_save_error(&e);
                    }
                }
            }
            UserAction::Load => {
                match save_path.ok_or(SaveError::Disabled).and_then(|path| {
                    let loaded = load_game(path)?;
                    Ok((path, loaded))
                }) {
                    Ok((path, loaded)) => {
                        state = loaded;
                        interface.display_loaded(path);
                    }
                    Err(e @ SaveError::Corrupt(_)) => {
                        log::warn!("Load failed, starting a fresh game: {e}");
                        interface.display_load_error(&e);
                        state = new_game(words)?;
                        interface.display_new_game();
                    }
                    Err(e) => {
                        log::warn!("Load failed, keeping the current game: {e}");
                        interface.display_load_error(&e);
                    }
                }
                interface.display_state(&state);
            }
            UserAction::Guess(raw) => match state.apply_guess(&raw) {
                Ok(turn) => {
                    interface.display_turn(&turn);
                    interface.display_state(&state);
                    if turn.outcome.is_finished() {
                        info_log!(
                            "game_loop() - Game over: {:?} with '{}'",
                            turn.outcome,
                            state.secret_word_string()
                        );
                        interface.display_outro(&state);
                    }
                }
                Err(GuessError::Invalid(reason)) => {
                    interface.display_invalid_guess(&reason);
                }
                Err(GuessError::AlreadyEnded) => {
                    interface.display_outro(&state);
                }
            },
        }
    }
}

fn new_game<W: WordSource + ?Sized>(words: &mut W) -> Result<GameState, WordSourceError> {
    let word = words.pick_word(MIN_WORD_LEN, MAX_WORD_LEN)?;
    info_log!("new_game() - Secret word has {} letters", word.len());
    Ok(GameState::new(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Outcome;

    struct FixedWord(&'static str);

    impl WordSource for FixedWord {
        fn pick_word(
            &mut self,
            _min_len: usize,
            _max_len: usize,
        ) -> Result<Vec<char>, WordSourceError> {
            Ok(self.0.chars().collect())
        }
    }

    /// Replays scripted actions and records what the loop asked it to show.
    struct ScriptedInterface {
        actions: Vec<UserAction>,
        events: Vec<String>,
    }

    impl ScriptedInterface {
        fn new(inputs: &[&str]) -> Self {
            Self {
                actions: inputs.iter().rev().map(|i| UserAction::from_input(i)).collect(),
                events: Vec::new(),
            }
        }

        fn count(&self, prefix: &str) -> usize {
            self.events.iter().filter(|e| e.starts_with(prefix)).count()
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_intro(&mut self) {
            self.events.push("intro".to_string());
        }
        fn display_state(&mut self, state: &GameState) {
            self.events.push(format!("state {}", state.teaser()));
        }
        fn read_action(&mut self) -> Option<UserAction> {
            Some(self.actions.pop().unwrap_or(UserAction::Exit))
        }
        fn display_turn(&mut self, turn: &Turn) {
            self.events.push(format!("turn {} {}", turn.letter, turn.hit));
        }
        fn display_invalid_guess(&mut self, _reason: &InvalidGuess) {
            self.events.push("invalid".to_string());
        }
        fn display_outro(&mut self, state: &GameState) {
            self.events.push(format!("outro {:?}", state.outcome()));
        }
        fn display_saved(&mut self, _path: &Path) {
            self.events.push("saved".to_string());
        }
        fn display_loaded(&mut self, _path: &Path) {
            self.events.push("loaded".to_string());
        }
        fn display_save_error(&mut self, _error: &SaveError) {
            self.events.push("save error".to_string());
        }
        fn display_load_error(&mut self, _error: &SaveError) {
            self.events.push("load error".to_string());
        }
        fn display_new_game(&mut self) {
            self.events.push("new game".to_string());
        }
        fn display_exit_message(&mut self) {
            self.events.push("exit".to_string());
        }
    }

    #[test]
    fn test_user_action_from_input() {
        assert_eq!(UserAction::from_input("1"), UserAction::Save);
        assert_eq!(UserAction::from_input(" 2\n"), UserAction::Load);
        assert_eq!(UserAction::from_input("3"), UserAction::NewGame);
        assert_eq!(UserAction::from_input("0"), UserAction::Exit);
        assert_eq!(
            UserAction::from_input("a"),
            UserAction::Guess("a".to_string())
        );
        assert_eq!(
            UserAction::from_input("12"),
            UserAction::Guess("12".to_string())
        );
    }

    #[test]
    fn test_game_loop_win() {
        let mut words = FixedWord("cat");
        let mut ui = ScriptedInterface::new(&["c", "a", "t"]);
        let state = game_loop(&mut words, None, &mut ui).unwrap();
        assert_eq!(state.outcome(), Outcome::Won);
        assert_eq!(ui.count("outro Won"), 1);
        assert_eq!(ui.events.last().map(String::as_str), Some("exit"));
    }

    #[test]
    fn test_game_loop_invalid_input_reprompts() {
        let mut words = FixedWord("cat");
        let mut ui = ScriptedInterface::new(&["", "ca", "9", "c", "c", "0"]);
        let state = game_loop(&mut words, None, &mut ui).unwrap();
        assert_eq!(ui.count("invalid"), 4);
        assert_eq!(state.guess_history(), ['c']);
        assert_eq!(state.lives(), 6);
    }

    #[test]
    fn test_game_loop_guess_after_end_shows_outro() {
        let mut words = FixedWord("cat");
        let mut ui = ScriptedInterface::new(&["c", "a", "t", "x"]);
        let state = game_loop(&mut words, None, &mut ui).unwrap();
        assert_eq!(ui.count("outro Won"), 2);
        assert_eq!(state.lives(), 6);
    }

    #[test]
    fn test_game_loop_new_game_replaces_state() {
        let mut words = FixedWord("cat");
        let mut ui = ScriptedInterface::new(&["z", "3"]);
        let state = game_loop(&mut words, None, &mut ui).unwrap();
        assert_eq!(ui.count("new game"), 1);
        assert!(state.guess_history().is_empty());
        assert_eq!(state.lives(), 6);
    }

    #[test]
    fn test_game_loop_save_disabled() {
        let mut words = FixedWord("cat");
        let mut ui = ScriptedInterface::new(&["1", "2"]);
        game_loop(&mut words, None, &mut ui).unwrap();
        assert_eq!(ui.count("save error"), 1);
        assert_eq!(ui.count("load error"), 1);
        assert_eq!(ui.count("new game"), 0);
    }

    #[test]
    fn test_game_loop_load_from_missing_slot_keeps_game() {
        let path = std::env::temp_dir().join("hangman_game_loop_missing_slot.txt");
        let _ = std::fs::remove_file(&path);

        let mut words = FixedWord("apple");
        let mut ui = ScriptedInterface::new(&["p", "z", "2", "0"]);
        let state = game_loop(&mut words, Some(&path), &mut ui).unwrap();
        assert_eq!(ui.count("load error"), 1);
        assert_eq!(ui.count("new game"), 0);
        assert_eq!(state.guess_history(), ['p', 'z']);
        assert_eq!(state.lives(), 5);
    }

    #[test]
    fn test_game_loop_save_then_load() {
        let path = std::env::temp_dir().join("hangman_game_loop_save_test.txt");
        let _ = std::fs::remove_file(&path);

        let mut words = FixedWord("apple");
        let mut ui = ScriptedInterface::new(&["p", "z", "1", "a", "2"]);
        let state = game_loop(&mut words, Some(&path), &mut ui).unwrap();
        assert_eq!(ui.count("saved"), 1);
        assert_eq!(ui.count("loaded"), 1);
        assert_eq!(state.guess_history(), ['p', 'z']);
        assert_eq!(state.teaser(), "_pp__");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_game_loop_corrupt_save_falls_back_to_fresh_game() {
        let path = std::env::temp_dir().join("hangman_game_loop_corrupt_test.txt");
        std::fs::write(&path, "p,abc,apple\n").unwrap();

        let mut words = FixedWord("apple");
        let mut ui = ScriptedInterface::new(&["e", "2"]);
        let state = game_loop(&mut words, Some(&path), &mut ui).unwrap();
        assert_eq!(ui.count("load error"), 1);
        assert_eq!(ui.count("new game"), 1);
        assert!(state.guess_history().is_empty());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_game_loop_refuses_to_save_finished_game() {
        let path = std::env::temp_dir().join("hangman_game_loop_finished_test.txt");
        let _ = std::fs::remove_file(&path);

        let mut words = FixedWord("cat");
        let mut ui = ScriptedInterface::new(&["c", "a", "t", "1"]);
        game_loop(&mut words, Some(&path), &mut ui).unwrap();
        assert_eq!(ui.count("save error"), 1);
        assert!(!path.exists());
    }

    #[test]
    fn test_game_loop_no_suitable_word() {
        struct Empty;
        impl WordSource for Empty {
            fn pick_word(
                &mut self,
                min_len: usize,
                max_len: usize,
            ) -> Result<Vec<char>, WordSourceError> {
                Err(WordSourceError::NoSuitableWord {
                    min: min_len,
                    max: max_len,
                })
            }
        }

        let mut ui = ScriptedInterface::new(&[]);
        let result = game_loop(&mut Empty, None, &mut ui);
        assert!(matches!(
            result,
            Err(WordSourceError::NoSuitableWord { .. })
        ));
        assert!(ui.events.is_empty());
    }
}
