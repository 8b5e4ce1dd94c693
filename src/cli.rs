use crate::engine::{GameState, Outcome, Turn};
use crate::error::{InvalidGuess, SaveError};
use crate::game_loop::{
    EXIT_INPUT, GameInterface, LOAD_INPUT, NEW_GAME_INPUT, SAVE_INPUT, UserAction,
};
use clap::Parser;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Hangman: guess the secret word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a whitespace-delimited word list
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Save slot used by the save and load commands
    #[arg(short = 's', long = "save-file")]
    pub save_path: Option<PathBuf>,

    /// Disable saving and loading
    #[arg(long = "no-save", conflicts_with = "save_path")]
    pub no_save: bool,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Seed for choosing the secret word
    #[arg(long)]
    pub seed: Option<u64>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub fn format_history(history: &[char]) -> String {
    let letters: Vec<String> = history.iter().map(char::to_string).collect();
    format!("[{}]", letters.join(", "))
}

pub fn format_teaser(revealed: &[char]) -> String {
    revealed
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn display_intro() {
    println!("Please enter a character.");
    println!(
        "Commands: {SAVE_INPUT} = save, {LOAD_INPUT} = load, {NEW_GAME_INPUT} = new game, {EXIT_INPUT} = quit"
    );
}

pub fn display_state(state: &GameState) {
    println!("\nInput history: {}", format_history(state.guess_history()));
    println!("Remaining life: {}.", state.lives());
    println!("{}\n", format_teaser(state.revealed()));
}

/// Reads one line. End of input or a read error counts as quitting.
pub fn read_action<R: BufRead>(reader: &mut R) -> UserAction {
    println!("Enter a letter:");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => UserAction::Exit,
        Ok(_) => UserAction::from_input(&input),
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            UserAction::Exit
        }
    }
}

pub fn display_turn(turn: &Turn) {
    if turn.hit {
        println!("'{}' is in the word.", turn.letter);
    } else {
        println!("No '{}' in the word.", turn.letter);
    }
}

pub fn display_invalid_guess(reason: &InvalidGuess) {
    println!("Invalid input, please try again. ({reason})");
}

pub fn display_outro(state: &GameState) {
    match state.outcome() {
        Outcome::Lost => {
            println!("The answer is {}.", state.secret_word_string());
            println!("Better luck next time.");
        }
        Outcome::Won => println!("Congratulations, you win the game."),
        Outcome::InProgress => {}
    }
    println!("Enter {NEW_GAME_INPUT} for a new game, {LOAD_INPUT} to load, or {EXIT_INPUT} to quit.");
}

pub fn display_saved(path: &Path) {
    println!("Game saved to {}.", path.display());
}

pub fn display_loaded(path: &Path) {
    println!("Game loaded from {}.", path.display());
}

pub fn save_error_message(error: &SaveError) -> String {
    format!("Could not save: {error}.")
}

pub fn load_error_message(error: &SaveError) -> String {
    match error {
        SaveError::Corrupt(_) => format!("Could not load: {error}. Starting a fresh game instead."),
        SaveError::Io(_) => format!("Could not load: {error}. Continuing the current game."),
        SaveError::Disabled | SaveError::GameFinished => format!("Could not load: {error}."),
    }
}

pub fn display_save_error(error: &SaveError) {
    println!("{}", save_error_message(error));
}

pub fn display_load_error(error: &SaveError) {
    println!("{}", load_error_message(error));
}

pub fn display_new_game_message() {
    println!("New game started.");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the `GameInterface` trait
/// This struct wraps a `BufRead` reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_intro(&mut self) {
        display_intro();
    }

    fn display_state(&mut self, state: &GameState) {
        display_state(state);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        Some(read_action(&mut self.reader))
    }

    fn display_turn(&mut self, turn: &Turn) {
        display_turn(turn);
    }

    fn display_invalid_guess(&mut self, reason: &InvalidGuess) {
        display_invalid_guess(reason);
    }

    fn display_outro(&mut self, state: &GameState) {
        display_outro(state);
    }

    fn display_saved(&mut self, path: &Path) {
        display_saved(path);
    }

    fn display_loaded(&mut self, path: &Path) {
        display_loaded(path);
    }

    fn display_save_error(&mut self, error: &SaveError) {
        display_save_error(error);
    }

    fn display_load_error(&mut self, error: &SaveError) {
        display_load_error(error);
    }

    fn display_new_game(&mut self) {
        display_new_game_message();
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
