// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod error;
pub mod game_loop;
pub mod logging;
pub mod save;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{GameState, MAX_LIVES, Outcome, Turn};
pub use error::{CorruptSave, GuessError, InvalidGuess, SaveError, WordSourceError};
pub use game_loop::{GameInterface, UserAction, game_loop};
pub use save::{SaveRecord, decode, decode_str, encode, load_game, save_game};
pub use wordbank::{
    EMBEDDED_WORDBANK, WordBank, WordSource, load_wordbank_from_file, load_wordbank_from_str,
};
