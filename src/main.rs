use hangman::cli::{CliInterface, parse_cli};
use hangman::logging;
use hangman::save::default_save_path;
use hangman::tui::TuiInterface;
use hangman::wordbank::{
    EMBEDDED_WORDBANK, WordBank, load_wordbank_from_file, load_wordbank_from_str,
};
use hangman::{GameInterface, game_loop};
use std::io;

fn main() {
    let cli = parse_cli();

    if let Some(log_path) = logging::default_log_path()
        && let Err(e) = logging::init(&log_path)
    {
        eprintln!("Logging disabled, cannot open '{}': {e}", log_path.display());
    }

    let words = match &cli.wordbank_path {
        Some(path) => match load_wordbank_from_file(path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Failed to load word bank from '{path}': {e}");
                return;
            }
        },
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };
    log::info!("Loaded {} words", words.len());

    let mut word_bank = match cli.seed {
        Some(seed) => WordBank::with_seed(words, seed),
        None => WordBank::new(words),
    };

    let save_path = if cli.no_save {
        None
    } else {
        cli.save_path.clone().or_else(default_save_path)
    };

    let mut interface: Box<dyn GameInterface> = if cli.tui {
        match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                return;
            }
        }
    } else {
        Box::new(CliInterface::new(io::stdin().lock()))
    };

    if let Err(e) = game_loop(&mut word_bank, save_path.as_deref(), interface.as_mut()) {
        drop(interface);
        log::warn!("Game ended with error: {e}");
        eprintln!("{e}");
    }
}
