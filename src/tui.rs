//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: rendering and key handling, implements `GameInterface`
//!
//! # State Machine
//! - `Playing` → `GameOver` when a guess wins or loses
//! - `GameOver` → `Playing` on new game or a successful load
//! - any state → `Exiting` on ESC or `0`

use crate::engine::{GameState, MAX_LIVES, Outcome, Turn};
use crate::error::{InvalidGuess, SaveError};
use crate::game_loop::{
    EXIT_INPUT, GameInterface, LOAD_INPUT, NEW_GAME_INPUT, SAVE_INPUT, UserAction,
};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::path::Path;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

// One drawing per number of misses.
const GALLOWS: [[&str; 6]; 7] = [
    ["  +---+", "  |   |", "      |", "      |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", "      |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", "  |   |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|   |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", " /    |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", " / \\  |", "========="],
];

fn message_style(outcome: Outcome) -> Style {
    match outcome {
        Outcome::Won => SUCCESS_STYLE,
        Outcome::Lost => ERROR_STYLE,
        Outcome::InProgress => MESSAGE_STYLE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    Playing,
    GameOver,
    Exiting,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    teaser: &'a [char],
    history: &'a [char],
    remaining: &'a [char],
    lives: u32,
    outcome: Outcome,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    teaser: Vec<char>,
    history: Vec<char>,
    remaining: Vec<char>,
    lives: u32,
    outcome: Outcome,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            teaser: Vec::new(),
            history: Vec::new(),
            remaining: Vec::new(),
            lives: MAX_LIVES,
            outcome: Outcome::InProgress,
            state: TuiState::Playing,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    ///
    /// Returns an error if rendering fails.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            teaser: &self.teaser,
            history: &self.history,
            remaining: &self.remaining,
            lives: self.lives,
            outcome: self.outcome,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        let state = self.state;
        self.terminal.draw(|f| {
            Self::render_static(f, &ctx, state);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext, state: TuiState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(11), // Gallows and teaser
                Constraint::Min(6),     // Info panel
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx.teaser, ctx.lives);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, teaser: &[char], lives: u32) {
        let misses = (MAX_LIVES.saturating_sub(lives) as usize).min(GALLOWS.len() - 1);
        let mut lines: Vec<Line> = GALLOWS[misses].iter().map(|row| Line::from(*row)).collect();
        lines.push(Line::from(""));

        let mut spans = vec![Span::raw("  ")];
        for &c in teaser {
            spans.push(Span::styled(
                format!(" {} ", c.to_ascii_uppercase()),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Word").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let letters = |chars: &[char]| {
            chars
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Input history: ", HEADER_STYLE),
                Span::raw(letters(ctx.history)),
            ]),
            Line::from(vec![
                Span::styled("Remaining life: ", HEADER_STYLE),
                Span::styled(ctx.lives.to_string(), INFO_STYLE),
            ]),
            Line::from(vec![
                Span::styled("Letters left: ", HEADER_STYLE),
                Span::raw(letters(ctx.remaining)),
            ]),
            Line::from(""),
        ];

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                ctx.message,
                message_style(ctx.outcome),
            )]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                ctx.error_message,
                ERROR_STYLE,
            )]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Playing => format!(
                "Type a letter to guess | {SAVE_INPUT}: Save | {LOAD_INPUT}: Load | {NEW_GAME_INPUT}: New | {EXIT_INPUT}/ESC: Quit"
            ),
            TuiState::GameOver => {
                format!("{NEW_GAME_INPUT}: New Game | {LOAD_INPUT}: Load | {EXIT_INPUT}/ESC: Quit")
            }
            TuiState::Exiting => "Exiting...".to_string(),
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                Ok(self.handle_key(key))
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        if Self::has_modifier_keys(&key) {
            debug_log!(
                "handle_key() - Ignoring key with modifier: {:?}",
                key.modifiers
            );
            return None;
        }

        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                match UserAction::from_input(&c.to_string()) {
                    UserAction::Guess(_) => {
                        self.error_message = format!("'{c}' is not a command");
                        None
                    }
                    action => Some(action),
                }
            }
            KeyCode::Char(c) if c.is_alphabetic() => {
                self.error_message.clear();
                Some(UserAction::Guess(c.to_string()))
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                None
            }
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }
}

impl GameInterface for TuiInterface {
    fn display_intro(&mut self) {
        self.message = "Please enter a character.".to_string();
        self.draw_or_log();
    }

    fn display_state(&mut self, state: &GameState) {
        self.teaser = state.revealed().to_vec();
        self.history = state.guess_history().to_vec();
        self.remaining = state.remaining_letters().iter().copied().collect();
        self.lives = state.lives();
        self.outcome = state.outcome();
        self.state = if state.is_in_progress() {
            TuiState::Playing
        } else {
            TuiState::GameOver
        };
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        if self.draw().is_err() {
            info_log!("read_action() - Draw failed, returning Exit");
            return Some(UserAction::Exit);
        }
        match self.handle_input() {
            Ok(action) => action,
            Err(e) => {
                log::warn!("Error reading terminal input: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_turn(&mut self, turn: &Turn) {
        self.error_message.clear();
        self.status = if turn.hit {
            format!("'{}' is in the word", turn.letter)
        } else {
            format!("No '{}' in the word", turn.letter)
        };
    }

    fn display_invalid_guess(&mut self, reason: &InvalidGuess) {
        self.error_message = format!("Invalid input, please try again. ({reason})");
        self.draw_or_log();
    }

    fn display_outro(&mut self, state: &GameState) {
        self.state = TuiState::GameOver;
        self.outcome = state.outcome();
        match state.outcome() {
            Outcome::Lost => {
                self.message = format!(
                    "The answer is {}. Better luck next time.",
                    state.secret_word_string()
                );
                self.status = "Game Over - Lost".to_string();
            }
            Outcome::Won => {
                self.message = "Congratulations, you win the game.".to_string();
                self.status = "Game Over - Won".to_string();
            }
            Outcome::InProgress => {}
        }
        self.draw_or_log();
    }

    fn display_saved(&mut self, path: &Path) {
        self.status = format!("Game saved to {}", path.display());
        self.draw_or_log();
    }

    fn display_loaded(&mut self, path: &Path) {
        self.message.clear();
        self.error_message.clear();
        self.status = format!("Game loaded from {}", path.display());
    }

    fn display_save_error(&mut self, error: &SaveError) {
        self.error_message = format!("Could not save: {error}");
        self.draw_or_log();
    }

    fn display_load_error(&mut self, error: &SaveError) {
        self.error_message = match error {
            SaveError::Corrupt(_) => format!("Could not load: {error}. Starting a fresh game."),
            _ => format!("Could not load: {error}"),
        };
        self.draw_or_log();
    }

    fn display_new_game(&mut self) {
        self.message = "New game started.".to_string();
        self.status = "New game - Enter your first guess".to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.state = TuiState::Exiting;
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_message_is_not_drawn_as_success() {
        assert_eq!(message_style(Outcome::Lost), ERROR_STYLE);
        assert_ne!(message_style(Outcome::Lost), SUCCESS_STYLE);
        assert_eq!(message_style(Outcome::Won), SUCCESS_STYLE);
        assert_eq!(message_style(Outcome::InProgress), MESSAGE_STYLE);
    }

    #[test]
    fn test_gallows_has_one_drawing_per_miss() {
        assert_eq!(GALLOWS.len(), MAX_LIVES as usize + 1);
    }
}
