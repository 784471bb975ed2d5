//! Full-screen terminal interface for the hangman game, built on Ratatui.
//!
//! The interface renders `Round` snapshots and turns key presses into
//! [`UserAction`]s; every game decision stays in `game_state`.
//!
//! # Key map
//! - letter: stage it in the entry box, ENTER commits it as a guess
//! - `?`: ask the model for a hint
//! - TAB (or `n` once the round is over): start a new round
//! - ESC: quit

use crate::game_state::{GameInterface, GuessOutcome, Round, RoundStatus, UserAction, STARTING_LIVES};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const HINT_STYLE: Style = Style::new().fg(Color::Yellow);
const LIVES_STYLE: Style = Style::new().fg(Color::Red);
const SPENT_LIVES_STYLE: Style = Style::new().fg(Color::DarkGray);

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    /// Round in progress, letter entry active.
    Playing,
    /// A provider call is in flight; input is not read.
    Busy,
    /// Round finished, waiting for restart or quit.
    GameOver,
    /// No word could be fetched; waiting for retry or quit.
    NoRound,
}

/// Groups the borrowed pieces the render functions need.
struct RenderContext<'a> {
    round: Option<&'a Round>,
    input: &'a str,
    state: TuiState,
    status: &'a str,
    error_message: &'a str,
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    round: Option<Round>,
    input: String,
    state: TuiState,
    status: String,
    error_message: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        log::info!("terminal interface initialized");

        Ok(Self {
            terminal,
            round: None,
            input: String::new(),
            state: TuiState::NoRound,
            status: "Starting...".to_string(),
            error_message: String::new(),
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

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            round: self.round.as_ref(),
            input: &self.input,
            state: self.state,
            status: &self.status,
            error_message: &self.error_message,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            log::debug!("draw error: {e}");
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(6), // Word and letter entry
                Constraint::Min(8),    // Guessed letters, lives, hint, banner
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_word(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("AI HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_word(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        match ctx.round {
            Some(round) => {
                lines.push(Line::from(Span::styled(round.masked(), WORD_STYLE)));
                lines.push(Line::from(""));
                if ctx.state == TuiState::Playing {
                    let staged = if ctx.input.is_empty() { "_" } else { ctx.input };
                    lines.push(Line::from(format!("Your letter: [{staged}]")));
                }
            }
            None => {
                lines.push(Line::from("No word yet."));
            }
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Word").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(round) = ctx.round {
            lines.push(Line::from(vec![
                Span::raw("Guessed: "),
                Span::raw(round.guessed_display()),
            ]));
            lines.push(Self::lives_line(round.lives()));
            lines.push(Line::from(""));

            if let Some(hint) = round.hint() {
                lines.push(Line::from(Span::styled(format!("Hint: {hint}"), HINT_STYLE)));
                lines.push(Line::from(""));
            }

            match round.status() {
                RoundStatus::Won => lines.push(Line::from(Span::styled(
                    format!("You won! The word was '{}'.", round.word()),
                    SUCCESS_STYLE,
                ))),
                RoundStatus::Lost => lines.push(Line::from(Span::styled(
                    format!("Game over! The word was '{}'.", round.word()),
                    ERROR_STYLE,
                ))),
                RoundStatus::InProgress => {}
            }
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Round").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn lives_line(lives: u8) -> Line<'static> {
        let full = "\u{2665} ".repeat(lives as usize);
        let spent = "\u{2661} ".repeat((STARTING_LIVES - lives.min(STARTING_LIVES)) as usize);
        Line::from(vec![
            Span::raw("Lives:   "),
            Span::styled(full, LIVES_STYLE),
            Span::styled(spent, SPENT_LIVES_STYLE),
            Span::raw(format!(" {lives}/{STARTING_LIVES}")),
        ])
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Playing => {
                "Type a letter | ENTER: Guess | ?: Hint | TAB: New word | ESC: Quit"
            }
            TuiState::Busy => "Contacting the model...",
            TuiState::GameOver => "N: New word | ?: Hint | ESC: Quit",
            TuiState::NoRound => "N: Retry fetch | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let key = match event::read()? {
            Event::Key(key) => key,
            other => {
                log::debug!("ignoring non-key event: {other:?}");
                return Ok(None);
            }
        };

        // Only Press events; Release and Repeat would double input.
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Terminal focus changes (alt-tab) can leak replacement or control
        // characters through as key events.
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            log::debug!("ignoring stray control character: {c:?}");
            return Ok(None);
        }

        if Self::has_modifier_keys(&key) {
            log::debug!("ignoring chord with modifiers: {:?}", key.modifiers);
            return Ok(None);
        }

        match self.state {
            TuiState::Playing => Ok(self.handle_playing_key(key)),
            TuiState::GameOver | TuiState::NoRound => Ok(Self::handle_idle_key(key)),
            TuiState::Busy => Ok(None),
        }
    }

    fn handle_playing_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('?') => Some(UserAction::Hint),
            KeyCode::Tab => Some(UserAction::NewGame),
            KeyCode::Esc => Some(UserAction::Exit),
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                // the entry box holds exactly one letter
                self.input.clear();
                self.input.push(c.to_ascii_lowercase());
                None
            }
            KeyCode::Backspace => {
                self.input.clear();
                None
            }
            KeyCode::Enter if !self.input.is_empty() => {
                let guess = std::mem::take(&mut self.input);
                Some(UserAction::Guess(guess))
            }
            _ => {
                log::debug!("ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn handle_idle_key(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') | KeyCode::Tab => Some(UserAction::NewGame),
            KeyCode::Char('?') => Some(UserAction::Hint),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }
}

impl GameInterface for TuiInterface {
    fn read_action(&mut self, round: Option<&Round>) -> Option<UserAction> {
        self.round = round.cloned();
        self.state = match round {
            None => TuiState::NoRound,
            Some(r) if r.is_over() => TuiState::GameOver,
            Some(_) => TuiState::Playing,
        };
        if self.state != TuiState::Playing {
            self.input.clear();
        }

        loop {
            if self.draw().is_err() {
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    log::debug!("action: {action:?}");
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    log::debug!("input error: {e}");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn notify_outcome(&mut self, outcome: GuessOutcome, round: &Round) {
        self.round = Some(round.clone());
        self.error_message.clear();

        let last = round.guessed().last().copied().unwrap_or('?');
        match outcome {
            GuessOutcome::Hit => self.status = format!("'{last}' is in the word!"),
            GuessOutcome::Miss => self.status = format!("No '{last}' in the word."),
            // No state changed; keep the previous status.
            GuessOutcome::Repeat | GuessOutcome::Rejected | GuessOutcome::Finished => {}
        }

        if round.is_over() {
            self.state = TuiState::GameOver;
            self.status = match round.status() {
                RoundStatus::Won => "Round won".to_string(),
                RoundStatus::Lost => "Round lost".to_string(),
                RoundStatus::InProgress => self.status.clone(),
            };
        }
        self.draw_or_log();
    }

    fn notify_busy(&mut self, message: &str) {
        self.state = TuiState::Busy;
        self.status = message.to_string();
        self.error_message.clear();
        self.draw_or_log();
    }

    fn notify_error(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.status = "Provider call failed".to_string();
        self.draw_or_log();
    }

    fn notify_exit(&mut self) {
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
