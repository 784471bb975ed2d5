use crate::game_state::{GameInterface, GuessOutcome, Round, RoundStatus, UserAction};
use clap::Parser;
use std::io::BufRead;

/// AI Hangman CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run in plain line mode instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Model used for word and hint generation
    #[arg(short, long)]
    pub model: Option<String>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Line-mode input/output. All guess validation lives in the reducer; this
// layer only separates the command words from everything else.

fn parse_action(input: &str) -> Option<UserAction> {
    let trimmed = input.trim();
    match trimmed.to_lowercase().as_str() {
        "" => None,
        "exit" | "quit" => Some(UserAction::Exit),
        "new" | "restart" => Some(UserAction::NewGame),
        "hint" => Some(UserAction::Hint),
        _ => Some(UserAction::Guess(trimmed.to_string())),
    }
}

pub fn display_round(round: &Round) {
    println!("\nWord: {}", round.masked());
    println!("Guessed letters: {}", round.guessed_display());
    println!("Lives left: {}", round.lives());
    if let Some(hint) = round.hint() {
        println!("Hint: {hint}");
    }
}

pub fn display_banner(round: &Round) {
    match round.status() {
        RoundStatus::Won => println!("You won! The word was '{}'.", round.word()),
        RoundStatus::Lost => println!("Game over! The word was '{}'.", round.word()),
        RoundStatus::InProgress => {}
    }
}

/// Line-mode implementation of the game interface over any reader, which is
/// what the integration tests script with a `Cursor`.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_action(&mut self, round: Option<&Round>) -> Option<UserAction> {
        match round {
            Some(r) if !r.is_over() => {
                display_round(r);
                println!("Type a letter and press Enter ('hint', 'new', 'exit'):");
            }
            Some(_) => {
                println!("Type 'new' for another word or 'exit' to quit:");
            }
            None => {
                println!("No word available. Type 'new' to retry or 'exit' to quit:");
            }
        }

        // Out of input means the script/pipe is done; leave cleanly.
        let Some(line) = self.read_line() else {
            return Some(UserAction::Exit);
        };
        parse_action(&line)
    }

    fn notify_outcome(&mut self, _outcome: GuessOutcome, round: &Round) {
        // Invalid and repeated input stays silent; the re-rendered state is
        // the feedback for ordinary hits and misses.
        if round.is_over() {
            display_banner(round);
        }
    }

    fn notify_busy(&mut self, message: &str) {
        println!("{message}");
    }

    fn notify_error(&mut self, message: &str) {
        println!("{message}");
    }

    fn notify_exit(&mut self) {
        println!("Exiting.");
    }
}
