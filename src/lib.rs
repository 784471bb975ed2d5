// Library interface for ai-hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod game_state;
pub mod llm;
pub mod tui;

// Re-export the pieces callers and tests reach for most
pub use config::Config;
pub use game_state::{
    game_loop, GameInterface, GuessOutcome, Round, RoundStatus, UserAction, STARTING_LIVES,
};
pub use llm::{OpenAiClient, ProviderError, TextProvider};
