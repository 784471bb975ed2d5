use std::io;

use ai_hangman::cli::{parse_cli, CliInterface};
use ai_hangman::config::Config;
use ai_hangman::game_state::game_loop;
use ai_hangman::llm::OpenAiClient;
use ai_hangman::tui::TuiInterface;

fn main() {
    // .env is optional; a missing file is not an error
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = parse_cli();

    let mut config = Config::from_env();
    if let Some(model) = cli.model {
        config.model = model;
    }

    let provider = match OpenAiClient::new(config) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Failed to set up the model client: {e}");
            return;
        }
    };

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&provider, &mut interface);
    } else {
        match TuiInterface::new() {
            Ok(mut interface) => {
                game_loop(&provider, &mut interface);
            }
            Err(e) => {
                eprintln!("Failed to initialize the terminal interface: {e}");
                eprintln!("Try again with --plain for line mode.");
            }
        }
    }
}
