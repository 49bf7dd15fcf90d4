//! Tic Tac Meow - terminal client
//!
//! Plays tic-tac-toe against the AI hosted by a tic tac meow game server.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tictac_meow::{status_message, winning_line, ClientConfig, GameService, HttpGameService};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(server_url) = cli.server_url {
        config = config.with_server_url(server_url);
    }

    match cli.command.unwrap_or(Command::Play {
        difficulty: None,
        ai_delay_ms: None,
    }) {
        Command::Play {
            difficulty,
            ai_delay_ms,
        } => {
            if let Some(difficulty) = difficulty {
                config = config.with_difficulty(difficulty);
            }
            if let Some(ai_delay_ms) = ai_delay_ms {
                config = config.with_ai_delay_ms(ai_delay_ms);
            }
            config.validate()?;
            tictac_meow::run_tui(config).await
        }
        Command::Show => {
            config.validate()?;
            show(config).await
        }
    }
}

/// Print the server's current game
#[instrument(skip_all, fields(server_url = %config.server_url()))]
async fn show(config: ClientConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let service = HttpGameService::new(config.server_url(), config.request_timeout())?;
    let board = service.fetch_state().await?;
    info!(status = %board.status(), "Fetched game");

    println!("{}\n", board);
    println!("{}", status_message(&board));
    if let Some(line) = winning_line(&board) {
        let cells: Vec<String> = line.coords().iter().map(ToString::to_string).collect();
        println!("Winning line: {}", cells.join(" "));
    }

    Ok(())
}
