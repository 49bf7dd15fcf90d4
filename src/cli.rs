//! Command-line interface for tictac_meow.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictac_meow::Difficulty;

/// Tic Tac Meow - tic-tac-toe against a server-hosted AI
#[derive(Parser, Debug)]
#[command(name = "tictac_meow")]
#[command(about = "Play tic-tac-toe against a server-hosted AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Game server URL (overrides config and environment)
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// AI difficulty (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Pause before each AI move, in milliseconds
        #[arg(long)]
        ai_delay_ms: Option<u64>,
    },

    /// Print the server's current game and exit
    Show,
}
