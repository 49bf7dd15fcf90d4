//! Tic Tac Meow - terminal tic-tac-toe against a server-hosted AI
//!
//! The game server owns the rules and the AI opponent. This crate is the
//! client side: it validates what the server sends, sequences the player's
//! move and the AI's reply, and renders the result.
//!
//! # Architecture
//!
//! - **Service**: [`GameService`] abstracts the server; [`HttpGameService`] speaks its REST API
//! - **Session**: [`Session`] is the sans-IO turn state machine
//! - **Orchestrator**: [`Orchestrator`] drives a session against a service
//! - **TUI**: [`run_tui`] renders snapshots and forwards key presses as [`Intent`]s
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tictac_meow::{HttpGameService, Orchestrator, OrchestratorSettings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = HttpGameService::new("http://127.0.0.1:3000", Duration::from_secs(10))?;
//! let mut orchestrator = Orchestrator::new(Arc::new(service), OrchestratorSettings::default());
//!
//! orchestrator.start().await;
//! orchestrator.attempt_move(1, 1).await;
//! println!("{}", orchestrator.session().message());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod difficulty;
mod error;
mod orchestrator;
mod service;
mod session;
mod tui;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, SERVER_URL_ENV};

// Crate-level exports - Difficulty
pub use difficulty::Difficulty;

// Crate-level exports - Errors
pub use error::{GameServiceError, GameServiceErrorKind};

// Crate-level exports - Orchestration
pub use orchestrator::{Intent, Orchestrator, OrchestratorSettings};
pub use session::{status_message, Phase, ServiceCall, Session, Snapshot};

// Crate-level exports - Game service
pub use service::{GameResponse, GameService, HttpGameService, MoveRequest};

// Crate-level exports - Terminal UI
pub use tui::run_tui;

// Crate-level exports - Board types
pub use tictac_meow_board::{
    is_cell_playable, line_for, winning_line, Board, Cell, Coord, GameStatus, MalformedStateError,
    Player, RawBoard, RawStatus, WinLine, BOARD_SIZE, LINES,
};
