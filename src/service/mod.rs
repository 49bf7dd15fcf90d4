//! Game service abstraction.
//!
//! The server is the authority on rules and on the AI opponent. The client
//! only sees it through [`GameService`], whose every operation answers with a
//! complete, validated [`Board`].

mod http;

pub use http::{GameResponse, HttpGameService, MoveRequest};

use crate::difficulty::Difficulty;
use crate::error::GameServiceError;
use tictac_meow_board::{Board, Coord};

/// Remote capability that owns the authoritative game.
#[async_trait::async_trait]
pub trait GameService: Send + Sync {
    /// Returns the current game. Idempotent.
    async fn fetch_state(&self) -> Result<Board, GameServiceError>;

    /// Resets to an empty board with X to move.
    async fn start_new_game(&self) -> Result<Board, GameServiceError>;

    /// Plays a move for the current player.
    ///
    /// Fails with `InvalidMove` when the server considers the move illegal.
    async fn submit_move(&self, coord: Coord) -> Result<Board, GameServiceError>;

    /// Lets the server pick and play a move for the current player.
    ///
    /// Fails with `AiMove` when the AI turn cannot be played.
    async fn request_ai_move(&self, difficulty: Difficulty) -> Result<Board, GameServiceError>;
}
