//! REST client for the tic tac meow game server.

use super::GameService;
use crate::difficulty::Difficulty;
use crate::error::GameServiceError;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tictac_meow_board::{Board, Coord, RawBoard};
use tracing::{debug, error, info, instrument, warn};

/// Body of every game endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponse {
    /// The game after the request was applied.
    pub board: RawBoard,
    /// Server-composed status line.
    #[serde(default)]
    pub message: String,
}

/// Body of a move submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Row index (0-2).
    pub row: usize,
    /// Column index (0-2).
    pub col: usize,
}

impl From<Coord> for MoveRequest {
    fn from(coord: Coord) -> Self {
        Self {
            row: coord.row(),
            col: coord.col(),
        }
    }
}

/// HTTP client for the game server's REST API.
#[derive(Debug, Clone)]
pub struct HttpGameService {
    /// Base URL of game server, without trailing slash.
    base_url: String,
    /// HTTP client.
    client: reqwest::Client,
}

impl HttpGameService {
    /// Creates a client with a per-request timeout.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, GameServiceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        info!(?timeout, "Created game service client");
        Ok(Self::with_client(base_url, client))
    }

    /// Creates a service around an existing client.
    pub fn with_client(base_url: impl AsRef<str>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Returns the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes and validates a successful response body.
    async fn read_board(response: Response) -> Result<Board, GameServiceError> {
        let text = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            GameServiceError::transport(format!("Failed to read response: {}", e))
        })?;

        let body: GameResponse = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, response = %text, "Response is not a game payload");
            GameServiceError::malformed(format!("Invalid JSON response: {}", e))
        })?;

        debug!(message = %body.message, "Server message");
        Ok(Board::try_from(body.board)?)
    }
}

#[async_trait::async_trait]
impl GameService for HttpGameService {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_state(&self) -> Result<Board, GameServiceError> {
        debug!("Fetching game state");

        let response = self.client.get(self.url("/api/game")).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Fetch failed");
            return Err(GameServiceError::transport(format!("HTTP {}", status)));
        }

        Self::read_board(response).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn start_new_game(&self) -> Result<Board, GameServiceError> {
        info!("Starting new game");

        let response = self.client.post(self.url("/api/game")).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "New game failed");
            return Err(GameServiceError::transport(format!("HTTP {}", status)));
        }

        Self::read_board(response).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn submit_move(&self, coord: Coord) -> Result<Board, GameServiceError> {
        info!("Sending move to server");

        let response = self
            .client
            .post(self.url("/api/game/move"))
            .json(&MoveRequest::from(coord))
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            warn!(%status, "Server rejected move");
            return Err(GameServiceError::invalid_move(format!(
                "server rejected move at {} (HTTP {})",
                coord, status
            )));
        }
        if !status.is_success() {
            warn!(%status, "Move failed");
            return Err(GameServiceError::transport(format!("HTTP {}", status)));
        }

        Self::read_board(response).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn request_ai_move(&self, difficulty: Difficulty) -> Result<Board, GameServiceError> {
        info!("Requesting AI move");

        let response = self
            .client
            .post(self.url(&format!("/api/game/ai-move/{}", difficulty)))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "AI move failed");
            return Err(GameServiceError::ai_move(format!("HTTP {}", status)));
        }

        Self::read_board(response).await
    }
}
