//! Game service error types.

use derive_more::{Display, Error};
use tictac_meow_board::MalformedStateError;

/// What went wrong talking to the game service.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameServiceErrorKind {
    /// The service could not be reached or answered unexpectedly.
    #[display("Transport error: {}", _0)]
    Transport(String),
    /// The service rejected a move the client considered legal.
    #[display("Invalid move: {}", _0)]
    InvalidMove(String),
    /// The service failed to play the AI's turn.
    #[display("AI move failed: {}", _0)]
    AiMove(String),
    /// The response did not describe a valid board.
    #[display("Malformed state: {}", _0)]
    MalformedState(String),
}

/// Game service error with location tracking.
///
/// Every kind is recoverable: the orchestrator keeps its last good board and
/// reports a message instead.
#[derive(Debug, Clone, Display, Error)]
#[display("Game service error: {} at {}:{}", kind, file, line)]
pub struct GameServiceError {
    /// Error kind.
    pub kind: GameServiceErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameServiceError {
    /// Creates a new game service error with caller location tracking.
    #[track_caller]
    pub fn new(kind: GameServiceErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates a transport error.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(GameServiceErrorKind::Transport(message.into()))
    }

    /// Creates an invalid move error.
    #[track_caller]
    pub fn invalid_move(message: impl Into<String>) -> Self {
        Self::new(GameServiceErrorKind::InvalidMove(message.into()))
    }

    /// Creates an AI move error.
    #[track_caller]
    pub fn ai_move(message: impl Into<String>) -> Self {
        Self::new(GameServiceErrorKind::AiMove(message.into()))
    }

    /// Creates a malformed state error.
    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(GameServiceErrorKind::MalformedState(message.into()))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameServiceErrorKind {
        &self.kind
    }
}

impl From<MalformedStateError> for GameServiceError {
    #[track_caller]
    fn from(err: MalformedStateError) -> Self {
        Self::malformed(err.message)
    }
}

impl From<reqwest::Error> for GameServiceError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::transport(format!("HTTP request failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_caller_location() {
        let err = GameServiceError::invalid_move("cell taken");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().contains("Invalid move: cell taken"));
    }

    #[test]
    fn test_malformed_state_converts() {
        let err: GameServiceError = MalformedStateError::new("expected 3 rows, found 2").into();
        assert_eq!(
            err.kind(),
            &GameServiceErrorKind::MalformedState("expected 3 rows, found 2".to_string())
        );
    }
}
