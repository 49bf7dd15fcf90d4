//! Turn-sequencing state machine.
//!
//! [`Session`] holds everything the renderer shows and decides, for each user
//! intent or service response, what happens next. It performs no IO: the
//! `begin_*` methods return the [`ServiceCall`] to issue (or `None` when the
//! intent is dropped), and [`Session::resolve`] consumes the outcome of that
//! call and may hand back a follow-up call (the AI turn).
//!
//! At most one call is in flight. While one is, the session is busy and every
//! `begin_*` method refuses.

use crate::difficulty::Difficulty;
use crate::error::{GameServiceError, GameServiceErrorKind};
use derive_getters::Getters;
use derive_more::Display;
use tictac_meow_board::{winning_line, Board, Coord, GameStatus, WinLine};
use tracing::{debug, info, instrument, warn};

/// Where the session is in the turn pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Phase {
    /// No board loaded yet.
    Idle,
    /// Board loaded, waiting for the player.
    Ready,
    /// Player's move sent, waiting for the server.
    SubmittingMove,
    /// Player's move accepted, AI turn pending.
    AwaitingAi,
    /// Game over (win or draw).
    Terminal,
}

/// A request the session wants issued to the game service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ServiceCall {
    /// Load the current game.
    FetchState,
    /// Reset the game.
    StartNewGame,
    /// Play the player's move.
    #[display("SubmitMove{_0}")]
    SubmitMove(Coord),
    /// Play the AI's move.
    #[display("RequestAiMove({_0})")]
    RequestAiMove(Difficulty),
}

/// Read-only copy of the session for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Snapshot {
    /// Latest known-good board.
    board: Board,
    /// Pipeline phase.
    phase: Phase,
    /// Whether a service call is outstanding.
    busy: bool,
    /// Status line.
    message: String,
    /// Cells to highlight when the game is won.
    highlighted_line: Option<WinLine>,
    /// Difficulty the next AI turn will use.
    difficulty: Difficulty,
}

/// Session state owned by the orchestrator.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    phase: Phase,
    message: String,
    highlighted_line: Option<WinLine>,
    in_flight: Option<ServiceCall>,
}

impl Session {
    /// Creates a session with no board loaded.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Idle,
            message: "Loading game...".to_string(),
            highlighted_line: None,
            in_flight: None,
        }
    }

    /// Returns the latest known-good board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the pipeline phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the status line.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the winning line to highlight, if any.
    pub fn highlighted_line(&self) -> Option<WinLine> {
        self.highlighted_line
    }

    /// Returns the outstanding service call, if any.
    pub fn in_flight(&self) -> Option<ServiceCall> {
        self.in_flight
    }

    /// Checks whether a service call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Copies the session for rendering.
    pub fn snapshot(&self, difficulty: Difficulty) -> Snapshot {
        Snapshot {
            board: self.board,
            phase: self.phase,
            busy: self.is_busy(),
            message: self.message.clone(),
            highlighted_line: self.highlighted_line,
            difficulty,
        }
    }

    /// Loads (or reloads) the server's current game.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn begin_fetch(&mut self) -> Option<ServiceCall> {
        if self.is_busy() {
            debug!("Busy, dropping fetch");
            return None;
        }

        self.message = "Loading game...".to_string();
        self.issue(ServiceCall::FetchState)
    }

    /// Requests a fresh game. Dropped while busy.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn begin_new_game(&mut self) -> Option<ServiceCall> {
        if self.is_busy() {
            debug!("Busy, dropping new game request");
            return None;
        }

        self.message = "Starting new game...".to_string();
        self.issue(ServiceCall::StartNewGame)
    }

    /// Submits the player's move if it is legal right now.
    ///
    /// Dropped while busy, before the board is loaded, after the game has
    /// ended, or when the cell is taken.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn begin_move(&mut self, coord: Coord) -> Option<ServiceCall> {
        if self.is_busy() {
            debug!("Busy, dropping move");
            return None;
        }
        if self.phase != Phase::Ready {
            debug!("Not accepting moves in this phase");
            return None;
        }
        if !self.board.is_cell_playable(coord.row(), coord.col()) {
            debug!("Cell not playable, dropping move");
            return None;
        }

        self.phase = Phase::SubmittingMove;
        self.issue(ServiceCall::SubmitMove(coord))
    }

    /// Applies the outcome of the outstanding call.
    ///
    /// Returns the AI turn to issue when the player's move was accepted and the
    /// game is still in progress; `difficulty` is captured into that call.
    #[instrument(skip(self, outcome), fields(phase = %self.phase, ok = outcome.is_ok()))]
    pub fn resolve(
        &mut self,
        outcome: Result<Board, GameServiceError>,
        difficulty: Difficulty,
    ) -> Option<ServiceCall> {
        let Some(call) = self.in_flight.take() else {
            warn!("Received a service outcome with no call in flight");
            return None;
        };

        match (call, outcome) {
            (ServiceCall::SubmitMove(coord), Ok(board)) => {
                self.install(board);
                if board.status().is_terminal() {
                    info!(%coord, status = %board.status(), "Player move ended the game");
                    return None;
                }

                debug!(%coord, %difficulty, "Player move accepted, scheduling AI turn");
                self.phase = Phase::AwaitingAi;
                self.message = "AI is thinking...".to_string();
                self.issue(ServiceCall::RequestAiMove(difficulty))
            }
            (call, Ok(board)) => {
                debug!(%call, status = %board.status(), "Service call succeeded");
                self.install(board);
                None
            }
            (call, Err(err)) => {
                warn!(%call, error = %err, "Service call failed");
                self.message = failure_message(call, &err).to_string();
                if matches!(
                    call,
                    ServiceCall::SubmitMove(_) | ServiceCall::RequestAiMove(_)
                ) {
                    self.phase = Phase::Ready;
                }
                None
            }
        }
    }

    fn issue(&mut self, call: ServiceCall) -> Option<ServiceCall> {
        self.in_flight = Some(call);
        Some(call)
    }

    /// Replaces the board and derives everything shown from it.
    fn install(&mut self, board: Board) {
        self.board = board;
        self.highlighted_line = winning_line(&board);
        self.message = status_message(&board);
        self.phase = if board.status().is_terminal() {
            Phase::Terminal
        } else {
            Phase::Ready
        };
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable status line for a board.
pub fn status_message(board: &Board) -> String {
    match board.status() {
        GameStatus::InProgress => format!("Current player: {}", board.current_player()),
        GameStatus::Won(player) => format!("Player {} wins!", player),
        GameStatus::Draw => "Game ended in a draw!".to_string(),
    }
}

fn failure_message(call: ServiceCall, err: &GameServiceError) -> &'static str {
    match (call, err.kind()) {
        (ServiceCall::FetchState, _) => "Error fetching game state. Please try again.",
        (ServiceCall::StartNewGame, _) => "Error starting game. Please try again.",
        (ServiceCall::RequestAiMove(_), _) => "AI move failed. Your turn.",
        (ServiceCall::SubmitMove(_), GameServiceErrorKind::InvalidMove(_)) => {
            "Move rejected by the server. Please try again."
        }
        (ServiceCall::SubmitMove(_), GameServiceErrorKind::MalformedState(_)) => {
            "Received an invalid game state from the server."
        }
        (ServiceCall::SubmitMove(_), _) => "Could not reach the game server. Please try again.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictac_meow_board::{Cell, Player, BOARD_SIZE};

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn board(rows: [&str; 3], current_player: Player, status: GameStatus) -> Board {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in rows.iter().enumerate() {
            for (col, ch) in row.chars().enumerate() {
                cells[r][col] = match ch {
                    'X' => Cell::Occupied(Player::X),
                    'O' => Cell::Occupied(Player::O),
                    _ => Cell::Empty,
                };
            }
        }
        Board::from_parts(cells, current_player, status).unwrap()
    }

    fn ready_session() -> Session {
        let mut session = Session::new();
        assert_eq!(session.begin_fetch(), Some(ServiceCall::FetchState));
        session.resolve(Ok(Board::new()), Difficulty::Medium);
        assert_eq!(session.phase(), Phase::Ready);
        session
    }

    #[test]
    fn test_starts_idle_and_rejects_moves() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.begin_move(c(0, 0)), None);
    }

    #[test]
    fn test_fetch_of_finished_game_lands_in_terminal() {
        let mut session = Session::new();
        session.begin_fetch();
        let won = board(["XXX", "OO.", "..."], Player::X, GameStatus::Won(Player::X));
        session.resolve(Ok(won), Difficulty::Medium);

        assert_eq!(session.phase(), Phase::Terminal);
        assert_eq!(session.message(), "Player X wins!");
        assert!(session.highlighted_line().unwrap().contains(c(0, 2)));
    }

    #[test]
    fn test_accepted_move_schedules_ai_with_captured_difficulty() {
        let mut session = ready_session();
        assert_eq!(session.begin_move(c(0, 0)), Some(ServiceCall::SubmitMove(c(0, 0))));
        assert_eq!(session.phase(), Phase::SubmittingMove);
        assert!(session.is_busy());

        let after = board(["X..", "...", "..."], Player::O, GameStatus::InProgress);
        let next = session.resolve(Ok(after), Difficulty::Hard);

        assert_eq!(next, Some(ServiceCall::RequestAiMove(Difficulty::Hard)));
        assert_eq!(session.phase(), Phase::AwaitingAi);
        assert_eq!(session.message(), "AI is thinking...");
        assert!(session.is_busy());
    }

    #[test]
    fn test_busy_session_drops_every_intent() {
        let mut session = ready_session();
        session.begin_move(c(0, 0));

        assert_eq!(session.begin_move(c(1, 1)), None);
        assert_eq!(session.begin_new_game(), None);
        assert_eq!(session.begin_fetch(), None);
        assert_eq!(session.in_flight(), Some(ServiceCall::SubmitMove(c(0, 0))));
    }

    #[test]
    fn test_terminal_move_skips_ai() {
        let mut session = ready_session();
        session.begin_move(c(0, 2));
        let won = board(["XXX", "OO.", "..."], Player::X, GameStatus::Won(Player::X));

        assert_eq!(session.resolve(Ok(won), Difficulty::Medium), None);
        assert_eq!(session.phase(), Phase::Terminal);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_failed_move_keeps_board() {
        let mut session = ready_session();
        let before = *session.board();
        session.begin_move(c(1, 1));

        let next = session.resolve(
            Err(GameServiceError::invalid_move("stale")),
            Difficulty::Medium,
        );

        assert_eq!(next, None);
        assert_eq!(session.board(), &before);
        assert_eq!(session.phase(), Phase::Ready);
        assert!(!session.is_busy());
        assert_eq!(session.message(), "Move rejected by the server. Please try again.");
    }

    #[test]
    fn test_failed_fetch_stays_idle_but_accepts_new_game() {
        let mut session = Session::new();
        session.begin_fetch();
        session.resolve(Err(GameServiceError::transport("refused")), Difficulty::Medium);

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.message(), "Error fetching game state. Please try again.");
        assert_eq!(session.begin_new_game(), Some(ServiceCall::StartNewGame));
    }

    #[test]
    fn test_new_game_clears_highlight_once_installed() {
        let mut session = Session::new();
        session.begin_fetch();
        let won = board(["OOO", "XX.", "X.."], Player::O, GameStatus::Won(Player::O));
        session.resolve(Ok(won), Difficulty::Medium);
        assert!(session.highlighted_line().is_some());

        session.begin_new_game();
        session.resolve(Ok(Board::new()), Difficulty::Medium);
        assert_eq!(session.highlighted_line(), None);
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.message(), "Current player: X");
    }

    #[test]
    fn test_failed_new_game_keeps_finished_board_and_highlight() {
        let mut session = Session::new();
        session.begin_fetch();
        let won = board(["OOO", "XX.", "X.."], Player::O, GameStatus::Won(Player::O));
        session.resolve(Ok(won), Difficulty::Medium);
        let line = session.highlighted_line();

        session.begin_new_game();
        session.resolve(Err(GameServiceError::transport("refused")), Difficulty::Medium);

        assert_eq!(session.phase(), Phase::Terminal);
        assert_eq!(session.board(), &won);
        assert_eq!(session.highlighted_line(), line);
        assert_eq!(session.message(), "Error starting game. Please try again.");
    }

    #[test]
    fn test_stray_outcome_is_ignored() {
        let mut session = ready_session();
        let before = *session.board();
        let other = board(["X..", "...", "..."], Player::O, GameStatus::InProgress);

        assert_eq!(session.resolve(Ok(other), Difficulty::Medium), None);
        assert_eq!(session.board(), &before);
    }

    #[test]
    fn test_snapshot_mirrors_session() {
        let mut session = ready_session();
        session.begin_move(c(2, 2));
        let snapshot = session.snapshot(Difficulty::Easy);

        assert!(*snapshot.busy());
        assert_eq!(*snapshot.phase(), Phase::SubmittingMove);
        assert_eq!(*snapshot.difficulty(), Difficulty::Easy);
        assert_eq!(snapshot.board(), session.board());
    }
}
