//! Validation of raw board payloads received from a game service.
//!
//! Services speak in loosely typed JSON: cells are the strings `"Empty"`,
//! `"X"` and `"O"`, and the status is either a bare label or an object naming
//! the winner. [`RawBoard`] mirrors that shape exactly; converting it into a
//! [`Board`] checks the grid dimensions, the symbol set, the status and the
//! piece balance.

use crate::types::{Board, Cell, GameStatus, Player, BOARD_SIZE};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Board payload exactly as the game service sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBoard {
    /// Rows of cell symbols.
    pub cells: Vec<Vec<String>>,
    /// Player to move.
    pub current_player: String,
    /// Game status.
    pub status: RawStatus,
}

/// Status payload: `"InProgress"`, `"Draw"` or `{"Winner": "X"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawStatus {
    /// A bare status label.
    Label(String),
    /// A finished game with its winner.
    Winner {
        /// Winning symbol.
        #[serde(rename = "Winner")]
        winner: String,
    },
}

/// A payload that does not describe a valid board.
#[derive(Debug, Clone, Display, Error)]
#[display("Malformed game state: {} at {}:{}", message, file, line)]
pub struct MalformedStateError {
    /// What was wrong with the payload.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl MalformedStateError {
    /// Creates a new malformed state error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = MalformedStateError;

    #[instrument(skip(raw))]
    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.cells.len() != BOARD_SIZE {
            warn!(rows = raw.cells.len(), "Board payload has wrong row count");
            return Err(MalformedStateError::new(format!(
                "expected {} rows, found {}",
                BOARD_SIZE,
                raw.cells.len()
            )));
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in raw.cells.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                warn!(row = r, cols = row.len(), "Board payload has wrong column count");
                return Err(MalformedStateError::new(format!(
                    "expected {} cells in row {}, found {}",
                    BOARD_SIZE,
                    r,
                    row.len()
                )));
            }
            for (c, symbol) in row.iter().enumerate() {
                cells[r][c] = parse_cell(symbol)?;
            }
        }

        let current_player = parse_player(&raw.current_player)?;
        let status = parse_status(&raw.status)?;

        let board = Board::from_parts(cells, current_player, status)?;
        debug!(status = %board.status(), current_player = %board.current_player(), "Validated board payload");
        Ok(board)
    }
}

impl From<&Board> for RawBoard {
    fn from(board: &Board) -> Self {
        let cells = board
            .cells()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => "Empty".to_string(),
                        Cell::Occupied(player) => player.to_string(),
                    })
                    .collect()
            })
            .collect();

        let status = match board.status() {
            GameStatus::InProgress => RawStatus::Label("InProgress".to_string()),
            GameStatus::Draw => RawStatus::Label("Draw".to_string()),
            GameStatus::Won(player) => RawStatus::Winner {
                winner: player.to_string(),
            },
        };

        Self {
            cells,
            current_player: board.current_player().to_string(),
            status,
        }
    }
}

fn parse_player(symbol: &str) -> Result<Player, MalformedStateError> {
    match symbol {
        "X" => Ok(Player::X),
        "O" => Ok(Player::O),
        other => Err(MalformedStateError::new(format!(
            "expected player X or O, found {:?}",
            other
        ))),
    }
}

fn parse_cell(symbol: &str) -> Result<Cell, MalformedStateError> {
    match symbol {
        "Empty" => Ok(Cell::Empty),
        other => parse_player(other)
            .map(Cell::Occupied)
            .map_err(|_| MalformedStateError::new(format!("unknown cell symbol {:?}", other))),
    }
}

fn parse_status(status: &RawStatus) -> Result<GameStatus, MalformedStateError> {
    match status {
        RawStatus::Label(label) => match label.as_str() {
            "InProgress" => Ok(GameStatus::InProgress),
            "Draw" => Ok(GameStatus::Draw),
            other => Err(MalformedStateError::new(format!(
                "unknown status {:?}",
                other
            ))),
        },
        RawStatus::Winner { winner } => parse_player(winner)
            .map(GameStatus::Won)
            .map_err(|_| MalformedStateError::new(format!("unknown winner {:?}", winner))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    fn raw(cells: [[&str; 3]; 3], current_player: &str, status: RawStatus) -> RawBoard {
        RawBoard {
            cells: cells
                .iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
            current_player: current_player.to_string(),
            status,
        }
    }

    fn in_progress() -> RawStatus {
        RawStatus::Label("InProgress".to_string())
    }

    #[test]
    fn test_accepts_well_formed_payload() {
        let payload = raw(
            [["X", "Empty", "Empty"], ["Empty", "O", "Empty"], ["X", "Empty", "Empty"]],
            "O",
            in_progress(),
        );
        let board = Board::try_from(payload).unwrap();
        assert_eq!(board.current_player(), Player::O);
        assert_eq!(board.cell(Coord::new(1, 1).unwrap()), Cell::Occupied(Player::O));
        assert_eq!(board.count(Player::X), 2);
    }

    #[test]
    fn test_rejects_wrong_row_count() {
        let mut payload = raw([["Empty"; 3]; 3], "X", in_progress());
        payload.cells.pop();
        let err = Board::try_from(payload).unwrap_err();
        assert!(err.message.contains("rows"));
    }

    #[test]
    fn test_rejects_ragged_row() {
        let mut payload = raw([["Empty"; 3]; 3], "X", in_progress());
        payload.cells[2].push("Empty".to_string());
        let err = Board::try_from(payload).unwrap_err();
        assert!(err.message.contains("row 2"));
    }

    #[test]
    fn test_rejects_unknown_cell_symbol() {
        let payload = raw(
            [["Z", "Empty", "Empty"], ["Empty"; 3], ["Empty"; 3]],
            "X",
            in_progress(),
        );
        assert!(Board::try_from(payload).is_err());
    }

    #[test]
    fn test_rejects_empty_current_player() {
        let payload = raw([["Empty"; 3]; 3], "Empty", in_progress());
        assert!(Board::try_from(payload).is_err());
    }

    #[test]
    fn test_rejects_turn_that_did_not_switch() {
        let o_first = raw([["Empty"; 3]; 3], "O", in_progress());
        assert!(Board::try_from(o_first).is_err());

        let x_twice = raw(
            [["X", "Empty", "Empty"], ["Empty"; 3], ["Empty"; 3]],
            "X",
            in_progress(),
        );
        let err = Board::try_from(x_twice).unwrap_err();
        assert!(err.message.contains("turn out of order"));
    }

    #[test]
    fn test_rejects_bad_status() {
        let label = raw([["Empty"; 3]; 3], "X", RawStatus::Label("Paused".to_string()));
        assert!(Board::try_from(label).is_err());

        let winner = raw(
            [["Empty"; 3]; 3],
            "X",
            RawStatus::Winner {
                winner: "Empty".to_string(),
            },
        );
        assert!(Board::try_from(winner).is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = r#"{"cells":[["O","O","O"],["X","X","Empty"],["X","Empty","Empty"]],"current_player":"O","status":{"Winner":"O"}}"#;
        let payload: RawBoard = serde_json::from_str(json).unwrap();
        let board = Board::try_from(payload).unwrap();
        assert_eq!(board.status(), GameStatus::Won(Player::O));

        let draw: RawStatus = serde_json::from_str(r#""Draw""#).unwrap();
        assert_eq!(draw, RawStatus::Label("Draw".to_string()));
    }

    #[test]
    fn test_board_converts_back_to_wire_shape() {
        let payload = raw(
            [["X", "Empty", "Empty"], ["Empty"; 3], ["Empty"; 3]],
            "O",
            in_progress(),
        );
        let board = Board::try_from(payload.clone()).unwrap();
        assert_eq!(RawBoard::from(&board), payload);

        let json = serde_json::to_value(RawBoard::from(&board)).unwrap();
        assert_eq!(json["status"], "InProgress");
        assert_eq!(json["cells"][0][0], "X");
    }
}
