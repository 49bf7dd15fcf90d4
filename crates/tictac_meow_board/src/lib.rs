//! Tic-tac-toe board model for the tic tac meow client.
//!
//! This crate holds the pure, IO-free half of the client:
//!
//! - **Types**: cells, players, coordinates, game status and the [`Board`] snapshot
//! - **Validation**: turning raw service payloads into boards that uphold the
//!   board invariants, or rejecting them with [`MalformedStateError`]
//! - **Win lines**: reconstructing the winning triple from a board and its
//!   reported winner
//!
//! # Example
//!
//! ```
//! use tictac_meow_board::{winning_line, Board, Coord, RawBoard, RawStatus};
//!
//! let raw = RawBoard {
//!     cells: vec![
//!         vec!["X".into(), "X".into(), "Empty".into()],
//!         vec!["O".into(), "O".into(), "O".into()],
//!         vec!["X".into(), "Empty".into(), "Empty".into()],
//!     ],
//!     current_player: "O".into(),
//!     status: RawStatus::Winner { winner: "O".into() },
//! };
//!
//! let board = Board::try_from(raw).unwrap();
//! let line = winning_line(&board).unwrap();
//! assert!(line.contains(Coord::new(1, 1).unwrap()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod types;
mod validation;
mod win_line;

pub use types::{is_cell_playable, Board, Cell, Coord, GameStatus, Player, BOARD_SIZE};
pub use validation::{MalformedStateError, RawBoard, RawStatus};
pub use win_line::{line_for, winning_line, WinLine, LINES};
