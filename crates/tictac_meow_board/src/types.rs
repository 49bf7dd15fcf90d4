//! Core domain types for tic-tac-toe boards.

use crate::validation::MalformedStateError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: usize = 3;

/// Player mark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, strum::EnumIter,
)]
pub enum Player {
    /// Player X (moves first).
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a player's mark.
    Occupied(Player),
}

impl Cell {
    /// Checks if nobody has played in this cell.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the mark in this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// A row/column coordinate on the 3x3 grid.
///
/// Coordinates are always in range; use [`Coord::new`] to build one from
/// untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("({row}, {col})")]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    /// The center cell.
    pub const CENTER: Coord = Coord::at(1, 1);

    /// Creates a coordinate, or `None` if it falls outside the board.
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Creates a coordinate known to be in range.
    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Creates a coordinate from a row-major index (0-8).
    pub const fn from_index(index: usize) -> Option<Self> {
        Self::new(index / BOARD_SIZE, index % BOARD_SIZE)
    }

    /// Row index (0 at the top).
    pub const fn row(self) -> usize {
        self.row
    }

    /// Column index (0 at the left).
    pub const fn col(self) -> usize {
        self.col
    }

    /// Row-major index (0-8).
    pub const fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Iterates over every coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE * BOARD_SIZE).map(|index| Self::at(index / BOARD_SIZE, index % BOARD_SIZE))
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Board filled with no winner.
    Draw,
    /// Game ended in a win.
    #[display("Won({_0})")]
    Won(Player),
}

impl GameStatus {
    /// Checks if the game has ended (draw or win).
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// Authoritative game snapshot: the grid plus turn and status metadata.
///
/// A board is replaced wholesale on every update; it is never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    current_player: Player,
    status: GameStatus,
}

impl Board {
    /// Creates an empty board with X to move.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            current_player: Player::X,
            status: GameStatus::InProgress,
        }
    }

    /// Builds a board from its parts, checking the piece balance and the turn.
    ///
    /// X moves first and turns alternate, so the number of X marks minus the
    /// number of O marks must be 0 or 1. While the game is in progress that
    /// difference also fixes who moves next. Finished games keep whatever
    /// player the service reports.
    #[instrument(skip(cells))]
    pub fn from_parts(
        cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
        current_player: Player,
        status: GameStatus,
    ) -> Result<Self, MalformedStateError> {
        let board = Self {
            cells,
            current_player,
            status,
        };

        let x = board.count(Player::X);
        let o = board.count(Player::O);
        if x != o && x != o + 1 {
            return Err(MalformedStateError::new(format!(
                "unbalanced board: {} X marks against {} O marks",
                x, o
            )));
        }

        if status == GameStatus::InProgress {
            let expected = if x == o { Player::X } else { Player::O };
            if current_player != expected {
                return Err(MalformedStateError::new(format!(
                    "turn out of order: {} to move with {} X marks and {} O marks",
                    current_player, x, o
                )));
            }
        }

        Ok(board)
    }

    /// Returns the cell at a coordinate.
    pub fn cell(&self, coord: Coord) -> Cell {
        self.cells[coord.row()][coord.col()]
    }

    /// Returns the cell at a row and column, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        Coord::new(row, col).map(|coord| self.cell(coord))
    }

    /// Returns all cells, row-major.
    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Returns the player whose move is next.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Counts the marks a player has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Occupied(player))
            .count()
    }

    /// Checks whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Checks whether a move may be played at a row and column.
    ///
    /// True only while the game is in progress and the cell is empty.
    /// Out-of-range coordinates are never playable.
    pub fn is_cell_playable(&self, row: usize, col: usize) -> bool {
        self.status == GameStatus::InProgress && self.get(row, col) == Some(Cell::Empty)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Empty => write!(f, "{}", r * BOARD_SIZE + c + 1)?,
                    Cell::Occupied(player) => write!(f, "{}", player)?,
                }
                if c < BOARD_SIZE - 1 {
                    write!(f, "|")?;
                }
            }
            if r < BOARD_SIZE - 1 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Checks whether a move may be played at a row and column.
///
/// See [`Board::is_cell_playable`].
pub fn is_cell_playable(board: &Board, row: usize, col: usize) -> bool {
    board.is_cell_playable(row, col)
}
