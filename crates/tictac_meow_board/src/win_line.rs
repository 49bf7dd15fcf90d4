//! Winning-line reconstruction.
//!
//! The game service reports *who* won but not *where*. The renderer wants the
//! three cells to highlight, so the line is recovered from the grid with a
//! fixed scan order: rows top to bottom, columns left to right, then the
//! diagonals (top-left to bottom-right before top-right to bottom-left). When
//! several lines match, the first in that order wins.

use crate::types::{Board, Cell, Coord, GameStatus, Player};
use tracing::{debug, instrument, warn};

/// Every line on the board, in scan order.
pub const LINES: [[Coord; 3]; 8] = [
    // Rows
    [Coord::at(0, 0), Coord::at(0, 1), Coord::at(0, 2)],
    [Coord::at(1, 0), Coord::at(1, 1), Coord::at(1, 2)],
    [Coord::at(2, 0), Coord::at(2, 1), Coord::at(2, 2)],
    // Columns
    [Coord::at(0, 0), Coord::at(1, 0), Coord::at(2, 0)],
    [Coord::at(0, 1), Coord::at(1, 1), Coord::at(2, 1)],
    [Coord::at(0, 2), Coord::at(1, 2), Coord::at(2, 2)],
    // Diagonals
    [Coord::at(0, 0), Coord::at(1, 1), Coord::at(2, 2)],
    [Coord::at(0, 2), Coord::at(1, 1), Coord::at(2, 0)],
];

/// Ordered triple of coordinates forming three in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinLine([Coord; 3]);

impl WinLine {
    /// The three coordinates, in line order.
    pub fn coords(&self) -> &[Coord; 3] {
        &self.0
    }

    /// Checks whether a coordinate is part of the line.
    pub fn contains(&self, coord: Coord) -> bool {
        self.0.contains(&coord)
    }
}

/// Finds the first full line of `player`, in scan order.
pub fn line_for(board: &Board, player: Player) -> Option<WinLine> {
    LINES
        .iter()
        .find(|line| {
            line.iter()
                .all(|coord| board.cell(*coord) == Cell::Occupied(player))
        })
        .map(|line| WinLine(*line))
}

/// Derives the line to highlight from a board's reported status.
///
/// Returns `None` unless the status is `Won`. A reported winner with no
/// matching line on the grid is logged and treated as "no highlight".
#[instrument(skip(board), fields(status = %board.status()))]
pub fn winning_line(board: &Board) -> Option<WinLine> {
    let GameStatus::Won(winner) = board.status() else {
        return None;
    };

    match line_for(board, winner) {
        Some(line) => {
            debug!(?line, "Resolved winning line");
            Some(line)
        }
        None => {
            warn!(%winner, "Reported winner has no line on the board");
            None
        }
    }
}
