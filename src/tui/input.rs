//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;
use tictac_meow_board::{Coord, BOARD_SIZE};

/// Moves cursor based on arrow keys. Stops at the board edges.
pub fn move_cursor(cursor: Coord, key: KeyCode) -> Coord {
    let (row, col) = (cursor.row(), cursor.col());

    let target = match key {
        KeyCode::Up => row.checked_sub(1).map(|row| (row, col)),
        KeyCode::Down => Some((row + 1, col)).filter(|(row, _)| *row < BOARD_SIZE),
        KeyCode::Left => col.checked_sub(1).map(|col| (row, col)),
        KeyCode::Right => Some((row, col + 1)).filter(|(_, col)| *col < BOARD_SIZE),
        _ => None,
    };

    target
        .and_then(|(row, col)| Coord::new(row, col))
        .unwrap_or(cursor)
}

/// Maps digit keys `1`-`9` to cells in reading order.
pub fn digit_cell(c: char) -> Option<Coord> {
    let digit = c.to_digit(10)? as usize;
    digit.checked_sub(1).and_then(Coord::from_index)
}
