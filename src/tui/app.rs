//! Application state and logic.

use super::input::{digit_cell, move_cursor};
use crate::difficulty::Difficulty;
use crate::orchestrator::Intent;
use crate::session::{Session, Snapshot};
use crossterm::event::KeyCode;
use tictac_meow_board::Coord;
use tracing::debug;

/// Main application state.
pub struct App {
    snapshot: Snapshot,
    cursor: Coord,
    should_quit: bool,
}

impl App {
    /// Creates an application showing an unloaded session.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            snapshot: Session::new().snapshot(difficulty),
            cursor: Coord::CENTER,
            should_quit: false,
        }
    }

    /// Gets the latest session snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Gets the keyboard cursor.
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Checks whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Replaces the snapshot with a newer one.
    pub fn update(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
    }

    /// Handles a key press, returning the intent to forward, if any.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<Intent> {
        let intent = match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::CellClicked(self.cursor)),
            KeyCode::Char('n') => Some(Intent::NewGame),
            KeyCode::Char('r') => Some(Intent::Refresh),
            KeyCode::Char('d') => Some(Intent::DifficultyChanged(
                self.snapshot.difficulty().next(),
            )),
            KeyCode::Char('e') => Some(Intent::DifficultyChanged(Difficulty::Easy)),
            KeyCode::Char('m') => Some(Intent::DifficultyChanged(Difficulty::Medium)),
            KeyCode::Char('h') => Some(Intent::DifficultyChanged(Difficulty::Hard)),
            KeyCode::Char(c) => digit_cell(c).map(|coord| {
                self.cursor = coord;
                Intent::CellClicked(coord)
            }),
            _ => None,
        };

        if intent.is_some() {
            debug!(?key, ?intent, "Key mapped to intent");
        }
        intent
    }
}
