//! AI difficulty levels.

use serde::{Deserialize, Serialize};

/// Strength of the server-side AI opponent.
///
/// Sent with every AI turn request; the lowercase name doubles as the path
/// segment on the wire (`/api/game/ai-move/medium`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random moves.
    Easy,
    /// A coin flip between random and strong moves.
    #[default]
    Medium,
    /// Wins, blocks and takes the best open square.
    Hard,
}

impl Difficulty {
    /// Cycles to the next level, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Label shown in the difficulty selector.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy (lame)",
            Difficulty::Medium => "medium (lame)",
            Difficulty::Hard => "hard (like me)",
        }
    }
}
