//! Board positions and move notation.
//!
//! A move token is a row letter (`A`-`C`) and a column digit (`1`-`3`) in
//! either order, case-insensitive: `"A1"`, `"a1"`, `"1A"` and `"1a"` all
//! name the top-left cell. The canonical form is letter-first uppercase.

use super::action::MoveError;
use super::types::Board;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A position on the tic-tac-toe board (0-8, row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    /// Top-left (A1, index 0)
    TopLeft,
    /// Top-center (A2, index 1)
    TopCenter,
    /// Top-right (A3, index 2)
    TopRight,
    /// Middle-left (B1, index 3)
    MiddleLeft,
    /// Center (B2, index 4)
    Center,
    /// Middle-right (B3, index 5)
    MiddleRight,
    /// Bottom-left (C1, index 6)
    BottomLeft,
    /// Bottom-center (C2, index 7)
    BottomCenter,
    /// Bottom-right (C3, index 8)
    BottomRight,
}

/// Label prefix the agent must put in front of its move.
const MOVEMENT_LABEL: &str = "movement:";

impl Position {
    /// All 9 positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates position from a zero-based row and column.
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Self::from_index(row * 3 + col)
        } else {
            None
        }
    }

    /// Zero-based row.
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Zero-based column.
    pub fn col(self) -> usize {
        self.to_index() % 3
    }

    /// Canonical move label, e.g. `"A1"` or `"C3"`.
    pub fn label(self) -> &'static str {
        const LABELS: [&str; 9] = ["A1", "A2", "A3", "B1", "B2", "B3", "C1", "C2", "C3"];
        LABELS[self.to_index()]
    }

    /// Parses a two-character move token.
    ///
    /// Accepts letter-first or digit-first order in any case. Anything that
    /// is not exactly one row letter and one column digit is rejected.
    #[instrument]
    pub fn parse(token: &str) -> Result<Self, MoveError> {
        let unparseable = || MoveError::Unparseable(token.to_string());

        let mut chars = token.chars();
        let (Some(first), Some(second), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(unparseable());
        };

        let (row, col) = match (row_of(first), col_of(second)) {
            (Some(row), Some(col)) => (row, col),
            _ => match (col_of(first), row_of(second)) {
                (Some(col), Some(row)) => (row, col),
                _ => return Err(unparseable()),
            },
        };

        Self::from_row_col(row, col).ok_or_else(unparseable)
    }

    /// Extracts a move from free-form agent output.
    ///
    /// Looks for `Movement:` (any case) followed by optional whitespace and
    /// a move token. Later occurrences are tried if an earlier label is not
    /// followed by a valid token.
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn from_agent_output(text: &str) -> Option<Self> {
        let lowered = text.to_ascii_lowercase();
        for (start, _) in lowered.match_indices(MOVEMENT_LABEL) {
            let rest = text[start + MOVEMENT_LABEL.len()..].trim_start();
            let token: String = rest.chars().take(2).collect();
            if let Ok(pos) = Self::parse(&token) {
                debug!(position = %pos, "Extracted move from agent output");
                return Some(pos);
            }
        }
        debug!("No movement label with a valid token");
        None
    }

    /// Filters positions by board state - returns only empty cells, in
    /// ascending index order.
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        board.empty_positions()
    }
}

fn row_of(ch: char) -> Option<usize> {
    match ch.to_ascii_uppercase() {
        'A' => Some(0),
        'B' => Some(1),
        'C' => Some(2),
        _ => None,
    }
}

fn col_of(ch: char) -> Option<usize> {
    match ch {
        '1' => Some(0),
        '2' => Some(1),
        '3' => Some(2),
        _ => None,
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Position {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
