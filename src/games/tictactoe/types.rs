//! Core domain types for tic-tac-toe.

use super::action::MoveError;
use super::position::Position;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Player mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
)]
pub enum Player {
    /// Player X (moves first).
    X,
    /// Player O (moves second).
    O,
}

impl Player {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A single cell as seen by renderers and benchmark consumers.
///
/// Serializes as `"X"`, `"O"`, or the 1-based position number of an
/// empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Cell {
    /// Cell holding a mark.
    Mark(Player),
    /// Empty cell, labelled with its position number (1-9).
    Empty(u8),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Player> {
        match self {
            Cell::Mark(player) => Some(player),
            Cell::Empty(_) => None,
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty(_))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Mark(player) => write!(f, "{}", player),
            Cell::Empty(number) => write!(f, "{}", number),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells only ever go from empty to marked; [`Board::place`] refuses to
/// overwrite an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|i| Cell::Empty(i as u8 + 1)),
        }
    }

    /// Builds a board from nine row-major marks, `None` meaning empty.
    pub fn from_marks(marks: [Option<Player>; 9]) -> Self {
        Self {
            cells: std::array::from_fn(|i| match marks[i] {
                Some(player) => Cell::Mark(player),
                None => Cell::Empty(i as u8 + 1),
            }),
        }
    }

    /// Builds a board from a 3x3 cell matrix, as found in fixtures.
    pub fn from_matrix(matrix: &[[Cell; 3]; 3]) -> Self {
        Self::from_marks(std::array::from_fn(|i| matrix[i / 3][i % 3].mark()))
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Gets the cell at a raw index (0-8).
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Places a mark on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::CellOccupied`] if the cell already holds a mark.
    pub fn place(&mut self, pos: Position, player: Player) -> Result<(), MoveError> {
        let cell = &mut self.cells[pos.to_index()];
        if !cell.is_empty() {
            return Err(MoveError::CellOccupied(pos));
        }
        *cell = Cell::Mark(player);
        Ok(())
    }

    /// Returns a copy of the board with `player` placed at `pos`.
    ///
    /// # Errors
    ///
    /// Same as [`Board::place`].
    pub fn with(&self, pos: Position, player: Player) -> Result<Self, MoveError> {
        let mut next = *self;
        next.place(pos, player)?;
        Ok(next)
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Counts the cells holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.mark() == Some(player))
            .count()
    }

    /// Empty positions in ascending index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|&pos| self.is_empty(pos))
            .collect()
    }

    /// Whose turn it is according to piece parity.
    ///
    /// X moves when the counts are equal, O when X is one ahead. Any other
    /// count difference cannot arise from alternating play and yields `None`.
    pub fn to_move(&self) -> Option<Player> {
        let x = self.count(Player::X);
        let o = self.count(Player::O);
        if x == o {
            Some(Player::X)
        } else if x == o + 1 {
            Some(Player::O)
        } else {
            None
        }
    }

    /// The board as a 3x3 row-major matrix.
    pub fn matrix(&self) -> [[Cell; 3]; 3] {
        std::array::from_fn(|row| std::array::from_fn(|col| self.cells[row * 3 + col]))
    }

    /// Formats the board as a human-readable grid with row letters and
    /// column digits.
    pub fn display(&self) -> String {
        let mut result = String::from("   1   2   3\n");
        for (row, letter) in ['A', 'B', 'C'].into_iter().enumerate() {
            result.push(letter);
            result.push(' ');
            for col in 0..3 {
                let symbol = match self.cells[row * 3 + col] {
                    Cell::Mark(player) => player.to_string(),
                    Cell::Empty(_) => " ".to_string(),
                };
                result.push(' ');
                result.push_str(&symbol);
                result.push(' ');
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n  ---+---+---\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = MoveError;

    /// Parses nine cells in row-major order.
    ///
    /// `X`/`O` (any case) are marks; `.`, `_`, `-` and digits are empty.
    /// Whitespace, `|` and `/` are ignored so `"XX_/OO_/___"` reads naturally.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut index = 0;
        for ch in s.chars() {
            if ch.is_whitespace() || ch == '|' || ch == '/' {
                continue;
            }
            let mark = match ch {
                'X' | 'x' => Some(Player::X),
                'O' | 'o' => Some(Player::O),
                '.' | '_' | '-' | '1'..='9' => None,
                other => {
                    return Err(MoveError::MalformedBoard(format!(
                        "unexpected character {:?}",
                        other
                    )));
                }
            };
            let pos = Position::from_index(index).ok_or_else(|| {
                MoveError::MalformedBoard("more than nine cells".to_string())
            })?;
            if let Some(player) = mark {
                board.place(pos, player)?;
            }
            index += 1;
        }
        if index != 9 {
            return Err(MoveError::MalformedBoard(format!(
                "expected nine cells, found {}",
                index
            )));
        }
        Ok(board)
    }
}

/// Status of a live game, from the opponent's point of view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// The opponent completed a line.
    Win,
    /// The bot completed a line.
    Lose,
    /// Board filled with no line.
    Tie,
    /// The last move was rejected; the board is unchanged.
    InvalidMove,
}

impl GameStatus {
    /// Returns true for WIN, LOSE and TIE.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Win | GameStatus::Lose | GameStatus::Tie)
    }
}
