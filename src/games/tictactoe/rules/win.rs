//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Player, Position};
use super::draw::is_full;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the eight three-in-a-row lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    cells: [Position; 3],
    name: &'static str,
}

impl Line {
    /// The three positions making up the line.
    pub fn cells(&self) -> [Position; 3] {
        self.cells
    }

    /// Human-readable name, e.g. `"row A"` or `"anti-diagonal"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the player holding all three cells, if any.
    pub fn owner(&self, board: &Board) -> Option<Player> {
        let [a, b, c] = self.cells;
        match board.get(a) {
            Cell::Mark(player)
                if board.get(b) == Cell::Mark(player) && board.get(c) == Cell::Mark(player) =>
            {
                Some(player)
            }
            _ => None,
        }
    }
}

/// Rows, then columns, then diagonals.
pub const LINES: [Line; 8] = [
    Line {
        cells: [Position::TopLeft, Position::TopCenter, Position::TopRight],
        name: "row A",
    },
    Line {
        cells: [Position::MiddleLeft, Position::Center, Position::MiddleRight],
        name: "row B",
    },
    Line {
        cells: [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
        name: "row C",
    },
    Line {
        cells: [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
        name: "column 1",
    },
    Line {
        cells: [Position::TopCenter, Position::Center, Position::BottomCenter],
        name: "column 2",
    },
    Line {
        cells: [Position::TopRight, Position::MiddleRight, Position::BottomRight],
        name: "column 3",
    },
    Line {
        cells: [Position::TopLeft, Position::Center, Position::BottomRight],
        name: "main diagonal",
    },
    Line {
        cells: [Position::TopRight, Position::Center, Position::BottomLeft],
        name: "anti-diagonal",
    },
];

/// Terminal classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// No line and at least one empty cell.
    Ongoing,
    /// A player holds a full line.
    Winner(Player),
    /// Board full with no line.
    Tie,
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` for the first completed line in [`LINES`]
/// order, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|line| line.owner(board))
}

/// Classifies a board as ongoing, won, or tied.
#[instrument(skip(board))]
pub fn classify(board: &Board) -> Classification {
    if let Some(player) = check_winner(board) {
        Classification::Winner(player)
    } else if is_full(board) {
        Classification::Tie
    } else {
        Classification::Ongoing
    }
}

/// Empty cells where `player` would immediately complete a line, in
/// ascending index order.
#[instrument(skip(board))]
pub fn winning_cells(board: &Board, player: Player) -> Vec<Position> {
    board
        .empty_positions()
        .into_iter()
        .filter(|&pos| {
            LINES.iter().any(|line| {
                let cells = line.cells();
                cells.contains(&pos)
                    && cells
                        .iter()
                        .filter(|&&other| other != pos)
                        .all(|&other| board.get(other) == Cell::Mark(player))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
        assert_eq!(classify(&board), Classification::Ongoing);
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "XXX/OO_/___".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Player::X));
        assert_eq!(classify(&board), Classification::Winner(Player::X));
    }

    #[test]
    fn test_winner_diagonal() {
        let board: Board = "O_X/_OX/__O".parse().unwrap();
        assert_eq!(classify(&board), Classification::Winner(Player::O));
    }

    #[test]
    fn test_winner_column() {
        let board: Board = "XO_/XO_/_O_".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Player::O));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX_/___/___".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_tie_on_full_board() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(classify(&board), Classification::Tie);
    }

    #[test]
    fn test_win_on_full_board_is_not_tie() {
        let board: Board = "XXX/OOX/XOO".parse().unwrap();
        assert_eq!(classify(&board), Classification::Winner(Player::X));
    }

    #[test]
    fn test_winning_cells() {
        let board: Board = "XX_/OO_/X__".parse().unwrap();
        assert_eq!(winning_cells(&board, Player::X), vec![Position::TopRight]);
        assert_eq!(winning_cells(&board, Player::O), vec![Position::MiddleRight]);

        // Fork: X threatens A3 (row A) and C1 via column 1.
        let board: Board = "XX_/X__/___".parse().unwrap();
        assert_eq!(
            winning_cells(&board, Player::X),
            vec![Position::TopRight, Position::BottomLeft]
        );
    }

    #[test]
    fn test_line_names() {
        assert_eq!(LINES[0].name(), "row A");
        assert_eq!(LINES[5].name(), "column 3");
        assert_eq!(LINES[7].name(), "anti-diagonal");
    }
}
