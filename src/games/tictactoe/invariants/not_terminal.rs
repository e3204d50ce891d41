//! Not terminal: nobody has won and the board is not full.

use super::super::puzzle::PuzzleCandidate;
use super::super::rules::{Classification, classify};
use super::Invariant;

/// Invariant: the game on the candidate board is still ongoing.
pub struct NotTerminalInvariant;

impl Invariant<PuzzleCandidate> for NotTerminalInvariant {
    fn holds(candidate: &PuzzleCandidate) -> bool {
        classify(candidate.board()) == Classification::Ongoing
    }

    fn description() -> &'static str {
        "No line is complete and empty cells remain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, Player, Position};

    #[test]
    fn test_completed_line_violates() {
        let board: Board = "XXX/OO_/___".parse().unwrap();
        let c = PuzzleCandidate::new(board, Player::O, Position::MiddleRight);
        assert!(!NotTerminalInvariant::holds(&c));
    }

    #[test]
    fn test_open_board_holds() {
        let board: Board = "XX_/OO_/___".parse().unwrap();
        let c = PuzzleCandidate::new(board, Player::X, Position::TopRight);
        assert!(NotTerminalInvariant::holds(&c));
    }
}
