//! Turn parity: piece counts say it is the attacker's move.

use super::super::puzzle::PuzzleCandidate;
use super::Invariant;

/// Invariant: the board is reachable by alternating play with the
/// attacker to move.
///
/// X to move means equal counts; O to move means X has exactly one more.
pub struct TurnParityInvariant;

impl Invariant<PuzzleCandidate> for TurnParityInvariant {
    fn holds(candidate: &PuzzleCandidate) -> bool {
        candidate.board().to_move() == Some(*candidate.attacker())
    }

    fn description() -> &'static str {
        "Piece counts put the attacker on move"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, Player, Position};

    #[test]
    fn test_x_to_move_with_equal_counts() {
        let board: Board = "XX_/OO_/___".parse().unwrap();
        let c = PuzzleCandidate::new(board, Player::X, Position::TopRight);
        assert!(TurnParityInvariant::holds(&c));
        let c = PuzzleCandidate::new(board, Player::O, Position::MiddleRight);
        assert!(!TurnParityInvariant::holds(&c));
    }

    #[test]
    fn test_o_to_move_with_x_ahead() {
        let board: Board = "XX_/OO_/X__".parse().unwrap();
        let c = PuzzleCandidate::new(board, Player::O, Position::MiddleRight);
        assert!(TurnParityInvariant::holds(&c));
    }
}
