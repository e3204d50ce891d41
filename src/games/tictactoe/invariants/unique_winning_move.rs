//! Uniqueness: exactly one cell wins, and it is the reserved one.

use super::super::puzzle::PuzzleCandidate;
use super::super::rules::winning_cells;
use super::Invariant;

/// Invariant: the attacker has exactly one immediately winning cell and it
/// is the candidate's optimal cell.
pub struct UniqueWinningMoveInvariant;

impl Invariant<PuzzleCandidate> for UniqueWinningMoveInvariant {
    fn holds(candidate: &PuzzleCandidate) -> bool {
        winning_cells(candidate.board(), *candidate.attacker()) == [*candidate.optimal()]
    }

    fn description() -> &'static str {
        "Exactly one empty cell completes a line for the attacker"
    }
}

/// Invariant: at least one legal move other than the optimal one exists.
pub struct HasAlternativeInvariant;

impl Invariant<PuzzleCandidate> for HasAlternativeInvariant {
    fn holds(candidate: &PuzzleCandidate) -> bool {
        candidate
            .board()
            .empty_positions()
            .iter()
            .any(|pos| pos != candidate.optimal())
    }

    fn description() -> &'static str {
        "At least one suboptimal move exists"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, Player, Position};

    #[test]
    fn test_single_win_holds() {
        let board: Board = "XX_/O__/_O_".parse().unwrap();
        let c = PuzzleCandidate::new(board, Player::X, Position::TopRight);
        assert!(UniqueWinningMoveInvariant::holds(&c));
        assert!(HasAlternativeInvariant::holds(&c));
    }

    #[test]
    fn test_fork_violates() {
        let board: Board = "XX_/X__/__O".parse().unwrap();
        let c = PuzzleCandidate::new(board, Player::X, Position::TopRight);
        assert!(!UniqueWinningMoveInvariant::holds(&c));
    }

    #[test]
    fn test_wrong_cell_violates() {
        let board: Board = "XX_/O__/_O_".parse().unwrap();
        let c = PuzzleCandidate::new(board, Player::X, Position::Center);
        assert!(!UniqueWinningMoveInvariant::holds(&c));
    }

    #[test]
    fn test_only_optimal_left_violates_alternative() {
        let board: Board = "XOX/OOX/XX_".parse().unwrap();
        let c = PuzzleCandidate::new(board, Player::O, Position::BottomRight);
        assert!(!HasAlternativeInvariant::holds(&c));
    }
}
