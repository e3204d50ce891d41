//! Defender quiet: the defender is not one move from a line.

use super::super::puzzle::PuzzleCandidate;
use super::super::rules::winning_cells;
use super::Invariant;

/// Invariant: the defender has no immediately winning cell.
pub struct DefenderQuietInvariant;

impl Invariant<PuzzleCandidate> for DefenderQuietInvariant {
    fn holds(candidate: &PuzzleCandidate) -> bool {
        winning_cells(candidate.board(), candidate.attacker().opponent()).is_empty()
    }

    fn description() -> &'static str {
        "Defender has no immediate winning threat"
    }
}
