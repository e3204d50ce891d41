//! First-class invariants for generated puzzles.
//!
//! A candidate board is only emitted as a fixture when every invariant in
//! [`PuzzleInvariants`] holds. Each invariant is testable on its own and
//! documents one guarantee the benchmark relies on.

use super::puzzle::PuzzleCandidate;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of two to five invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);

pub mod defender_quiet;
pub mod not_terminal;
pub mod turn_parity;
pub mod unique_winning_move;

pub use defender_quiet::DefenderQuietInvariant;
pub use not_terminal::NotTerminalInvariant;
pub use turn_parity::TurnParityInvariant;
pub use unique_winning_move::{HasAlternativeInvariant, UniqueWinningMoveInvariant};

/// Everything a candidate must satisfy to become a fixture.
pub type PuzzleInvariants = (
    TurnParityInvariant,
    NotTerminalInvariant,
    UniqueWinningMoveInvariant,
    DefenderQuietInvariant,
    HasAlternativeInvariant,
);

/// Checks [`PuzzleInvariants`] against a candidate.
pub fn check_candidate(candidate: &PuzzleCandidate) -> Result<(), Vec<InvariantViolation>> {
    PuzzleInvariants::check_all(candidate)
}
