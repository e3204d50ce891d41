//! Move-level errors for tic-tac-toe.
//!
//! These never escape the engine: [`super::TicTacToe`] folds every
//! rejection into [`super::GameStatus::InvalidMove`]. They exist so the
//! board and parser can say precisely why something was refused, which
//! ends up in the trace log.

use super::Position;

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The token is not a two-character row/column pair.
    #[display("Unrecognised move token {:?}", _0)]
    Unparseable(String),

    /// The cell at the position is already occupied.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// A textual board description could not be read.
    #[display("Malformed board: {}", _0)]
    MalformedBoard(String),
}

impl std::error::Error for MoveError {}
