//! Strictly Puzzles - tic-tac-toe referee and benchmark generator
//!
//! This library referees live tic-tac-toe between a scripted minimax bot
//! and an opponent under test, and manufactures labelled benchmark
//! puzzles with exactly one winning move.
//!
//! # Architecture
//!
//! - **Board**: 3x3 grid, cell classification, move notation
//! - **Rules**: win/tie classification over the eight lines
//! - **Engine**: live play, status tracking, scoring
//! - **Minimax**: exhaustive search for the scripted player
//! - **Puzzles**: seeded generation of single-winning-move fixtures
//! - **Registry**: static name-to-constructor lookup of games
//!
//! # Example
//!
//! ```
//! use strictly_puzzles::{GameStatus, InvalidMovePolicy, Player, PuzzleGenerator, TicTacToe};
//! use rand::SeedableRng;
//!
//! let mut game = TicTacToe::with_marks(Player::O, InvalidMovePolicy::Revert);
//! assert_eq!(game.apply_move("B2"), GameStatus::InProgress);
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(42);
//! let fixture = PuzzleGenerator::default().generate(&mut rng);
//! assert!(!fixture.suboptimal_moves().is_empty());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;

// Crate-level exports - Configuration
pub use config::{BenchConfig, ConfigError};

// Crate-level exports - Registry
pub use games::{Game, GameFactory, GameRegistry};

// Crate-level exports - Tic-tac-toe
pub use games::tictactoe::{
    AgentMove, Board, Cell, Classification, DEFAULT_MAX_ATTEMPTS, GameStatus, InvalidMovePolicy,
    LINES, Line, Minimax, MoveError, NO_STRATEGY_EXPLANATION, Player, Position, PuzzleCandidate,
    PuzzleFixture, PuzzleGenerator, RuleState, TicTacToe, check_winner, classify, is_draw, is_full,
    winning_cells,
};

// Crate-level exports - Puzzle invariants
pub use games::tictactoe::invariants::{
    Invariant, InvariantSet, InvariantViolation, PuzzleInvariants, check_candidate,
};
