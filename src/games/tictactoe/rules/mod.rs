//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the engine, the minimax search and the puzzle generator
//! all classify boards the same way.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{Classification, LINES, Line, check_winner, classify, winning_cells};
