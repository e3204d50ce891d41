//! Tic-tac-toe: board, rules, live engine, minimax bot and puzzle generator.

mod action;
mod engine;
pub mod invariants;
mod minimax;
mod position;
mod puzzle;
pub mod rules;
mod types;

pub use action::MoveError;
pub use engine::{AgentMove, InvalidMovePolicy, TicTacToe};
pub use minimax::Minimax;
pub use position::Position;
pub use puzzle::{
    DEFAULT_MAX_ATTEMPTS, NO_STRATEGY_EXPLANATION, PuzzleCandidate, PuzzleFixture, PuzzleGenerator,
    RuleState,
};
pub use rules::{Classification, LINES, Line, check_winner, classify, is_draw, is_full, winning_cells};
pub use types::{Board, Cell, GameStatus, Player};

use super::Game;
use rand::RngCore;

impl Game for TicTacToe {
    fn name(&self) -> &'static str {
        "tictactoe"
    }

    fn apply_move(&mut self, token: &str) -> GameStatus {
        TicTacToe::apply_move(self, token)
    }

    fn bot_move(&mut self) -> Option<String> {
        TicTacToe::bot_move(self).map(|pos| pos.label().to_string())
    }

    fn status(&self) -> GameStatus {
        TicTacToe::status(self)
    }

    fn reset(&mut self, rng: &mut dyn RngCore) {
        TicTacToe::reset(self, rng)
    }

    fn score(&self) -> u32 {
        TicTacToe::score(self)
    }

    fn parse_agent_output(&self, text: &str) -> Option<String> {
        TicTacToe::parse_agent_output(text).token().map(str::to_string)
    }

    fn render_text(&self) -> String {
        format!(
            "You are playing as {}\n{}",
            self.opponent(),
            self.board().display()
        )
    }
}
