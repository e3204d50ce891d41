//! Exhaustive minimax search for the scripted player.
//!
//! The tree below any 3x3 position is small enough to search to the end,
//! so the chosen move is exact. Empty cells are always enumerated in
//! ascending index order and only a strictly better score replaces the
//! current best, which makes the choice reproducible for a given board.

use super::rules::{Classification, classify};
use super::{Board, Player, Position};
use tracing::{debug, instrument};

/// Score of a win found at depth zero.
const WIN_SCORE: i32 = 10;

/// Minimax opponent playing `bot` against `bot.opponent()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minimax {
    bot: Player,
}

impl Minimax {
    /// Creates a search for the given bot mark.
    pub fn new(bot: Player) -> Self {
        Self { bot }
    }

    /// The mark the search plays for.
    pub fn bot(&self) -> Player {
        self.bot
    }

    /// Finds the best move for the bot, assuming it is the bot's turn.
    ///
    /// Returns `None` only when the board has no empty cell.
    #[instrument(skip(self, board), fields(bot = %self.bot))]
    pub fn find_best_move(&self, board: &Board) -> Option<Position> {
        let mut nodes = 0u64;
        let mut best: Option<(Position, i32)> = None;

        for pos in board.empty_positions() {
            let Ok(next) = board.with(pos, self.bot) else {
                continue;
            };
            let score = self.evaluate(&next, self.bot.opponent(), 1, &mut nodes);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        debug!(?best, nodes, "Minimax search complete");
        best.map(|(pos, _)| pos)
    }

    /// Scores `board` from the bot's perspective with `to_move` about to play.
    ///
    /// Wins are worth `WIN_SCORE - depth`, losses `depth - WIN_SCORE`, ties 0.
    fn evaluate(&self, board: &Board, to_move: Player, depth: i32, nodes: &mut u64) -> i32 {
        *nodes += 1;
        match classify(board) {
            Classification::Winner(player) if player == self.bot => return WIN_SCORE - depth,
            Classification::Winner(_) => return depth - WIN_SCORE,
            Classification::Tie => return 0,
            Classification::Ongoing => {}
        }

        let scores = board.empty_positions().into_iter().filter_map(|pos| {
            board
                .with(pos, to_move)
                .ok()
                .map(|next| self.evaluate(&next, to_move.opponent(), depth + 1, nodes))
        });

        let best = if to_move == self.bot {
            scores.max()
        } else {
            scores.min()
        };
        // Ongoing boards always have an empty cell.
        best.unwrap_or(0)
    }
}
