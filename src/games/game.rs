//! Capability set shared by every playable game.

use super::tictactoe::GameStatus;
use rand::RngCore;

/// A game the referee can drive without knowing its rules.
///
/// Implementations own their state for the lifetime of one game and are
/// not meant to be shared across threads while being played.
pub trait Game: std::fmt::Debug {
    /// Registry key, e.g. `"tictactoe"`.
    fn name(&self) -> &'static str;

    /// Applies the opponent's move token and returns the new status.
    fn apply_move(&mut self, token: &str) -> GameStatus;

    /// Lets the scripted player move; returns its canonical move token, or
    /// `None` when the game is over or it is not the bot's turn.
    fn bot_move(&mut self) -> Option<String>;

    /// Current status.
    fn status(&self) -> GameStatus;

    /// Starts over with fresh state.
    fn reset(&mut self, rng: &mut dyn RngCore);

    /// Current score of the opponent.
    fn score(&self) -> u32;

    /// Extracts a canonical move token from free-form agent output.
    fn parse_agent_output(&self, text: &str) -> Option<String>;

    /// Plain-text view of the game for terminals and logs.
    fn render_text(&self) -> String;
}
