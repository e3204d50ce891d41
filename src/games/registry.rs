//! Static mapping from game name to constructor.

use super::Game;
use super::tictactoe::TicTacToe;
use crate::config::BenchConfig;
use rand::RngCore;
use tracing::{debug, instrument, warn};

/// Builds a fresh game from configuration and a random source.
pub type GameFactory = fn(&BenchConfig, &mut dyn RngCore) -> Box<dyn Game>;

fn tictactoe(config: &BenchConfig, rng: &mut dyn RngCore) -> Box<dyn Game> {
    Box::new(TicTacToe::from_config(config, rng))
}

const GAMES: &[(&str, GameFactory)] = &[("tictactoe", tictactoe)];

/// Lookup of the games this crate can referee.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameRegistry;

impl GameRegistry {
    /// Registered game names.
    pub fn names() -> impl Iterator<Item = &'static str> {
        GAMES.iter().map(|(name, _)| *name)
    }

    /// Constructor for `name`, if registered.
    pub fn lookup(name: &str) -> Option<GameFactory> {
        GAMES
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, factory)| *factory)
    }

    /// Builds a new game by name.
    #[instrument(skip(config, rng))]
    pub fn create(name: &str, config: &BenchConfig, rng: &mut dyn RngCore) -> Option<Box<dyn Game>> {
        match Self::lookup(name) {
            Some(factory) => {
                debug!(name, "Creating game");
                Some(factory(config, rng))
            }
            None => {
                warn!(name, "Unknown game");
                None
            }
        }
    }
}
