//! Game implementations and the registry that names them.

mod game;
mod registry;
pub mod tictactoe;

pub use game::Game;
pub use registry::{GameFactory, GameRegistry};
