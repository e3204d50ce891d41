//! Command-line interface for strictly_puzzles.

use clap::{Parser, Subcommand, ValueEnum};
use strictly_puzzles::InvalidMovePolicy;

/// Strictly Puzzles - tic-tac-toe referee and benchmark generator
#[derive(Parser, Debug)]
#[command(name = "strictly_puzzles")]
#[command(about = "Tic-tac-toe referee and puzzle generator for agent benchmarks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Seed for all random draws (overrides the config file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Kind of benchmark item to generate
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// Single-winning-move puzzles with labelled answers
    Optimal,
    /// Legal boards with their valid moves
    Rule,
    /// Random boards for perception tasks
    Perceive,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write benchmark items to stdout, one JSON object per line
    Generate {
        /// What to generate
        #[arg(long, value_enum, default_value = "optimal")]
        task: Task,

        /// Number of items (overrides the config file)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Play against the minimax bot on stdin/stdout
    Play {
        /// Registered game to play
        #[arg(long, default_value = "tictactoe")]
        game: String,

        /// What an invalid move does to the next one
        #[arg(long, value_enum)]
        policy: Option<InvalidMovePolicy>,

        /// Let the bot open the game
        #[arg(long)]
        bot_first: bool,
    },

    /// Print the JSON schema of generated puzzle fixtures
    Schema,
}
