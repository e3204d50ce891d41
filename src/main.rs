//! Strictly Puzzles - Unified CLI
//!
//! Generates benchmark fixtures and referees interactive games.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, Task};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::io::{BufRead, Write};
use strictly_puzzles::{BenchConfig, GameRegistry, GameStatus, InvalidMovePolicy, PuzzleFixture, PuzzleGenerator};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => BenchConfig::from_file(path)?,
        None => BenchConfig::default(),
    }
    .with_seed(cli.seed);

    match cli.command {
        Command::Generate { task, count } => run_generate(config.with_sample_size(count), task),
        Command::Play {
            game,
            policy,
            bot_first,
        } => run_play(
            config
                .with_policy(policy)
                .with_player_first(bot_first.then_some(false)),
            &game,
        ),
        Command::Schema => run_schema(),
    }
}

/// Logs go to stderr so stdout carries only JSON or the game.
#[instrument]
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn make_rng(config: &BenchConfig) -> SmallRng {
    match config.seed() {
        Some(seed) => SmallRng::seed_from_u64(*seed),
        None => SmallRng::from_os_rng(),
    }
}

/// Generate benchmark items
#[instrument(skip(config))]
fn run_generate(config: BenchConfig, task: Task) -> Result<()> {
    let mut rng = make_rng(&config);
    let generator = PuzzleGenerator::new(*config.max_attempts());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    info!(count = config.sample_size(), "Generating benchmark items");
    for _ in 0..*config.sample_size() {
        let line = match task {
            Task::Optimal => serde_json::to_string(&generator.generate(&mut rng))?,
            Task::Rule => match generator.rule_state(&mut rng) {
                Some(state) => serde_json::to_string(&state)?,
                None => {
                    warn!("No rule state within the attempt budget, skipping");
                    continue;
                }
            },
            Task::Perceive => serde_json::to_string(&generator.random_state(&mut rng))?,
        };
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Interactive game against the bot
#[instrument(skip(config))]
fn run_play(config: BenchConfig, game_name: &str) -> Result<()> {
    let mut rng = make_rng(&config);
    let mut game = GameRegistry::create(game_name, &config, &mut rng).with_context(|| {
        format!(
            "Unknown game {:?}; available: {}",
            game_name,
            GameRegistry::names().collect::<Vec<_>>().join(", ")
        )
    })?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut invalid_streak = 0;

    while !game.status().is_terminal() {
        println!("{}\n", game.render_text());
        print!("Your move (e.g. B2, or \"Movement: B2\"): ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            info!("Input closed");
            break;
        };
        let input = line.trim();
        let token = game
            .parse_agent_output(input)
            .unwrap_or_else(|| input.to_string());

        match game.apply_move(&token) {
            GameStatus::InvalidMove => {
                invalid_streak += 1;
                println!("Invalid move: {}", input);
                if invalid_streak >= *config.maximum_trials() {
                    warn!(invalid_streak, "Too many invalid moves, ending game");
                    break;
                }
                if *config.invalid_move_policy() == InvalidMovePolicy::Freeze {
                    println!("The game is frozen after an invalid move.");
                    break;
                }
            }
            GameStatus::InProgress => {
                invalid_streak = 0;
                if let Some(reply) = game.bot_move() {
                    println!("Bot plays {}", reply);
                }
            }
            _ => invalid_streak = 0,
        }
    }

    println!("{}\n", game.render_text());
    println!("Result: {}  Score: {}", game.status(), game.score());
    Ok(())
}

/// Print the fixture JSON schema
#[instrument]
fn run_schema() -> Result<()> {
    let schema = schemars::schema_for!(PuzzleFixture);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
