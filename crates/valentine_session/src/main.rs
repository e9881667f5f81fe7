//! Valentine - unified CLI
//!
//! Drives the tic-tac-toe engine from the command line.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;
use valentine_session::{SessionConfig, simulate, simulate_paced, suggest};
use valentine_tictactoe::{Board, Marker, Strength};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Command::Simulate {
            games,
            strength,
            seed,
            paced,
            json,
        } => run_simulate(config, games, strength, seed, paced, json).await,
        Command::Suggest {
            board,
            strength,
            opponent,
            seed,
            json,
        } => run_suggest(config, &board, strength, opponent, seed, json),
    }
}

/// Loads the config file, falling back to defaults when it does not exist.
#[instrument(skip(path), fields(path = %path.display()))]
fn load_config(path: &Path) -> Result<SessionConfig> {
    if !path.exists() {
        info!("No config file found, using defaults");
        return Ok(SessionConfig::default());
    }
    Ok(SessionConfig::from_file(path)?)
}

fn apply_overrides(
    mut config: SessionConfig,
    strength: Option<Strength>,
    seed: Option<u64>,
) -> SessionConfig {
    if let Some(strength) = strength {
        config = config.with_strength(strength);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    config
}

/// Run a batch of games
#[instrument(skip(config))]
async fn run_simulate(
    config: SessionConfig,
    games: usize,
    strength: Option<Strength>,
    seed: Option<u64>,
    paced: bool,
    json: bool,
) -> Result<()> {
    let config = apply_overrides(config, strength, seed);
    let mut rng = config.rng();

    if paced && games > 1 {
        warn!(games, "Paced simulation sleeps on every opponent reply");
    }
    let report = if paced {
        simulate_paced(&config, games, &mut rng).await?
    } else {
        simulate(&config, games, &mut rng)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

/// Answer a single board
#[instrument(skip(config))]
fn run_suggest(
    config: SessionConfig,
    board: &str,
    strength: Option<Strength>,
    opponent: Option<Marker>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut config = apply_overrides(config, strength, seed);
    if let Some(opponent) = opponent {
        config = config.with_human_marker(opponent.opponent());
    }
    let board: Board = board
        .parse()
        .with_context(|| format!("Invalid board {:?}", board))?;

    let mut rng = config.rng();
    let answer = suggest(&config, board, &mut rng);

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
        return Ok(());
    }

    println!("{}", render(&board, &config));
    println!();
    println!("outcome      {}", answer.outcome);
    match answer.index {
        Some(index) => println!("{} plays    {}", config.matchup().opponent(), index),
        None => println!("no move"),
    }
    Ok(())
}

/// Board drawn with the configured marker symbols.
fn render(board: &Board, config: &SessionConfig) -> String {
    board
        .to_string()
        .chars()
        .map(|c| match c {
            'X' => config.symbol_for(Marker::X).to_string(),
            'O' => config.symbol_for(Marker::O).to_string(),
            other => other.to_string(),
        })
        .collect()
}
