//! Command-line interface for valentine.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use valentine_tictactoe::{Marker, Strength};

/// Valentine - tic-tac-toe engine with a strong and a weak opponent
#[derive(Parser, Debug)]
#[command(name = "valentine")]
#[command(about = "Tic-tac-toe engine with a simple opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the session config file
    #[arg(long, global = true, default_value = "valentine.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play many games against a random human and print the tally
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "1000")]
        games: usize,

        /// Opponent strength (strong or weak), overriding the config
        #[arg(short, long)]
        strength: Option<Strength>,

        /// Random seed, overriding the config
        #[arg(long)]
        seed: Option<u64>,

        /// Apply the thinking and reveal delays to every turn
        #[arg(long)]
        paced: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a board and print the opponent's reply
    Suggest {
        /// Nine cells, e.g. "XX_/O__/___" (X, O, and _ . - for empty)
        #[arg(short, long)]
        board: String,

        /// Opponent strength (strong or weak), overriding the config
        #[arg(short, long)]
        strength: Option<Strength>,

        /// Marker the opponent plays, overriding the config
        #[arg(short, long)]
        opponent: Option<Marker>,

        /// Random seed, overriding the config
        #[arg(long)]
        seed: Option<u64>,

        /// Print the answer as JSON
        #[arg(long)]
        json: bool,
    },
}
