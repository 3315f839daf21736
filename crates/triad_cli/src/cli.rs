//! Command-line interface for triad.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Triad - N×N tic-tac-toe for up to three players
#[derive(Parser, Debug)]
#[command(name = "triad")]
#[command(about = "N×N tic-tac-toe for up to three players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Board side length (3-12, clamped)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub board_size: Option<i64>,

    /// Marks in a row needed to win (3 to board size, clamped)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub win_condition: Option<i64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a scripted sequence of moves and print the result
    Play {
        /// Player name, once per seat in turn order
        #[arg(short, long = "player")]
        players: Vec<String>,

        /// Moves as space-separated `row,col` pairs, e.g. "0,0 1,1 2,2"
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        moves: String,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play interactively, one command per line on stdin
    Interactive {
        /// Player name, once per seat in turn order
        #[arg(short, long = "player")]
        players: Vec<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}
