//! Triad - terminal tic-tac-toe.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;
use triad_cli::cli::{Cli, Command};
use triad_cli::{Command as PromptCommand, Controller, Flow, TriadConfig, parse_moves};
use triad_tictactoe::Outcome;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Play {
            players,
            moves,
            json,
        } => run_play(config.with_player_names(&players), &moves, json),
        Command::Interactive { players } => run_interactive(config.with_player_names(&players)),
        Command::Config => {
            print!("{}", config.effective().to_toml()?);
            Ok(())
        }
    }
}

/// Loads the config file, if any, and applies flag overrides.
#[instrument(skip(cli))]
fn load_config(cli: &Cli) -> Result<TriadConfig> {
    let mut config = match &cli.config {
        Some(path) => TriadConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => TriadConfig::default(),
    };
    if let Some(size) = cli.board_size {
        config = config.with_board_size(size);
    }
    if let Some(win) = cli.win_condition {
        config = config.with_win_condition(win);
    }
    debug!(?config, "Effective configuration");
    Ok(config)
}

/// Applies a move script, then prints the board or a JSON snapshot.
#[instrument(skip(config))]
fn run_play(config: TriadConfig, script: &str, json: bool) -> Result<()> {
    let moves = parse_moves(script).context("parsing --moves")?;
    let mut controller = Controller::start(&config).context("starting game")?;
    let mut sink = std::io::sink();

    for (row, col) in moves {
        controller.apply(PromptCommand::Move { row, col }, &mut sink)?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        controller.write_json(&mut out)?;
    } else {
        controller.show(&mut out)?;
        match controller.engine()?.outcome() {
            Some(Outcome::Winner(player)) => {
                writeln!(out, "{} wins!", player.name())?
            }
            Some(Outcome::Draw) => writeln!(out, "Game ends in a draw!")?,
            None => {}
        }
    }

    controller.finish()?;
    Ok(())
}

/// Reads commands from stdin until `quit` or end of input.
#[instrument(skip(config))]
fn run_interactive(config: TriadConfig) -> Result<()> {
    let mut controller = Controller::start(&config).context("starting game")?;
    info!("Interactive session started");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "Commands: <row> <col> | reset | new | size N | win N | show | quit"
    )?;
    controller.show(&mut out)?;

    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<PromptCommand>() {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %e, "Bad command");
                writeln!(out, "{e}")?;
                continue;
            }
        };
        if controller.apply(command, &mut out)? == Flow::Quit {
            break;
        }
    }

    controller.finish()?;
    Ok(())
}
