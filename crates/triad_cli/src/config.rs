//! Configuration file for the terminal front end.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};
use triad_tictactoe::{DEFAULT_BOARD_SIZE, DEFAULT_WIN_CONDITION, GameConfig, Player};

/// Settings loaded from `triad.toml`.
///
/// Sizes are kept as requested; the engine clamps them.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct TriadConfig {
    /// Requested board side length.
    #[serde(default = "default_board_size")]
    board_size: i64,

    /// Requested number of marks in a row to win.
    #[serde(default = "default_win_condition")]
    win_condition: i64,

    /// Seats, in turn order. Names may be left empty and filled from the CLI.
    #[serde(default = "Player::default_roster")]
    players: Vec<Player>,
}

fn default_board_size() -> i64 {
    DEFAULT_BOARD_SIZE as i64
}

fn default_win_condition() -> i64 {
    DEFAULT_WIN_CONDITION as i64
}

impl Default for TriadConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            win_condition: default_win_condition(),
            players: Player::default_roster(),
        }
    }
}

impl TriadConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            board_size = config.board_size,
            win_condition = config.win_condition,
            players = config.players.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Serializes the configuration back to TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Overrides the requested board size.
    pub fn with_board_size(mut self, board_size: i64) -> Self {
        self.board_size = board_size;
        self
    }

    /// Overrides the requested win length.
    pub fn with_win_condition(mut self, win_condition: i64) -> Self {
        self.win_condition = win_condition;
        self
    }

    /// Fills seat names in order, seating only as many players as names given.
    ///
    /// With no names the configured roster is kept unchanged.
    #[instrument(skip(self, names), fields(count = names.len()))]
    pub fn with_player_names(mut self, names: &[String]) -> Self {
        if names.is_empty() {
            return self;
        }
        let mut seats = self.players.into_iter().chain(Player::default_roster());
        let mut seated: Vec<Player> = Vec::with_capacity(names.len());
        for name in names {
            // Skip default seats whose id is already taken by a configured one.
            let Some(seat) = seats.find(|s| seated.iter().all(|p| p.id() != s.id())) else {
                break;
            };
            seated.push(seat.with_name(name.trim()));
        }
        self.players = seated;
        self
    }

    /// Returns the engine configuration, clamped.
    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.board_size, self.win_condition)
    }

    /// Returns this configuration with sizes replaced by the values the
    /// engine will actually use.
    pub fn effective(&self) -> Self {
        let game = self.game_config();
        Self {
            board_size: game.board_size() as i64,
            win_condition: game.win_condition() as i64,
            players: self.players.clone(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
