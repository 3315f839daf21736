//! Game state snapshot and the phases derived from it.

use crate::config::GameConfig;
use crate::types::{Board, Player, PlayerId, Position, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where the game is in its lifecycle. Derived from [`GameState`], never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Phase {
    /// No players committed.
    #[display("setup")]
    Setup,
    /// Players seated, moves accepted.
    #[display("in progress")]
    InProgress,
    /// A winner was found or the board filled up.
    #[display("ended")]
    Ended,
}

/// How an ended game finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The player completed a line.
    Winner(Player),
    /// The board filled with no line.
    Draw,
}

/// Complete game state.
///
/// Only the engine mutates it; views read it through [`crate::GameEngine::state`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    /// Turn order is list order.
    pub(crate) players: Vec<Player>,
    pub(crate) current_player_index: usize,
    pub(crate) move_count: usize,
    pub(crate) game_over: bool,
    pub(crate) winner: Option<Player>,
    pub(crate) winning_cells: BTreeSet<Position>,
}

impl GameState {
    /// Creates a state with no players and an empty board.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            board: Board::new(config.board_size()),
            players: Vec::new(),
            current_player_index: 0,
            move_count: 0,
            game_over: false,
            winner: None,
            winning_cells: BTreeSet::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Returns the board side length.
    pub fn board_size(&self) -> usize {
        self.config.board_size()
    }

    /// Returns the win length.
    pub fn win_condition(&self) -> usize {
        self.config.win_condition()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the seated players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the index of the player to move.
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Returns the player to move, if any are seated.
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// Returns the number of marks placed.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Returns true once a winner exists or the board is full.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<&Player> {
        self.winner.as_ref()
    }

    /// Returns the cells of the winning run, empty unless there is a winner.
    pub fn winning_cells(&self) -> &BTreeSet<Position> {
        &self.winning_cells
    }

    /// Returns true if the cell is part of the winning run.
    pub fn is_winning_cell(&self, pos: Position) -> bool {
        self.winning_cells.contains(&pos)
    }

    /// Returns the number of cells on the board.
    pub fn total_cells(&self) -> usize {
        self.config.total_cells()
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::Ended
        } else if self.players.is_empty() {
            Phase::Setup
        } else {
            Phase::InProgress
        }
    }

    /// Returns how the game finished, once it has.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.game_over {
            return None;
        }
        Some(match &self.winner {
            Some(player) => Outcome::Winner(player.clone()),
            None => Outcome::Draw,
        })
    }

    /// Looks up a seated player by identity.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Returns the seated player holding a cell.
    pub fn occupant(&self, pos: Position) -> Option<&Player> {
        self.board
            .get(pos)
            .and_then(Square::occupant)
            .and_then(|id| self.player(id))
    }

    /// One-line summary, e.g. `Connect 4 to win • Moves: 3/25`.
    pub fn status_line(&self) -> String {
        format!(
            "Connect {} to win • Moves: {}/{}",
            self.win_condition(),
            self.move_count,
            self.total_cells()
        )
    }

    /// Renders the board as text.
    ///
    /// Player symbols mark occupied cells, `.` marks empty ones and winning
    /// cells are bracketed. Marks of players no longer seated show as `?`.
    pub fn render(&self) -> String {
        let size = self.board_size();
        let mut out = String::new();
        for row in 0..size {
            for col in 0..size {
                let pos = Position::new(row, col);
                let symbol = match self.board.get(pos) {
                    Some(Square::Occupied(_)) => {
                        self.occupant(pos).map_or('?', Player::symbol)
                    }
                    _ => '.',
                };
                if self.is_winning_cell(pos) {
                    out.push_str(&format!("[{symbol}]"));
                } else {
                    out.push_str(&format!(" {symbol} "));
                }
            }
            out.push('\n');
        }
        out
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
