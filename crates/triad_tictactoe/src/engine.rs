//! The game engine: the only way state changes.
//!
//! Every mutation runs to completion before returning. Invalid input never
//! fails: config requests are clamped and unplayable moves are ignored.

use crate::config::{GameConfig, MAX_PLAYERS};
use crate::invariants::check_engine_invariants;
use crate::rules::winning_line;
use crate::state::{GameState, Outcome, Phase};
use crate::types::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Why a move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum IgnoreReason {
    /// The game already ended.
    #[display("game is over")]
    GameOver,
    /// Nobody is seated.
    #[display("no players")]
    NoPlayers,
    /// The coordinates are off the board.
    #[display("out of bounds")]
    OutOfBounds,
    /// The cell already holds a mark.
    #[display("cell occupied")]
    Occupied,
}

/// What a call to [`GameEngine::make_move`] did.
///
/// This is a report, not an error: an ignored move leaves the state untouched
/// and callers are free to discard the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The mark was placed and the turn passed to the player at `next`.
    Continued {
        /// Index of the player now to move.
        next: usize,
    },
    /// The mark completed a line.
    Won {
        /// The winner.
        winner: Player,
        /// Cells of the winning run.
        cells: BTreeSet<Position>,
    },
    /// The mark filled the board with no line.
    Draw,
}

impl MoveOutcome {
    /// Returns true if the move changed the board.
    pub fn is_applied(&self) -> bool {
        !matches!(self, MoveOutcome::Ignored(_))
    }
}

/// Tic-tac-toe engine for an N×N board with up to three players.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    state: GameState,
}

impl GameEngine {
    /// Creates an engine in setup with the given configuration.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: GameState::new(config),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the configuration.
    pub fn config(&self) -> GameConfig {
        self.state.config
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    /// Returns how the game finished, once it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    /// Seats players in turn order.
    ///
    /// Names are not validated here; the setup view checks them first.
    /// Rosters longer than three are truncated. The board is left as is.
    #[instrument(skip(self, players), fields(count = players.len()))]
    pub fn set_players(&mut self, mut players: Vec<Player>) {
        if players.len() > MAX_PLAYERS {
            warn!(
                count = players.len(),
                max = MAX_PLAYERS,
                "Roster truncated to the maximum number of players"
            );
            players.truncate(MAX_PLAYERS);
        }
        self.state.players = players;
        if self.state.current_player_index >= self.state.players.len() {
            self.state.current_player_index = 0;
        }
        info!(count = self.state.players.len(), "Players seated");
        self.verify();
    }

    /// Places the current player's mark at `(row, col)`.
    ///
    /// Ignored without error when the game is over, nobody is seated, the
    /// coordinates are off the board, or the cell is taken. A winning move
    /// ends the game without passing the turn; a move that fills the board
    /// without a line ends it in a draw.
    #[instrument(skip(self))]
    pub fn make_move(&mut self, row: i64, col: i64) -> MoveOutcome {
        match self.state.board.position(row, col) {
            Some(pos) => self.make_move_at(pos),
            None => {
                debug!("Move ignored: out of bounds");
                MoveOutcome::Ignored(IgnoreReason::OutOfBounds)
            }
        }
    }

    /// Places the current player's mark at `pos`. See [`GameEngine::make_move`].
    #[instrument(skip(self), fields(position = %pos))]
    pub fn make_move_at(&mut self, pos: Position) -> MoveOutcome {
        if let Some(reason) = self.rejection(pos) {
            debug!(%reason, "Move ignored");
            return MoveOutcome::Ignored(reason);
        }
        let Some(player) = self.state.current_player().cloned() else {
            return MoveOutcome::Ignored(IgnoreReason::NoPlayers);
        };

        self.state.board.set(pos, Square::Occupied(player.id()));
        self.state.move_count += 1;

        let outcome = if let Some(line) =
            winning_line(&self.state.board, pos, player.id(), self.state.win_condition())
        {
            let cells: BTreeSet<Position> = line.into_cells().into_iter().collect();
            info!(winner = %player.name(), cells = cells.len(), "Game won");
            self.state.game_over = true;
            self.state.winner = Some(player.clone());
            self.state.winning_cells = cells.clone();
            MoveOutcome::Won {
                winner: player,
                cells,
            }
        } else if self.state.move_count == self.state.total_cells() {
            info!(moves = self.state.move_count, "Game drawn");
            self.state.game_over = true;
            MoveOutcome::Draw
        } else {
            let next = (self.state.current_player_index + 1) % self.state.players.len();
            self.state.current_player_index = next;
            debug!(next, "Turn passed");
            MoveOutcome::Continued { next }
        };

        self.verify();
        outcome
    }

    /// Clears the board and turn state, keeping the seated players.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.state.board = Board::new(self.state.board_size());
        self.state.current_player_index = 0;
        self.state.game_over = false;
        self.state.winner = None;
        self.state.winning_cells.clear();
        self.state.move_count = 0;
        info!(board_size = self.state.board_size(), "Game reset");
        self.verify();
    }

    /// Unseats every player, then resets as [`GameEngine::reset_game`] does.
    #[instrument(skip(self))]
    pub fn start_new_game(&mut self) {
        self.state.players.clear();
        self.reset_game();
    }

    /// Changes the board size, clamped to `[3, 12]`.
    ///
    /// Lowers the win length if it no longer fits, then resets the game:
    /// any game in progress is forfeited.
    #[instrument(skip(self), fields(current = self.state.board_size()))]
    pub fn change_board_size(&mut self, requested: i64) {
        self.state.config = self.state.config.with_board_size(requested);
        info!(
            board_size = self.state.board_size(),
            win_condition = self.state.win_condition(),
            "Board size changed"
        );
        self.reset_game();
    }

    /// Changes the win length, clamped to `[3, board_size]`, then resets the game.
    #[instrument(skip(self), fields(current = self.state.win_condition()))]
    pub fn change_win_condition(&mut self, requested: i64) {
        self.state.config = self.state.config.with_win_condition(requested);
        info!(win_condition = self.state.win_condition(), "Win condition changed");
        self.reset_game();
    }

    fn rejection(&self, pos: Position) -> Option<IgnoreReason> {
        if self.state.game_over {
            Some(IgnoreReason::GameOver)
        } else if self.state.players.is_empty() {
            Some(IgnoreReason::NoPlayers)
        } else if !self.state.board.contains(pos) {
            Some(IgnoreReason::OutOfBounds)
        } else if !self.state.board.is_empty(pos) {
            Some(IgnoreReason::Occupied)
        } else {
            None
        }
    }

    fn verify(&self) {
        if cfg!(debug_assertions)
            && let Err(violations) = check_engine_invariants(&self.state)
        {
            for violation in &violations {
                warn!(%violation, "Invariant violated");
            }
            debug_assert!(violations.is_empty(), "engine invariants violated");
        }
    }
}
