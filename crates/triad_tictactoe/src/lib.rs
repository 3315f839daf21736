//! Triad tic-tac-toe engine.
//!
//! Game state and win detection for an N×N board (3 to 12 cells a side)
//! seating up to three players, with a configurable number of marks in a
//! row needed to win.
//!
//! # Architecture
//!
//! - **Board store**: [`Board`] and [`GameConfig`], clamped never rejected
//! - **Mutation API**: [`GameEngine`], the only way state changes
//! - **Win/draw evaluator**: [`rules`], a local line scan from the last mark
//! - **Invariants**: [`invariants`], checked after every mutation in debug builds
//! - **Sessions**: [`SessionManager`], explicit handles to engine instances
//!
//! Views read [`GameState`] and call the mutation API; they never touch
//! state directly. Invalid moves are silently ignored and out-of-range
//! configuration is clamped, so gameplay has no error surface.
//!
//! # Example
//!
//! ```
//! use triad_tictactoe::{GameConfig, GameEngine, MoveOutcome, Player};
//!
//! let mut engine = GameEngine::new(GameConfig::new(3, 3));
//! engine.set_players(vec![
//!     Player::new(1, "Ada", 'X', "#2196f3"),
//!     Player::new(2, "Grace", 'O', "#f44336"),
//! ]);
//!
//! assert_eq!(engine.make_move(1, 1), MoveOutcome::Continued { next: 1 });
//! // Occupied cells are ignored without error.
//! assert!(!engine.make_move(1, 1).is_applied());
//! assert_eq!(engine.state().move_count(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod engine;
pub mod invariants;
pub mod rules;
mod session;
mod state;
mod types;

pub use config::{
    DEFAULT_BOARD_SIZE, DEFAULT_WIN_CONDITION, GameConfig, MAX_BOARD_SIZE, MAX_PLAYERS,
    MIN_BOARD_SIZE, MIN_WIN_CONDITION,
};
pub use engine::{GameEngine, IgnoreReason, MoveOutcome};
pub use session::{GameSession, SessionError, SessionErrorKind, SessionId, SessionManager};
pub use state::{GameState, Outcome, Phase};
pub use types::{Board, Player, PlayerId, Position, Square, roster_is_ready};
