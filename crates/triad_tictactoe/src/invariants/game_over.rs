//! Game-over invariant: the game ends exactly on a win or a full board.

use super::Invariant;
use crate::rules::is_full;
use crate::state::GameState;

/// Invariant: `game_over` iff a winner exists or every cell is taken.
pub struct GameOverConsistentInvariant;

impl Invariant<GameState> for GameOverConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let should_be_over = state.winner().is_some() || is_full(state.board());
        state.game_over() == should_be_over
    }

    fn description() -> &'static str {
        "Game is over exactly when there is a winner or the board is full"
    }
}
