//! Move count invariant: the counter matches the marks on the board.

use super::Invariant;
use crate::state::GameState;

/// Invariant: `move_count` equals the number of occupied cells.
pub struct MoveCountInvariant;

impl Invariant<GameState> for MoveCountInvariant {
    fn holds(state: &GameState) -> bool {
        state.move_count() == state.board().occupied_count()
    }

    fn description() -> &'static str {
        "Move count equals the number of occupied cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::types::{Position, Square};

    #[test]
    fn test_empty_state_holds() {
        assert!(MoveCountInvariant::holds(&GameState::default()));
    }

    #[test]
    fn test_unrecorded_mark_violates() {
        let mut state = GameState::new(GameConfig::new(3, 3));
        state.board.set(Position::new(1, 1), Square::Occupied(1));
        assert!(!MoveCountInvariant::holds(&state));

        state.move_count = 1;
        assert!(MoveCountInvariant::holds(&state));
    }
}
