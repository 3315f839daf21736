//! Turn index invariant: the player to move is always a seated player.

use super::Invariant;
use crate::state::GameState;

/// Invariant: `current_player_index` points into `players`, or is 0 when
/// nobody is seated.
pub struct TurnIndexInRangeInvariant;

impl Invariant<GameState> for TurnIndexInRangeInvariant {
    fn holds(state: &GameState) -> bool {
        if state.players().is_empty() {
            state.current_player_index() == 0
        } else {
            state.current_player_index() < state.players().len()
        }
    }

    fn description() -> &'static str {
        "Current player index points at a seated player"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_index_past_roster_violates() {
        let mut state = GameState::default();
        state.players = Player::default_roster();
        state.current_player_index = 2;
        assert!(TurnIndexInRangeInvariant::holds(&state));

        state.current_player_index = 3;
        assert!(!TurnIndexInRangeInvariant::holds(&state));
    }

    #[test]
    fn test_empty_roster_requires_zero() {
        let mut state = GameState::default();
        state.current_player_index = 1;
        assert!(!TurnIndexInRangeInvariant::holds(&state));
    }
}
