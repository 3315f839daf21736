//! Winning cells invariant: highlighted cells exist only alongside a winner.

use super::Invariant;
use crate::state::GameState;

/// Invariant: `winning_cells` is non-empty iff a winner is set.
pub struct WinningCellsInvariant;

impl Invariant<GameState> for WinningCellsInvariant {
    fn holds(state: &GameState) -> bool {
        state.winning_cells().is_empty() == state.winner().is_none()
    }

    fn description() -> &'static str {
        "Winning cells are recorded exactly when there is a winner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn test_cells_without_winner_violate() {
        let mut state = GameState::default();
        assert!(WinningCellsInvariant::holds(&state));

        state.winning_cells.insert(Position::new(0, 0));
        assert!(!WinningCellsInvariant::holds(&state));
    }
}
