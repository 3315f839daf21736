//! First-class invariants over [`GameState`].
//!
//! Invariants are logical properties that must hold after every mutation.
//! They are testable independently and document what the engine guarantees.

mod game_over;
mod move_count;
mod turn_index;
mod winning_cells;

pub use game_over::GameOverConsistentInvariant;
pub use move_count::MoveCountInvariant;
pub use turn_index::TurnIndexInRangeInvariant;
pub use winning_cells::WinningCellsInvariant;

use crate::state::GameState;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>),+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

/// Every invariant the engine maintains.
pub type EngineInvariants = (
    MoveCountInvariant,
    GameOverConsistentInvariant,
    WinningCellsInvariant,
    TurnIndexInRangeInvariant,
);

/// Checks the full engine invariant set.
pub fn check_engine_invariants(state: &GameState) -> Result<(), Vec<InvariantViolation>> {
    EngineInvariants::check_all(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::types::{Position, Square};

    #[test]
    fn test_fresh_state_satisfies_all() {
        assert!(check_engine_invariants(&GameState::default()).is_ok());
    }

    #[test]
    fn test_violations_are_collected() {
        let mut state = GameState::new(GameConfig::new(3, 3));
        state.board.set(Position::new(0, 0), Square::Occupied(1));
        state.game_over = true;

        let violations = check_engine_invariants(&state).expect_err("broken state");
        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations[0].description,
            MoveCountInvariant::description()
        );
    }

    #[test]
    fn test_pair_set() {
        type Pair = (MoveCountInvariant, TurnIndexInRangeInvariant);
        assert!(Pair::check_all(&GameState::default()).is_ok());
    }
}
