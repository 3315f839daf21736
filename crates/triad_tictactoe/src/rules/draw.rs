//! Draw detection.

use crate::types::{Board, Square};
use tracing::instrument;

/// Checks if every square is occupied.
///
/// The engine counts moves instead; this reads the board itself and is what
/// the game-over invariant checks against.
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}
