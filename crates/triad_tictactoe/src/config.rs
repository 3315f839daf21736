//! Board size and win length, with clamping.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Smallest supported board side.
pub const MIN_BOARD_SIZE: usize = 3;
/// Largest supported board side.
pub const MAX_BOARD_SIZE: usize = 12;
/// Shortest supported winning line.
pub const MIN_WIN_CONDITION: usize = 3;
/// Board side used when nothing else is configured.
pub const DEFAULT_BOARD_SIZE: usize = 5;
/// Win length used when nothing else is configured.
pub const DEFAULT_WIN_CONDITION: usize = 4;
/// Most players a game seats.
pub const MAX_PLAYERS: usize = 3;

/// Game configuration.
///
/// `win_condition <= board_size` always holds. Out-of-range requests are
/// clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    board_size: usize,
    win_condition: usize,
}

impl GameConfig {
    /// Builds a configuration from raw requests, clamping both values.
    #[instrument]
    pub fn new(board_size: i64, win_condition: i64) -> Self {
        let board_size = clamp_board_size(board_size);
        Self {
            board_size,
            win_condition: clamp_win_condition(win_condition, board_size),
        }
    }

    /// Returns the board side length.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Returns the number of marks in a row required to win.
    pub fn win_condition(&self) -> usize {
        self.win_condition
    }

    /// Returns the number of cells on the board.
    pub fn total_cells(&self) -> usize {
        self.board_size * self.board_size
    }

    /// Returns a configuration with a new board size.
    ///
    /// The win length is lowered to the new size if it no longer fits.
    #[instrument(skip(self), fields(current = self.board_size))]
    pub fn with_board_size(self, requested: i64) -> Self {
        let board_size = clamp_board_size(requested);
        let win_condition = self.win_condition.min(board_size);
        Self {
            board_size,
            win_condition,
        }
    }

    /// Returns a configuration with a new win length, clamped to `[3, board_size]`.
    #[instrument(skip(self), fields(board_size = self.board_size))]
    pub fn with_win_condition(self, requested: i64) -> Self {
        Self {
            board_size: self.board_size,
            win_condition: clamp_win_condition(requested, self.board_size),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            win_condition: DEFAULT_WIN_CONDITION,
        }
    }
}

fn clamp_board_size(requested: i64) -> usize {
    let clamped = clamp_to(requested, MIN_BOARD_SIZE, MAX_BOARD_SIZE);
    if i64::try_from(clamped).ok() != Some(requested) {
        debug!(requested, clamped, "Board size clamped");
    }
    clamped
}

fn clamp_win_condition(requested: i64, board_size: usize) -> usize {
    let clamped = clamp_to(requested, MIN_WIN_CONDITION, board_size);
    if i64::try_from(clamped).ok() != Some(requested) {
        debug!(requested, clamped, "Win condition clamped");
    }
    clamped
}

fn clamp_to(requested: i64, min: usize, max: usize) -> usize {
    if requested <= 0 {
        return min;
    }
    usize::try_from(requested).map_or(max, |v| v.clamp(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_five_by_five_connect_four() {
        let config = GameConfig::default();
        assert_eq!(config.board_size(), 5);
        assert_eq!(config.win_condition(), 4);
        assert_eq!(config.total_cells(), 25);
    }

    #[test]
    fn test_board_size_clamped() {
        for (requested, expected) in [(15, 12), (1, 3), (-4, 3), (0, 3), (7, 7), (i64::MAX, 12)] {
            let config = GameConfig::default().with_board_size(requested);
            assert_eq!(config.board_size(), expected, "requested {requested}");
            assert!(config.win_condition() <= config.board_size());
        }
    }

    #[test]
    fn test_shrinking_board_lowers_win_condition() {
        let config = GameConfig::new(8, 7).with_board_size(4);
        assert_eq!(config.board_size(), 4);
        assert_eq!(config.win_condition(), 4);
    }

    #[test]
    fn test_growing_board_keeps_win_condition() {
        let config = GameConfig::new(4, 4).with_board_size(10);
        assert_eq!(config.win_condition(), 4);
    }

    #[test]
    fn test_win_condition_clamped_to_board() {
        let config = GameConfig::new(5, 4);
        assert_eq!(config.with_win_condition(10).win_condition(), 5);
        assert_eq!(config.with_win_condition(2).win_condition(), 3);
        assert_eq!(config.with_win_condition(-1).win_condition(), 3);
    }

    #[test]
    fn test_new_clamps_both() {
        let config = GameConfig::new(20, 20);
        assert_eq!(config.board_size(), 12);
        assert_eq!(config.win_condition(), 12);
    }
}
