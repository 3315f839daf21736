//! Win detection by local line scan from the last placed mark.

use crate::types::{Board, PlayerId, Position, Square};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// One of the four line directions checked for a win.
///
/// Declaration order is the order axes are checked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, strum::Display)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Axis {
    /// Unit step `(d_row, d_col)` in the positive direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// A completed line.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct WinningLine {
    /// Axis the line lies on.
    axis: Axis,
    /// Cells of the run: the played cell, then outward in the positive
    /// direction, then outward in the negative direction.
    cells: Vec<Position>,
}

impl WinningLine {
    /// Consumes the line, returning its cells.
    pub fn into_cells(self) -> Vec<Position> {
        self.cells
    }
}

/// Checks whether the mark just placed at `played` completes a line.
///
/// Each axis is scanned outward from `played` in both directions, up to
/// `win_condition - 1` cells each way, stopping at the board edge or the
/// first cell not held by `player`. The first axis whose run reaches
/// `win_condition` wins; later axes are not examined. The run is reported
/// whole, so it may hold more than `win_condition` cells.
#[instrument(skip(board), fields(size = board.size()))]
pub fn winning_line(
    board: &Board,
    played: Position,
    player: PlayerId,
    win_condition: usize,
) -> Option<WinningLine> {
    let reach = win_condition.saturating_sub(1);

    for axis in Axis::iter() {
        let (d_row, d_col) = axis.delta();
        let mut cells = vec![played];

        for sign in [1, -1] {
            for distance in 1..=reach {
                let next = played
                    .offset(d_row * sign, d_col * sign, distance, board.size())
                    .filter(|pos| board.get(*pos) == Some(Square::Occupied(player)));
                match next {
                    Some(pos) => cells.push(pos),
                    None => break,
                }
            }
        }

        if cells.len() >= win_condition {
            debug!(%axis, run = cells.len(), "Line completed");
            return Some(WinningLine::new(axis, cells));
        }
    }

    None
}
