//! Core domain types: players, squares, positions and the board grid.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::instrument;

/// Stable identity of a player within a game.
pub type PlayerId = u32;

/// A participant in the game.
///
/// Players are immutable during play; the setup view edits names
/// before handing the roster to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    symbol: char,
    color: String,
}

impl Player {
    /// Creates a new player.
    pub fn new(id: PlayerId, name: impl Into<String>, symbol: char, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            symbol,
            color: color.into(),
        }
    }

    /// Returns the player's identity.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the mark placed on the board.
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Returns the display color token. Opaque to the engine.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns a copy of this player with a different name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns true if the trimmed name is non-empty.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// The three unnamed seats offered by the setup view.
    pub fn default_roster() -> Vec<Player> {
        vec![
            Player::new(1, "", 'X', "#2196f3"),
            Player::new(2, "", 'O', "#f44336"),
            Player::new(3, "", 'Δ', "#4caf50"),
        ]
    }
}

/// Returns true if the roster may be committed with `set_players`.
///
/// Every seat needs a name and a distinct id. The engine never calls this;
/// it is the setup view's check.
#[instrument(skip(players), fields(count = players.len()))]
pub fn roster_is_ready(players: &[Player]) -> bool {
    let mut ids = HashSet::with_capacity(players.len());
    !players.is_empty()
        && players.iter().all(Player::has_name)
        && players.iter().all(|p| ids.insert(p.id()))
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(PlayerId),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn occupant(self) -> Option<PlayerId> {
        match self {
            Square::Empty => None,
            Square::Occupied(id) => Some(id),
        }
    }
}

/// Zero-based board coordinate, ordered row-major.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[display("({}, {})", row, col)]
pub struct Position {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Steps `distance` cells along `(d_row, d_col)`, staying inside a `size × size` grid.
    pub fn offset(self, d_row: isize, d_col: isize, distance: usize, size: usize) -> Option<Self> {
        let distance = isize::try_from(distance).ok()?;
        let row = self.row.checked_add_signed(d_row.checked_mul(distance)?)?;
        let col = self.col.checked_add_signed(d_col.checked_mul(distance)?)?;
        (row < size && col < size).then_some(Self { row, col })
    }
}

/// Square grid of `size × size` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Squares in row-major order.
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
        }
    }

    /// Returns the side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of cells.
    pub fn total_cells(&self) -> usize {
        self.squares.len()
    }

    /// Converts raw caller coordinates to a position, if in bounds.
    pub fn position(&self, row: i64, col: i64) -> Option<Position> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.contains(Position::new(row, col))
            .then_some(Position::new(row, col))
    }

    /// Returns true if the position lies on the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Option<Square> {
        if !self.contains(pos) {
            return None;
        }
        self.squares.get(pos.row * self.size + pos.col).copied()
    }

    /// Sets the square at the given position. Out-of-bounds writes are ignored.
    pub fn set(&mut self, pos: Position, square: Square) {
        if self.contains(pos) {
            self.squares[pos.row * self.size + pos.col] = square;
        }
    }

    /// Checks if a square is empty. Off-board positions are not empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Counts occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares
            .iter()
            .filter(|s| **s != Square::Empty)
            .count()
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4);
        assert_eq!(board.total_cells(), 16);
        assert_eq!(board.occupied_count(), 0);
        assert!(board.squares().iter().all(|s| *s == Square::Empty));
    }

    #[test]
    fn test_position_rejects_out_of_bounds() {
        let board = Board::new(3);
        assert_eq!(board.position(-1, 0), None);
        assert_eq!(board.position(0, 3), None);
        assert_eq!(board.position(2, 2), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new(3);
        board.set(Position::new(1, 2), Square::Occupied(7));
        assert_eq!(board.get(Position::new(1, 2)), Some(Square::Occupied(7)));
        assert!(!board.is_empty(Position::new(1, 2)));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_off_board_is_not_empty() {
        let board = Board::new(3);
        assert!(!board.is_empty(Position::new(3, 0)));
        assert_eq!(board.get(Position::new(0, 5)), None);
    }

    #[test]
    fn test_offset_stops_at_edges() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.offset(1, 1, 2, 3), Some(Position::new(2, 2)));
        assert_eq!(origin.offset(-1, 0, 1, 3), None);
        assert_eq!(origin.offset(0, 1, 3, 3), None);
        assert_eq!(Position::new(0, 2).offset(1, -1, 2, 3), Some(Position::new(2, 0)));
    }

    #[test]
    fn test_roster_readiness() {
        let roster = Player::default_roster();
        assert!(!roster_is_ready(&roster));
        assert!(!roster_is_ready(&[]));

        let named: Vec<_> = roster
            .into_iter()
            .zip(["Ada", "Grace", "   "])
            .map(|(p, n)| p.with_name(n))
            .collect();
        assert!(!roster_is_ready(&named));
        assert!(roster_is_ready(&named[..2]));
    }

    #[test]
    fn test_roster_with_shared_id_not_ready() {
        let roster = [
            Player::new(1, "Ada", 'X', "#2196f3"),
            Player::new(1, "Grace", 'O', "#f44336"),
        ];
        assert!(!roster_is_ready(&roster));
    }
}
