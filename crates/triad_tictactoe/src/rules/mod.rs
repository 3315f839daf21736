//! Game rules.
//!
//! Pure functions evaluating a board after a move. Rules are kept apart
//! from the engine so they can be tested and reasoned about on their own.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{Axis, WinningLine, winning_line};
