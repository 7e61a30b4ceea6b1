//! # Tile Merge Library
//!
//! This library provides the board engine of a 2048-style sliding tile puzzle played on a
//! square grid: shifting and merging tiles along an axis, spawning new tiles, detecting
//! boards on which no move is left, and scoring.
//!
//! It is used by two binaries:
//! - `human_player`: interactive play in the terminal.
//! - `board_runner`: loads a board dump from a file, applies a sequence of moves with a
//!   seeded RNG and prints the board after each of them.
//!
//! ## Modules
//! - `engine`: the board (`Board`), moves (`Direction`, `Axis`), exponent arithmetic
//!   (`pow_int`) and play sessions (`Game`).
//! - `error`: error types for engine operations and board parsing.
//! - `render`: colored or plain terminal drawing driven by a `Palette`.
//! - `utils`: parsing boards from text.

#[cfg(test)]
mod arbitrary;
pub mod engine;
pub mod error;
pub mod render;
pub mod utils;

pub use crate::engine::{Board, Direction, Game, GameStatus, MoveOutcome};
pub use crate::error::{EngineError, ParseBoardError};
