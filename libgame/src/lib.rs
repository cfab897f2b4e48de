//! A finite Game of Life engine.
//!
//! A [`Board`] owns every [`Cell`] of a clipped (non-wrapping) grid and advances it one
//! generation at a time with a count, compute, commit protocol.

pub use board::{Board, BoardError};
pub use cell::{Cell, CellState};
pub use pos::Position;
pub use rule::{Rule, RuleParseError};
pub use sampler::{RandomSampler, Sampler};

pub mod board;
pub mod cell;
pub mod pos;
pub mod rule;
pub mod sampler;
