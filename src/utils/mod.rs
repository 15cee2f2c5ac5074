//! # Utilities Module
//!
//! Randomness, time sources, grid mathematics and the distance flood fill.

pub mod clock;
pub mod dice;
pub mod math;
pub mod pathfinding;

pub use clock::*;
pub use dice::*;
pub use math::*;
pub use pathfinding::*;
