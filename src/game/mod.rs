//! # Game Module
//!
//! Grid model, actors, AI and the frame-stepped simulation.
//!
//! This module contains the mechanics core of the game:
//! - The wall grid and its pixel-space geometry
//! - Actors (Pacman and the four ghosts) built from motion and animation parts
//! - The AI policy engine and the turn/movement discipline
//! - The simulation that owns everything and advances it frame by frame

pub mod abilities;
pub mod actor;
pub mod ai;
pub mod grid;
pub mod movement;
pub mod state;

pub use abilities::*;
pub use actor::*;
pub use ai::*;
pub use grid::*;
pub use movement::*;
pub use state::*;

use serde::{Deserialize, Serialize};

/// A cell coordinate in the maze grid.
///
/// `x` grows to the right and `y` grows upward, matching pixel space.
///
/// # Examples
///
/// ```
/// use vengeance::{Direction, Position};
///
/// let pos = Position::new(2, 2);
/// assert_eq!(pos.step(Direction::Up), Position::new(2, 3));
/// assert_eq!(pos.squared_distance(Position::new(5, 6)), 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Squared Euclidean distance in grid units.
    pub fn squared_distance(self, other: Position) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// The adjacent position one step in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// The four axis-aligned movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// All directions in tie-break order: up, left, down, right.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use vengeance::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, 1));
    /// assert_eq!(Direction::Left.to_delta(), Position::new(-1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Down => Position::new(0, -1),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// True for up and down.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}
