//! # Vengeance
//!
//! Mechanics core of a maze-chase game played from the ghosts' side.
//!
//! ## Architecture Overview
//!
//! The crate is a frame-stepped simulation with no windowing or audio of its
//! own. A front end feeds it key presses and frame times and reads back what
//! to draw and which sounds to play.
//!
//! - **Generation**: recursive-division mazes with a fixed ghost town, a
//!   connectivity repair pass and crossing removal; item layout; spawn plans
//! - **Game**: the wall grid, actors, turn discipline, the AI policy engine,
//!   ghost abilities and the [`Simulation`] that owns and advances them
//! - **Input**: key bindings and player commands
//! - **Rendering**: a backend-independent draw surface and an ASCII renderer
//! - **Utils**: dice, clocks, grid math and the distance flood fill
//!
//! ## Example
//!
//! ```
//! use vengeance::{AiMode, ActorKind, GameOutcome, ManualClock, MazeConfig, Simulation};
//!
//! let clock = ManualClock::new();
//! let mut sim = Simulation::new(MazeConfig::for_testing(42), Box::new(clock.clone())).unwrap();
//! sim.actor_mut(ActorKind::Blinky).set_mode(AiMode::Hunt);
//!
//! for _ in 0..60 {
//!     clock.advance(1.0 / 60.0);
//!     sim.update(1.0 / 60.0);
//! }
//! assert!(matches!(
//!     sim.outcome(),
//!     GameOutcome::Playing | GameOutcome::Victory
//! ));
//! ```

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the vengeance crate.
///
/// The simulation itself never fails; errors come from configuration,
/// generator validation and I/O at the edges.
#[derive(thiserror::Error, Debug)]
pub enum VengeanceError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generated content broke a structural guarantee
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the vengeance codebase.
pub type VengeanceResult<T> = Result<T, VengeanceError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed game constants.
pub mod config {
    /// Pacman plus four ghosts
    pub const ACTOR_COUNT: usize = 5;

    /// Number of sound slots raised for the audio layer
    pub const SOUND_SLOTS: usize = 8;

    /// Half-width in pixels of the box around Pacman that counts as a collision
    pub const COLLISION_BOX: i32 = 8;

    /// Seconds per sprite animation cycle
    pub const ANIMATION_PERIOD: f32 = 0.66;

    /// Share of each half cycle spent on an outer frame
    pub const ANIMATION_RATIO: f32 = 0.33;
}
