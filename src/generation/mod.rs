//! # Generation Module
//!
//! Procedural content for each level: the maze walls, the items and the
//! actor spawn plan.
//!
//! Every generator draws from the shared [`Dice`] so a whole level is
//! reproducible from one seed. Generation itself cannot fail; the
//! [`Generator::validate`] half of the trait reports structural problems as
//! errors for tests and the `--verify` driver flag.

pub mod items;
pub mod maze;
pub mod spawns;

pub use items::*;
pub use maze::*;
pub use spawns::*;

use crate::game::{Grid, GridGeometry};
use crate::utils::Dice;
use crate::{VengeanceError, VengeanceResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning constants for maze size, items and actor speeds.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
///
/// # Examples
///
/// ```
/// use vengeance::MazeConfig;
///
/// let config = MazeConfig::from_json_str(r#"{ "fruit_density": 0.5 }"#).unwrap();
/// assert_eq!(config.fruit_density, 0.5);
/// assert_eq!(config.min_width, 5);
/// assert_eq!(config.dimensions_for_level(1), (6, 8));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Random seed; `None` seeds from the operating system
    pub seed: Option<u64>,
    /// Width at level 1 (before rounding up to even)
    pub min_width: i32,
    /// Height at level 1 (before rounding up to even)
    pub min_height: i32,
    /// Width approached as the level grows
    pub max_width: i32,
    /// Height approached as the level grows
    pub max_height: i32,
    /// How quickly size and fruit quality grow with level
    pub level_scale_speed: f32,
    /// Edge length of one cell in pixels
    pub square_dim: f32,
    /// Probability that an ordinary cell holds fruit instead of a dot
    pub fruit_density: f32,
    /// Seconds ghosts stay scared after a large dot, before the level bonus
    pub vulnerability_duration: f64,
    /// Pacman's speed in pixels per second
    pub base_velocity: f32,
    /// Ghost speed as a fraction of `base_velocity`
    pub ghost_speed_factor: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl MazeConfig {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            min_width: 5,
            min_height: 7,
            max_width: 13,
            max_height: 17,
            level_scale_speed: 0.05,
            square_dim: 40.0,
            fruit_density: 0.1,
            vulnerability_duration: 3.0,
            base_velocity: 100.0,
            ghost_speed_factor: 0.8,
            viewport_width: 1024.0,
            viewport_height: 768.0,
        }
    }

    /// A seeded configuration with the default tuning.
    pub fn for_testing(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    pub fn from_json_str(json: &str) -> VengeanceResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> VengeanceResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks that the tuning values describe a playable maze.
    pub fn validate(&self) -> VengeanceResult<()> {
        if self.min_width < 3 || self.min_height < 3 {
            return Err(VengeanceError::InvalidConfig(format!(
                "minimum size {}x{} cannot hold the ghost town",
                self.min_width, self.min_height
            )));
        }
        if self.min_width > self.max_width || self.min_height > self.max_height {
            return Err(VengeanceError::InvalidConfig(format!(
                "minimum size {}x{} exceeds maximum {}x{}",
                self.min_width, self.min_height, self.max_width, self.max_height
            )));
        }
        if self.square_dim <= 0.0 {
            return Err(VengeanceError::InvalidConfig(
                "square_dim must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.fruit_density) {
            return Err(VengeanceError::InvalidConfig(format!(
                "fruit_density {} is outside [0, 1]",
                self.fruit_density
            )));
        }
        if self.level_scale_speed < 0.0 || self.vulnerability_duration < 0.0 {
            return Err(VengeanceError::InvalidConfig(
                "level_scale_speed and vulnerability_duration must not be negative".to_string(),
            ));
        }
        if self.base_velocity <= 0.0 || self.ghost_speed_factor <= 0.0 {
            return Err(VengeanceError::InvalidConfig(
                "actor speeds must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Grid size for a level. Grows from the minimum toward the maximum and
    /// is rounded up to even values.
    pub fn dimensions_for_level(&self, level: u32) -> (i32, i32) {
        let step = level.max(1) as f32 - 1.0;
        let scale = |min: i32, max: i32| -> i32 {
            let size = (min - max) as f32
                / ((max - min) as f32 * self.level_scale_speed * step + 1.0)
                + max as f32;
            let size = size as i32;
            size + size % 2
        };
        (
            scale(self.min_width, self.max_width),
            scale(self.min_height, self.max_height),
        )
    }

    /// Pixel geometry centring a `width x height` grid in the viewport.
    pub fn geometry_for(&self, width: i32, height: i32) -> GridGeometry {
        GridGeometry::centered(
            width,
            height,
            self.square_dim,
            self.viewport_width,
            self.viewport_height,
        )
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// What a generator is asked to build for one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub level: u32,
    pub width: i32,
    pub height: i32,
    pub geometry: GridGeometry,
}

impl LevelSpec {
    pub fn new(level: u32, width: i32, height: i32, geometry: GridGeometry) -> Self {
        Self {
            level,
            width,
            height,
            geometry,
        }
    }

    /// The size and geometry `config` prescribes for `level`.
    pub fn for_level(config: &MazeConfig, level: u32) -> Self {
        let (width, height) = config.dimensions_for_level(level);
        Self::new(level, width, height, config.geometry_for(width, height))
    }
}

/// Trait for procedural generators.
///
/// Generation is total: given a spec and dice it always produces content.
/// Validation is separate so callers decide whether to pay for it.
pub trait Generator<T> {
    /// Generates content for the level described by `spec`.
    fn generate(&self, spec: &LevelSpec, dice: &mut Dice) -> T;

    /// Checks that generated content meets its structural guarantees.
    fn validate(&self, content: &T, spec: &LevelSpec) -> VengeanceResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Dice for a configured seed, or seeded from the OS when there is none.
    pub fn create_dice(seed: Option<u64>) -> Dice {
        match seed {
            Some(seed) => Dice::from_seed(seed),
            None => Dice::from_entropy(),
        }
    }

    /// Checks the structural guarantees of a finished maze.
    pub fn validate_grid(grid: &Grid) -> VengeanceResult<()> {
        if !grid.walls_mirrored() {
            return Err(VengeanceError::GenerationFailed(
                "wall flags between neighbours disagree".to_string(),
            ));
        }
        if !grid.border_is_solid() {
            return Err(VengeanceError::GenerationFailed(
                "outer border has a gap".to_string(),
            ));
        }

        let reached = grid.reachable_from(grid.ghost_town_entrance());
        let unreached = reached.iter().filter(|r| !**r).count();
        if unreached > 0 {
            return Err(VengeanceError::GenerationFailed(format!(
                "{} cells unreachable from the ghost town",
                unreached
            )));
        }
        if !grid.is_fully_accessible() {
            return Err(VengeanceError::GenerationFailed(
                "accessibility flags are stale".to_string(),
            ));
        }

        let crossings = grid.open_crossings();
        if let Some(first) = crossings.first() {
            return Err(VengeanceError::GenerationFailed(format!(
                "{} open crossings, first at vertex ({}, {})",
                crossings.len(),
                first.x,
                first.y
            )));
        }
        Ok(())
    }
}
