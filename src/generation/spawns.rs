//! # Spawn Planning
//!
//! Where each actor starts a level and which ghosts take part.

use crate::game::{ActorKind, Position};
use crate::generation::{Generator, LevelSpec};
use crate::utils::Dice;
use crate::{VengeanceError, VengeanceResult};
use serde::{Deserialize, Serialize};

/// Starting cell and availability of one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub kind: ActorKind,
    pub cell: Position,
    pub alive: bool,
}

/// Starting state of all five actors, indexed like [`ActorKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPlan {
    pub spawns: [Spawn; 5],
}

impl SpawnPlan {
    pub fn get(&self, kind: ActorKind) -> &Spawn {
        &self.spawns[kind.index()]
    }

    pub fn pacman(&self) -> Position {
        self.get(ActorKind::Pacman).cell
    }
}

/// Places Pacman on a random border cell and the ghosts in the ghost town.
///
/// Ghosts join as levels go by: Blinky from level 1, Pinky from 3, Inky
/// from 5 and Clyde from 7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnPlanner;

impl SpawnPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Whether `kind` plays at `level`.
    pub fn is_unlocked(kind: ActorKind, level: u32) -> bool {
        match kind {
            ActorKind::Pacman => true,
            ActorKind::Blinky => level > 0,
            ActorKind::Pinky => level > 2,
            ActorKind::Inky => level > 4,
            ActorKind::Clyde => level > 6,
        }
    }

    /// Ghost-town cell for a ghost. Pacman has no fixed cell and gets the
    /// origin.
    pub fn home_cell(kind: ActorKind, width: i32, height: i32) -> Position {
        let (cx, cy) = (width / 2, height / 2);
        match kind {
            ActorKind::Pacman => Position::origin(),
            ActorKind::Blinky => Position::new(cx, cy - 1),
            ActorKind::Pinky => Position::new(cx - 1, cy),
            ActorKind::Inky => Position::new(cx + 1, cy),
            ActorKind::Clyde => Position::new(cx, cy),
        }
    }

    /// Border cell for slot `slot` of `2 * width + 2 * height`, walking the
    /// top edge, the left edge, the bottom edge, then the right edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use vengeance::{Position, SpawnPlanner};
    ///
    /// assert_eq!(SpawnPlanner::edge_cell(2, 6, 8), Position::new(2, 7));
    /// assert_eq!(SpawnPlanner::edge_cell(6, 6, 8), Position::new(0, 0));
    /// assert_eq!(SpawnPlanner::edge_cell(27, 6, 8), Position::new(5, 7));
    /// ```
    pub fn edge_cell(slot: i32, width: i32, height: i32) -> Position {
        if slot < width {
            Position::new(slot, height - 1)
        } else if slot < width + height {
            Position::new(0, slot - width)
        } else if slot < 2 * width + height {
            Position::new(slot - height - width, 0)
        } else {
            Position::new(width - 1, slot - 2 * width - height)
        }
    }
}

impl Generator<SpawnPlan> for SpawnPlanner {
    fn generate(&self, spec: &LevelSpec, dice: &mut Dice) -> SpawnPlan {
        let (width, height) = (spec.width, spec.height);
        let slot = dice.roll_int(2 * width + 2 * height);
        let spawns = ActorKind::ALL.map(|kind| Spawn {
            kind,
            cell: match kind {
                ActorKind::Pacman => Self::edge_cell(slot, width, height),
                ghost => Self::home_cell(ghost, width, height),
            },
            alive: Self::is_unlocked(kind, spec.level),
        });
        SpawnPlan { spawns }
    }

    fn validate(&self, plan: &SpawnPlan, spec: &LevelSpec) -> VengeanceResult<()> {
        for spawn in &plan.spawns {
            let Position { x, y } = spawn.cell;
            if x < 0 || y < 0 || x >= spec.width || y >= spec.height {
                return Err(VengeanceError::GenerationFailed(format!(
                    "{} spawns off the grid at ({}, {})",
                    spawn.kind, x, y
                )));
            }
        }
        let Position { x, y } = plan.pacman();
        if x != 0 && y != 0 && x != spec.width - 1 && y != spec.height - 1 {
            return Err(VengeanceError::GenerationFailed(format!(
                "Pacman spawns inside the maze at ({}, {})",
                x, y
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "SpawnPlanner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GridGeometry;

    #[test]
    fn test_every_edge_slot_is_on_the_border() {
        let (w, h) = (6, 8);
        for slot in 0..(2 * w + 2 * h) {
            let pos = SpawnPlanner::edge_cell(slot, w, h);
            assert!(pos.x >= 0 && pos.x < w && pos.y >= 0 && pos.y < h, "slot {}", slot);
            assert!(pos.x == 0 || pos.y == 0 || pos.x == w - 1 || pos.y == h - 1);
        }
    }

    #[test]
    fn test_ghosts_unlock_by_level() {
        let alive = |level| {
            ActorKind::GHOSTS
                .iter()
                .filter(|&&k| SpawnPlanner::is_unlocked(k, level))
                .count()
        };
        assert_eq!(alive(1), 1);
        assert_eq!(alive(3), 2);
        assert_eq!(alive(5), 3);
        assert_eq!(alive(6), 3);
        assert_eq!(alive(7), 4);
    }

    #[test]
    fn test_plan_is_valid() {
        let planner = SpawnPlanner::new();
        let spec = LevelSpec::new(4, 8, 10, GridGeometry::default());
        let mut dice = Dice::from_seed(8);
        for _ in 0..50 {
            let plan = planner.generate(&spec, &mut dice);
            assert!(planner.validate(&plan, &spec).is_ok());
            assert_eq!(plan.get(ActorKind::Blinky).cell, Position::new(4, 4));
            assert_eq!(plan.get(ActorKind::Clyde).cell, Position::new(4, 5));
            assert!(plan.get(ActorKind::Pinky).alive);
            assert!(!plan.get(ActorKind::Inky).alive);
        }
    }
}
