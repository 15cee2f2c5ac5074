//! # Command Definitions
//!
//! Player commands and how the simulation carries them out.

use crate::game::{ActorKind, Direction, SoundEffect, Simulation};
use crate::utils::format_distance_map;
use log::debug;
use serde::{Deserialize, Serialize};

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Turn the selected actor
    Turn(Direction),
    /// Select the next living ghost
    RotateSelection,
    /// Use the selected ghost's ability
    ExecuteAbility,
    TogglePause,
    /// Generate the next maze, or start over at level 1
    NewLevel { reset: bool },
    /// Spend a level-up on a ghost
    LevelUp(ActorKind),
    /// Dump Pacman's distance map
    DumpDistances,
}

/// What happened when a command was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command took effect
    Applied,
    /// The command was valid but had no effect (blocked turn, ability on
    /// cooldown, dead ghost, ...)
    Refused,
    /// New selection after a rotation
    Selected(ActorKind),
    /// Pause state after a toggle
    Paused(bool),
    /// Rendered distance map
    Distances(String),
}

impl CommandOutcome {
    fn from_flag(applied: bool) -> Self {
        if applied {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Refused
        }
    }

    pub fn is_refused(&self) -> bool {
        matches!(self, CommandOutcome::Refused)
    }
}

impl Simulation {
    /// Applies a player command to the selected actor or the whole game.
    ///
    /// # Examples
    ///
    /// ```
    /// use vengeance::{Command, CommandOutcome, ManualClock, MazeConfig, Simulation};
    ///
    /// let mut sim = Simulation::new(MazeConfig::for_testing(2), Box::new(ManualClock::new())).unwrap();
    /// assert_eq!(sim.apply_command(&Command::TogglePause), CommandOutcome::Paused(true));
    /// assert!(sim.is_paused());
    /// ```
    pub fn apply_command(&mut self, command: &Command) -> CommandOutcome {
        debug!("Applying {:?}", command);
        match *command {
            Command::Turn(direction) => {
                let selected = self.selection();
                CommandOutcome::from_flag(self.turn_actor(selected, direction))
            }
            Command::RotateSelection => match self.rotate_selection() {
                Some(kind) => CommandOutcome::Selected(kind),
                None => CommandOutcome::Refused,
            },
            Command::ExecuteAbility => {
                let selected = self.selection();
                let used = self.execute_ability(selected);
                if used {
                    self.sounds.raise(SoundEffect::Ability);
                }
                CommandOutcome::from_flag(used)
            }
            Command::TogglePause => CommandOutcome::Paused(self.toggle_pause()),
            Command::NewLevel { reset } => {
                self.new_level(reset);
                CommandOutcome::Applied
            }
            Command::LevelUp(kind) => CommandOutcome::from_flag(self.level_up(kind)),
            Command::DumpDistances => {
                let map = self.distance_map_for(ActorKind::Pacman);
                CommandOutcome::Distances(format_distance_map(&map))
            }
        }
    }
}
