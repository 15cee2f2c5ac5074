//! # Ghost Abilities
//!
//! Each ghost has one special move, gated by its ability level:
//!
//! | Ghost  | Ability  | Effect                                          |
//! |--------|----------|-------------------------------------------------|
//! | Blinky | Sprint   | Speed boost that fades in as the level grows    |
//! | Pinky  | Jump     | Skips `level` cells ahead, straight over walls  |
//! | Inky   | Immunity | Stops being scared for the ability window       |
//! | Clyde  | Scatter  | Teleports to a random cell within `2 * level`   |
//!
//! An ability can be used again `level` seconds after the last use. Blinky
//! and Inky have a timed effect that lasts `level` seconds, so they wait
//! `2 * level` seconds in total.

use crate::game::{
    cell_of, move_to_cell, ActorKind, Direction, Movable, Position, Simulation, SpriteState,
};
use crate::utils::clamp_to_grid;
use log::debug;

/// Blinky's sprint speed at ability level `level`.
pub fn sprint_speed(default_speed: f32, level: u32) -> f32 {
    default_speed * (2.0 - 0.5f32.powi(level as i32))
}

/// Seconds that must pass between two uses of `kind`'s ability.
pub fn ability_cooldown(kind: ActorKind, level: u32) -> f64 {
    match kind {
        ActorKind::Blinky | ActorKind::Inky => 2.0 * level as f64,
        _ => level as f64,
    }
}

impl Simulation {
    /// Triggers `kind`'s ability. Returns `false` with nothing changed when
    /// the ghost has no ability level yet, is still cooling down, or is
    /// Pacman.
    pub fn execute_ability(&mut self, kind: ActorKind) -> bool {
        let now = self.clock.now();
        let (width, height) = (self.grid.width(), self.grid.height());
        let actor = &self.actors[kind.index()];
        let level = actor.level();
        if level < 1 || now - actor.ability_triggered() < ability_cooldown(kind, level) {
            return false;
        }
        let cell = cell_of(&self.grid, actor.motion());
        let reach = level as i32;

        let success = match kind {
            ActorKind::Pacman => false,
            ActorKind::Blinky => {
                let actor = &mut self.actors[kind.index()];
                let speed = sprint_speed(actor.default_speed(), level);
                actor.set_speed(speed);
                true
            }
            ActorKind::Pinky => {
                // Na counts as facing up; the special states stay put
                let jump = match actor.state().direction() {
                    Some(direction) => Some(direction),
                    None if actor.state() == SpriteState::Na => Some(Direction::Up),
                    None => None,
                };
                if let Some(direction) = jump {
                    let delta = direction.to_delta();
                    let target = Position::new(cell.x + delta.x * reach, cell.y + delta.y * reach);
                    let target = clamp_to_grid(target, width, height);
                    move_to_cell(&self.grid, &mut self.actors[kind.index()], target);
                }
                true
            }
            ActorKind::Inky => {
                self.actors[kind.index()].set_scared(false);
                true
            }
            ActorKind::Clyde => {
                if width * height < 2 {
                    false
                } else {
                    let target = loop {
                        let x = self.dice.roll_int_range(cell.x - 2 * reach, cell.x + 2 * reach);
                        let y = self.dice.roll_int_range(cell.y - 2 * reach, cell.y + 2 * reach);
                        let candidate = clamp_to_grid(Position::new(x, y), width, height);
                        if candidate != cell {
                            break candidate;
                        }
                    };
                    move_to_cell(&self.grid, &mut self.actors[kind.index()], target);
                    true
                }
            }
        };

        if success {
            self.actors[kind.index()].set_ability_triggered(now);
            self.stats.abilities_used += 1;
            debug!("{} used its level {} ability at {:.2}s", kind, level, now);
        }
        success
    }

    /// Ends Blinky's sprint and Inky's immunity once their windows lapse.
    pub(crate) fn expire_abilities(&mut self, now: f64) {
        let blinky = &mut self.actors[ActorKind::Blinky.index()];
        if now - blinky.ability_triggered() > blinky.level() as f64 {
            let speed = blinky.default_speed();
            blinky.set_speed(speed);
        }
        let blinky_scared = blinky.is_scared();

        let inky = &mut self.actors[ActorKind::Inky.index()];
        if now - inky.ability_triggered() > inky.level() as f64 {
            inky.set_scared(blinky_scared);
        }
    }
}
