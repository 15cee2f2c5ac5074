//! # Simulation State
//!
//! The object that owns the grid, items, actors, dice and clock and advances
//! them one frame at a time.
//!
//! Everything the rendering and input layers see goes through
//! [`Simulation`]: level transitions, the per-frame update, commands such as
//! turns and abilities, and the read surface (actors, items, sound slots,
//! score and outcome).

use crate::config;
use crate::game::{
    align_to_rail, cell_of, fully_entered, move_to_cell, stop_at_wall, turn, Actor, ActorKind,
    AiMode, Direction, Grid, Movable, Position,
};
use crate::generation::{
    utils, DivisionGenerator, Generator, ItemGenerator, ItemGrid, ItemKind, LevelSpec, MazeConfig,
    SpawnPlanner,
};
use crate::utils::{Clock, Dice};
use crate::VengeanceResult;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// One of the eight sound slots raised by the core for the audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    SmallDot,
    LargeDot,
    Fruit,
    VulnerabilityEnded,
    VulnerabilityStarted,
    GhostDeath,
    PacmanDeath,
    Ability,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; config::SOUND_SLOTS] = [
        SoundEffect::SmallDot,
        SoundEffect::LargeDot,
        SoundEffect::Fruit,
        SoundEffect::VulnerabilityEnded,
        SoundEffect::VulnerabilityStarted,
        SoundEffect::GhostDeath,
        SoundEffect::PacmanDeath,
        SoundEffect::Ability,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Raised/cleared flags for the sound slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundFlags {
    flags: [bool; config::SOUND_SLOTS],
}

impl SoundFlags {
    pub fn raise(&mut self, effect: SoundEffect) {
        self.flags[effect.index()] = true;
    }

    pub fn clear(&mut self, effect: SoundEffect) {
        self.flags[effect.index()] = false;
    }

    pub fn set(&mut self, effect: SoundEffect, raised: bool) {
        self.flags[effect.index()] = raised;
    }

    pub fn is_raised(&self, effect: SoundEffect) -> bool {
        self.flags[effect.index()]
    }

    /// Reads a slot and clears it.
    pub fn take(&mut self, effect: SoundEffect) -> bool {
        std::mem::replace(&mut self.flags[effect.index()], false)
    }

    /// All raised slots, in slot order.
    pub fn raised(&self) -> Vec<SoundEffect> {
        SoundEffect::ALL
            .into_iter()
            .filter(|&e| self.is_raised(e))
            .collect()
    }
}

/// Win/lose feed for the outer state machine. The player controls the
/// ghosts, so Pacman dying is a victory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Playing,
    /// Pacman is dead
    Victory,
    /// Every ghost is dead
    Defeat,
}

/// Running totals since the last fresh game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub frames: u64,
    pub items_eaten: u32,
    pub points_eaten: u32,
    pub ghosts_lost: u32,
    pub abilities_used: u32,
}

/// The mechanics core: grid, items, five actors and the frame update.
///
/// # Examples
///
/// ```
/// use vengeance::{ActorKind, GameOutcome, ManualClock, MazeConfig, Simulation};
///
/// let clock = ManualClock::new();
/// let mut sim = Simulation::new(MazeConfig::for_testing(1), Box::new(clock.clone())).unwrap();
/// assert_eq!(sim.level(), 1);
/// assert_eq!(sim.selection(), ActorKind::Blinky);
///
/// for _ in 0..30 {
///     clock.advance(1.0 / 30.0);
///     sim.update(1.0 / 30.0);
/// }
/// assert_eq!(sim.stats().frames, 30);
/// ```
#[derive(Debug)]
pub struct Simulation {
    pub(crate) config: MazeConfig,
    pub(crate) grid: Grid,
    pub(crate) items: ItemGrid,
    pub(crate) actors: [Actor; 5],
    pub(crate) dice: Dice,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) sounds: SoundFlags,
    pub(crate) stats: SimulationStats,
    level: u32,
    total_points: u32,
    paused: bool,
    last_vulnerability: Option<f64>,
}

impl Simulation {
    /// Creates a simulation and generates level 1.
    pub fn new(config: MazeConfig, clock: Box<dyn Clock>) -> VengeanceResult<Self> {
        config.validate()?;
        let dice = utils::create_dice(config.seed);
        let mut sim = Self::from_parts(
            config,
            Grid::open(1, 1, Default::default()),
            ItemGrid::empty(1, 1),
            dice,
            clock,
        );
        sim.new_level(true);
        Ok(sim)
    }

    /// Assembles a simulation around an existing grid and items, without
    /// generating anything. Actors start alive at their home cells with
    /// Pacman at the origin, at level 1, with Blinky selected.
    pub fn from_parts(
        config: MazeConfig,
        grid: Grid,
        items: ItemGrid,
        mut dice: Dice,
        clock: Box<dyn Clock>,
    ) -> Self {
        let now = clock.now();
        let actors = ActorKind::ALL.map(|kind| {
            Actor::new(
                kind,
                config.base_velocity,
                config.ghost_speed_factor,
                now,
                dice.roll_float(1.0),
            )
        });
        let mut sim = Self {
            config,
            grid,
            items,
            actors,
            dice,
            clock,
            sounds: SoundFlags::default(),
            stats: SimulationStats::default(),
            level: 1,
            total_points: 0,
            paused: false,
            last_vulnerability: None,
        };
        let (width, height) = (sim.grid.width(), sim.grid.height());
        for kind in ActorKind::ALL {
            let home = SpawnPlanner::home_cell(kind, width, height);
            move_to_cell(&sim.grid, &mut sim.actors[kind.index()], home);
        }
        sim.select(ActorKind::Blinky);
        sim
    }

    // --- Level lifecycle ---

    /// Advances to the next level, or restarts at level 1 when `reset` is set.
    ///
    /// The grid, items and spawn plan are generated fresh. Points left
    /// uneaten on the finished level are added to the total. A reset also
    /// clears the total and every ghost's ability rank.
    pub fn new_level(&mut self, reset: bool) {
        self.level = if reset { 1 } else { self.level + 1 };
        if self.level == 1 {
            self.total_points = 0;
        } else {
            self.total_points += self.items.remaining_points();
        }
        if reset {
            self.stats = SimulationStats::default();
        }

        let spec = LevelSpec::for_level(&self.config, self.level);
        self.grid = DivisionGenerator::new().generate(&spec, &mut self.dice);
        self.items = ItemGenerator::from_config(&self.config).generate(&spec, &mut self.dice);
        let plan = SpawnPlanner::new().generate(&spec, &mut self.dice);

        for spawn in plan.spawns {
            let actor = &mut self.actors[spawn.kind.index()];
            actor.set_alive(spawn.alive);
            actor.motion_mut().stop();
            let default_speed = actor.default_speed();
            actor.set_speed(default_speed);
            actor.set_waypoint(None);
            actor.set_scared(false);
            actor.deselect();
            if reset && spawn.kind.is_ghost() {
                actor.reset_level();
            }
            move_to_cell(&self.grid, actor, spawn.cell);
        }
        self.items.consume(plan.pacman());
        self.actors[ActorKind::Pacman.index()].set_mode(AiMode::SeekItem);
        self.actors[ActorKind::Blinky.index()].select();
        self.last_vulnerability = None;

        info!(
            "Level {}: {}x{} maze, {} points on the board, {} saved so far",
            self.level,
            spec.width,
            spec.height,
            self.items.remaining_points(),
            self.total_points
        );
    }

    // --- Frame update ---

    /// Advances the simulation by `dt` seconds. Does nothing while paused.
    ///
    /// Actors are processed in [`ActorKind::ALL`] order. Pacman's position is
    /// recorded when his turn comes, and each ghost processed after him is
    /// checked against that position for a collision.
    pub fn update(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        self.stats.frames += 1;
        self.grid.enforce_border();
        let now = self.clock.now();

        let mut pacman_at: Option<(i32, i32)> = None;
        for kind in ActorKind::ALL {
            let i = kind.index();
            if !self.actors[i].is_alive() {
                continue;
            }

            let motion = *self.actors[i].motion();
            let cell = cell_of(&self.grid, &motion);
            let entered = fully_entered(&self.grid, &motion);

            if kind == ActorKind::Pacman {
                pacman_at = Some((motion.x as i32, motion.y as i32));
            } else if let Some((px, py)) = pacman_at {
                let box_size = config::COLLISION_BOX;
                if (motion.x as i32 - px).abs() < box_size && (motion.y as i32 - py).abs() < box_size
                {
                    self.resolve_collision(kind);
                }
            }

            stop_at_wall(&self.grid, self.actors[i].motion_mut(), entered);
            align_to_rail(&self.grid, self.actors[i].motion_mut());

            if kind == ActorKind::Pacman {
                self.eat_at(cell, entered, now);
            }

            self.apply_ai(kind);
            self.actors[i].update(dt);
        }

        self.expire_vulnerability(now);
        self.expire_abilities(now);
    }

    fn resolve_collision(&mut self, ghost: ActorKind) {
        let actor = &mut self.actors[ghost.index()];
        if actor.is_scared() {
            actor.set_alive(false);
            actor.reset_level();
            self.sounds.raise(SoundEffect::GhostDeath);
            self.stats.ghosts_lost += 1;
            info!("{} was eaten", ghost);
        } else {
            self.actors[ActorKind::Pacman.index()].set_alive(false);
            self.sounds.raise(SoundEffect::PacmanDeath);
            info!("{} caught Pacman", ghost);
        }
    }

    /// Pacman eats whatever is in `cell` once he has fully entered it.
    fn eat_at(&mut self, cell: Position, entered: bool, now: f64) {
        let kind = match self.items.get(cell) {
            Some(item) if entered && !item.is_consumed() => item.kind(),
            _ => {
                self.sounds.clear(SoundEffect::SmallDot);
                self.sounds.clear(SoundEffect::LargeDot);
                self.sounds.clear(SoundEffect::Fruit);
                return;
            }
        };

        let points = self.items.consume(cell);
        self.stats.items_eaten += 1;
        self.stats.points_eaten += points;
        self.sounds.set(SoundEffect::SmallDot, kind == ItemKind::SmallDot);
        self.sounds.set(SoundEffect::LargeDot, kind == ItemKind::LargeDot);
        self.sounds.set(SoundEffect::Fruit, kind.is_fruit());

        if kind == ItemKind::LargeDot {
            for ghost in ActorKind::GHOSTS {
                self.actors[ghost.index()].set_scared(true);
            }
            self.actors[ActorKind::Pacman.index()].set_mode(AiMode::Hunt);
            self.sounds.raise(SoundEffect::VulnerabilityStarted);
            self.last_vulnerability = Some(now);
            debug!("Large dot eaten at ({}, {}): ghosts are vulnerable", cell.x, cell.y);
        }
    }

    /// Ends the scared window once it has lasted
    /// `vulnerability_duration + 0.5 * level` seconds.
    fn expire_vulnerability(&mut self, now: f64) {
        let window = self.config.vulnerability_duration + 0.5 * self.level as f64;
        if let Some(started) = self.last_vulnerability {
            if now - started <= window {
                return;
            }
        }
        for ghost in ActorKind::GHOSTS {
            self.actors[ghost.index()].set_scared(false);
        }
        self.actors[ActorKind::Pacman.index()].set_mode(AiMode::SeekItem);
        if self.last_vulnerability.take().is_some() {
            self.sounds.raise(SoundEffect::VulnerabilityEnded);
            debug!("Vulnerability window ended");
        }
    }

    // --- Commands ---

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Turns an actor. See [`turn`] for when a turn is refused.
    pub fn turn_actor(&mut self, kind: ActorKind, direction: Direction) -> bool {
        turn(&self.grid, &mut self.actors[kind.index()], direction)
    }

    /// The selected actor. With nothing selected, Pacman is selected and
    /// returned.
    pub fn selection(&mut self) -> ActorKind {
        if let Some(actor) = self.actors.iter().find(|a| a.is_selected()) {
            return actor.kind();
        }
        self.actors[ActorKind::Pacman.index()].select();
        ActorKind::Pacman
    }

    /// Selects `kind` alone. Dead actors cannot be selected.
    pub fn select(&mut self, kind: ActorKind) -> bool {
        if !self.actors[kind.index()].is_alive() {
            return false;
        }
        for actor in &mut self.actors {
            actor.deselect();
        }
        self.actors[kind.index()].select()
    }

    /// Moves the selection to the next living ghost. Returns the new
    /// selection, or `None` when every ghost is dead.
    pub fn rotate_selection(&mut self) -> Option<ActorKind> {
        let mut current = self.selection();
        for ghost in ActorKind::GHOSTS {
            self.actors[ghost.index()].deselect();
        }
        for _ in 0..ActorKind::GHOSTS.len() {
            current = current.next_ghost();
            if self.actors[current.index()].select() {
                self.actors[ActorKind::Pacman.index()].deselect();
                return Some(current);
            }
        }
        None
    }

    /// Raises a living ghost's ability rank.
    pub fn level_up(&mut self, kind: ActorKind) -> bool {
        let actor = &mut self.actors[kind.index()];
        if !kind.is_ghost() || !actor.is_alive() {
            return false;
        }
        actor.level_up();
        info!("{} reached ability level {}", kind, actor.level());
        true
    }

    /// Places an actor at the centre of a cell.
    pub fn move_actor_to_cell(&mut self, kind: ActorKind, pos: Position) {
        move_to_cell(&self.grid, &mut self.actors[kind.index()], pos);
    }

    // --- Queries ---

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn items(&self) -> &ItemGrid {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ItemGrid {
        &mut self.items
    }

    pub fn actor(&self, kind: ActorKind) -> &Actor {
        &self.actors[kind.index()]
    }

    pub fn actor_mut(&mut self, kind: ActorKind) -> &mut Actor {
        &mut self.actors[kind.index()]
    }

    pub fn actors(&self) -> &[Actor; 5] {
        &self.actors
    }

    /// The grid cell an actor is in.
    pub fn actor_cell(&self, kind: ActorKind) -> Position {
        cell_of(&self.grid, self.actors[kind.index()].motion())
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Points saved on earlier levels of this game.
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Points still uneaten on this level.
    pub fn remaining_points(&self) -> u32 {
        self.items.remaining_points()
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// When the current scared window began, if one is running.
    pub fn vulnerability_started(&self) -> Option<f64> {
        self.last_vulnerability
    }

    pub fn sounds(&self) -> &SoundFlags {
        &self.sounds
    }

    pub fn sound(&self, effect: SoundEffect) -> bool {
        self.sounds.is_raised(effect)
    }

    /// Reads a sound slot and clears it.
    pub fn take_sound(&mut self, effect: SoundEffect) -> bool {
        self.sounds.take(effect)
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn outcome(&self) -> GameOutcome {
        if !self.actors[ActorKind::Pacman.index()].is_alive() {
            GameOutcome::Victory
        } else if ActorKind::GHOSTS
            .iter()
            .all(|g| !self.actors[g.index()].is_alive())
        {
            GameOutcome::Defeat
        } else {
            GameOutcome::Playing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GridGeometry;
    use crate::utils::ManualClock;

    fn open_sim(clock: &ManualClock) -> Simulation {
        let grid = Grid::open(6, 8, GridGeometry::new(40.0, 0, 0));
        Simulation::from_parts(
            MazeConfig::for_testing(1),
            grid,
            ItemGrid::empty(6, 8),
            Dice::from_seed(1),
            Box::new(clock.clone()),
        )
    }

    #[test]
    fn test_sound_flags_take_clears() {
        let mut flags = SoundFlags::default();
        flags.raise(SoundEffect::Ability);
        flags.raise(SoundEffect::SmallDot);
        assert_eq!(flags.raised(), vec![SoundEffect::SmallDot, SoundEffect::Ability]);
        assert!(flags.take(SoundEffect::Ability));
        assert!(!flags.take(SoundEffect::Ability));
    }

    #[test]
    fn test_new_generates_level_one() {
        let clock = ManualClock::new();
        let sim = Simulation::new(MazeConfig::for_testing(5), Box::new(clock)).unwrap();
        assert_eq!(sim.level(), 1);
        assert_eq!(sim.total_points(), 0);
        assert_eq!((sim.grid().width(), sim.grid().height()), (6, 8));
        assert!(sim.actor(ActorKind::Blinky).is_alive());
        assert!(!sim.actor(ActorKind::Pinky).is_alive());
        assert!(sim.actor(ActorKind::Blinky).is_selected());
        assert_eq!(sim.actor_cell(ActorKind::Blinky), sim.grid().ghost_town_entrance());

        // Pacman's spawn cell is already eaten
        let pacman = sim.actor_cell(ActorKind::Pacman);
        assert!(sim.items().get(pacman).unwrap().is_consumed());
        assert_eq!(sim.outcome(), GameOutcome::Playing);
    }

    #[test]
    fn test_new_level_saves_remaining_points() {
        let clock = ManualClock::new();
        let mut sim = Simulation::new(MazeConfig::for_testing(5), Box::new(clock)).unwrap();
        let remaining = sim.remaining_points();
        sim.level_up(ActorKind::Blinky);
        sim.new_level(false);
        assert_eq!(sim.level(), 2);
        assert_eq!(sim.total_points(), remaining);
        assert_eq!(sim.actor(ActorKind::Blinky).level(), 1);

        sim.new_level(true);
        assert_eq!(sim.level(), 1);
        assert_eq!(sim.total_points(), 0);
        assert_eq!(sim.actor(ActorKind::Blinky).level(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = MazeConfig::for_testing(1);
        config.max_width = 2;
        assert!(Simulation::new(config, Box::new(ManualClock::new())).is_err());
    }

    #[test]
    fn test_paused_update_is_noop() {
        let clock = ManualClock::new();
        let mut sim = open_sim(&clock);
        sim.turn_actor(ActorKind::Blinky, Direction::Down);
        let before = sim.actor(ActorKind::Blinky).clone();
        sim.pause();
        sim.update(0.5);
        assert_eq!(sim.actor(ActorKind::Blinky), &before);
        assert_eq!(sim.stats().frames, 0);
        assert!(!sim.toggle_pause());
        sim.update(0.1);
        assert_ne!(sim.actor(ActorKind::Blinky), &before);

        sim.pause();
        sim.unpause();
        assert!(!sim.is_paused());
    }

    #[test]
    fn test_rotate_selection_skips_dead_ghosts() {
        let clock = ManualClock::new();
        let mut sim = open_sim(&clock);
        sim.actor_mut(ActorKind::Pinky).set_alive(false);
        assert_eq!(sim.rotate_selection(), Some(ActorKind::Inky));
        assert_eq!(sim.rotate_selection(), Some(ActorKind::Clyde));
        assert_eq!(sim.rotate_selection(), Some(ActorKind::Blinky));
        assert_eq!(sim.selection(), ActorKind::Blinky);

        for ghost in ActorKind::GHOSTS {
            sim.actor_mut(ghost).set_alive(false);
        }
        assert_eq!(sim.rotate_selection(), None);
        assert_eq!(sim.selection(), ActorKind::Pacman);
        assert_eq!(sim.outcome(), GameOutcome::Defeat);
    }

    #[test]
    fn test_level_up_refuses_pacman_and_dead_ghosts() {
        let clock = ManualClock::new();
        let mut sim = open_sim(&clock);
        assert!(!sim.level_up(ActorKind::Pacman));
        assert!(sim.level_up(ActorKind::Clyde));
        sim.actor_mut(ActorKind::Clyde).set_alive(false);
        assert!(!sim.level_up(ActorKind::Clyde));
        assert_eq!(sim.actor(ActorKind::Clyde).level(), 1);
        assert!(!sim.select(ActorKind::Clyde));
    }

    #[test]
    fn test_large_dot_scares_ghosts_until_window_ends() {
        let clock = ManualClock::new();
        let mut sim = open_sim(&clock);
        sim.items_mut().place(Position::new(0, 0), ItemKind::LargeDot);
        sim.update(0.0);
        // Stationary Pacman has not "entered" anything yet
        assert!(!sim.actor(ActorKind::Blinky).is_scared());

        sim.turn_actor(ActorKind::Pacman, Direction::Up);
        sim.update(0.0);
        assert!(sim.actor(ActorKind::Blinky).is_scared());
        assert!(sim.take_sound(SoundEffect::LargeDot));
        assert!(sim.take_sound(SoundEffect::VulnerabilityStarted));
        assert_eq!(sim.actor(ActorKind::Pacman).mode(), AiMode::Hunt);
        assert_eq!(sim.vulnerability_started(), Some(0.0));

        // 3 s + 0.5 s per level
        clock.set(3.5);
        sim.update(0.0);
        assert!(sim.actor(ActorKind::Inky).is_scared());
        clock.set(3.6);
        sim.update(0.0);
        assert!(!sim.actor(ActorKind::Inky).is_scared());
        assert!(sim.take_sound(SoundEffect::VulnerabilityEnded));
        assert_eq!(sim.actor(ActorKind::Pacman).mode(), AiMode::SeekItem);
        assert_eq!(sim.vulnerability_started(), None);
    }
}
