//! # Actors
//!
//! Pacman and the four ghosts. An [`Actor`] is composed of a [`Motion`]
//! (pixel position and velocity) and an [`Animation`] (facing and frame),
//! plus the game flags the simulation reads and writes.

use crate::config;
use crate::game::{Direction, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one of the five actors. The discriminant is the actor's slot
/// in the simulation and its update order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Pacman,
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl ActorKind {
    /// All actors in update order.
    pub const ALL: [ActorKind; 5] = [
        ActorKind::Pacman,
        ActorKind::Blinky,
        ActorKind::Pinky,
        ActorKind::Inky,
        ActorKind::Clyde,
    ];

    /// The four ghosts in selection order.
    pub const GHOSTS: [ActorKind; 4] = [
        ActorKind::Blinky,
        ActorKind::Pinky,
        ActorKind::Inky,
        ActorKind::Clyde,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_ghost(self) -> bool {
        self != ActorKind::Pacman
    }

    /// The ghost after this one in selection order. Pacman maps to Blinky.
    pub fn next_ghost(self) -> ActorKind {
        match self {
            ActorKind::Pacman | ActorKind::Clyde => ActorKind::Blinky,
            ActorKind::Blinky => ActorKind::Pinky,
            ActorKind::Pinky => ActorKind::Inky,
            ActorKind::Inky => ActorKind::Clyde,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActorKind::Pacman => "Pacman",
            ActorKind::Blinky => "Blinky",
            ActorKind::Pinky => "Pinky",
            ActorKind::Inky => "Inky",
            ActorKind::Clyde => "Clyde",
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Facing and animation frame, one of 16 sprite columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SpriteState {
    #[default]
    Na,
    Up1,
    Up2,
    Up3,
    Down1,
    Down2,
    Down3,
    Left1,
    Left2,
    Left3,
    Right1,
    Right2,
    Right3,
    Spec1,
    Spec2,
    Spec3,
}

impl SpriteState {
    const ORDER: [SpriteState; 16] = [
        SpriteState::Na,
        SpriteState::Up1,
        SpriteState::Up2,
        SpriteState::Up3,
        SpriteState::Down1,
        SpriteState::Down2,
        SpriteState::Down3,
        SpriteState::Left1,
        SpriteState::Left2,
        SpriteState::Left3,
        SpriteState::Right1,
        SpriteState::Right2,
        SpriteState::Right3,
        SpriteState::Spec1,
        SpriteState::Spec2,
        SpriteState::Spec3,
    ];

    /// Sprite column, 0 for `Na` through 15 for `Spec3`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<SpriteState> {
        Self::ORDER.get(index).copied()
    }

    /// The state facing `direction` at animation frame `frame` (1..=3).
    pub fn facing(direction: Direction, frame: u8) -> SpriteState {
        let group = match direction {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        };
        let frame = frame.clamp(1, 3) as usize;
        Self::ORDER[1 + group * 3 + frame - 1]
    }

    /// Facing direction, `None` for `Na` and the special states.
    pub fn direction(self) -> Option<Direction> {
        match self.index() {
            1..=3 => Some(Direction::Up),
            4..=6 => Some(Direction::Down),
            7..=9 => Some(Direction::Left),
            10..=12 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Animation frame 1..=3, `None` for `Na`.
    pub fn frame(self) -> Option<u8> {
        match self {
            SpriteState::Na => None,
            s => Some(((s.index() - 1) % 3 + 1) as u8),
        }
    }

    /// Same group at a different frame. `Na` is unchanged.
    pub fn with_frame(self, frame: u8) -> SpriteState {
        match self {
            SpriteState::Na => SpriteState::Na,
            s => {
                let group = (s.index() - 1) / 3;
                let frame = frame.clamp(1, 3) as usize;
                Self::ORDER[1 + group * 3 + frame - 1]
            }
        }
    }
}

/// Behaviour policy driving an actor's waypoint choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AiMode {
    /// Hold the current cell; steering comes from commands
    #[default]
    None,
    /// Flee the nearest opponent
    Avoid,
    /// Chase the nearest opponent
    Hunt,
    /// Head for the nearest uneaten item
    SeekItem,
    /// Wander between random cells
    Random,
}

/// Pixel-space position and axis-aligned velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Magnitude applied when the actor starts moving
    pub speed: f32,
}

impl Motion {
    pub fn new(speed: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            speed,
        }
    }

    /// Current direction of travel. Checked up, left, down, right.
    pub fn heading(&self) -> Option<Direction> {
        if self.vy > 0.0 {
            Some(Direction::Up)
        } else if self.vx < 0.0 {
            Some(Direction::Left)
        } else if self.vy < 0.0 {
            Some(Direction::Down)
        } else if self.vx > 0.0 {
            Some(Direction::Right)
        } else {
            None
        }
    }

    pub fn is_moving(&self) -> bool {
        self.vx != 0.0 || self.vy != 0.0
    }

    pub fn stop(&mut self) {
        self.vx = 0.0;
        self.vy = 0.0;
    }

    pub fn integrate(&mut self, dt: f32) {
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }

    /// Changes the speed and rescales whichever velocity components are moving.
    pub fn rescale(&mut self, speed: f32) {
        self.speed = speed;
        if self.vx != 0.0 {
            self.vx = speed.copysign(self.vx);
        }
        if self.vy != 0.0 {
            self.vy = speed.copysign(self.vy);
        }
    }
}

/// Frame cycling for a sprite.
///
/// The cycle spends `ANIMATION_RATIO` of each half period on an outer frame
/// (1 in the first half, 3 in the second) and the rest on the centre frame 2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub state: SpriteState,
    time_seed: f32,
}

impl Animation {
    pub fn new(time_seed: f32) -> Self {
        Self {
            state: SpriteState::Na,
            time_seed,
        }
    }

    pub fn time_seed(&self) -> f32 {
        self.time_seed
    }

    pub fn advance(&mut self, dt: f32) {
        let period = config::ANIMATION_PERIOD;
        self.time_seed += dt;
        while self.time_seed >= period {
            self.time_seed -= period;
        }

        if self.state == SpriteState::Na {
            return;
        }
        let window = config::ANIMATION_RATIO * 0.5 * period;
        let frame = if self.time_seed < 0.5 * period {
            if self.time_seed < window {
                1
            } else {
                2
            }
        } else if self.time_seed - 0.5 * period < window {
            3
        } else {
            2
        };
        self.state = self.state.with_frame(frame);
    }
}

/// Read-only snapshot handed to a render sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub kind: ActorKind,
    pub x: f32,
    pub y: f32,
    pub state: SpriteState,
    pub alive: bool,
    pub selected: bool,
    pub scared: bool,
}

/// Something with a pixel position and velocity.
pub trait Movable {
    fn motion(&self) -> &Motion;
    fn motion_mut(&mut self) -> &mut Motion;

    fn move_to_pixel(&mut self, x: f32, y: f32) {
        let motion = self.motion_mut();
        motion.x = x;
        motion.y = y;
    }

    fn heading(&self) -> Option<Direction> {
        self.motion().heading()
    }
}

/// Something the rendering layer can draw.
pub trait Renderable {
    fn view(&self) -> ActorView;
}

/// Pacman or a ghost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    kind: ActorKind,
    motion: Motion,
    animation: Animation,
    alive: bool,
    selected: bool,
    scared: bool,
    level: u32,
    ability_triggered: f64,
    mode: AiMode,
    waypoint: Option<Position>,
    default_speed: f32,
}

impl Actor {
    /// Creates an actor at the pixel origin. Ghosts move at
    /// `ghost_speed_factor * base_velocity`, Pacman at `base_velocity`.
    pub fn new(
        kind: ActorKind,
        base_velocity: f32,
        ghost_speed_factor: f32,
        now: f64,
        time_seed: f32,
    ) -> Self {
        let speed = if kind.is_ghost() {
            base_velocity * ghost_speed_factor
        } else {
            base_velocity
        };
        Self {
            kind,
            motion: Motion::new(speed),
            animation: Animation::new(time_seed),
            alive: true,
            selected: false,
            scared: false,
            level: 0,
            ability_triggered: now,
            mode: if kind.is_ghost() {
                AiMode::None
            } else {
                AiMode::SeekItem
            },
            waypoint: None,
            default_speed: speed,
        }
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Selects the actor. Dead actors cannot be selected.
    pub fn select(&mut self) -> bool {
        if self.alive {
            self.selected = true;
        }
        self.selected
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }

    pub fn is_scared(&self) -> bool {
        self.scared
    }

    pub fn set_scared(&mut self, scared: bool) {
        self.scared = scared;
    }

    /// Ability rank.
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn level_up(&mut self) {
        self.level += 1;
    }

    pub fn reset_level(&mut self) {
        self.level = 0;
    }

    pub fn ability_triggered(&self) -> f64 {
        self.ability_triggered
    }

    pub fn set_ability_triggered(&mut self, at: f64) {
        self.ability_triggered = at;
    }

    pub fn mode(&self) -> AiMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AiMode) {
        self.mode = mode;
    }

    pub fn waypoint(&self) -> Option<Position> {
        self.waypoint
    }

    pub fn set_waypoint(&mut self, waypoint: Option<Position>) {
        self.waypoint = waypoint;
    }

    pub fn speed(&self) -> f32 {
        self.motion.speed
    }

    pub fn default_speed(&self) -> f32 {
        self.default_speed
    }

    /// Sets the speed, rescaling the current velocity.
    pub fn set_speed(&mut self, speed: f32) {
        self.motion.rescale(speed);
    }

    pub fn state(&self) -> SpriteState {
        self.animation.state
    }

    pub fn set_state(&mut self, state: SpriteState) {
        self.animation.state = state;
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Moves and animates the actor. Dead actors are frozen.
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.motion.integrate(dt);
        self.animation.advance(dt);
    }
}

impl Movable for Actor {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

impl Renderable for Actor {
    fn view(&self) -> ActorView {
        ActorView {
            kind: self.kind,
            x: self.motion.x,
            y: self.motion.y,
            state: self.animation.state,
            alive: self.alive,
            selected: self.selected,
            scared: self.scared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ghost(kind: ActorKind) -> Actor {
        Actor::new(kind, 100.0, 0.8, 0.0, 0.0)
    }

    #[test]
    fn test_speeds_by_kind() {
        assert_eq!(ghost(ActorKind::Pacman).speed(), 100.0);
        assert_eq!(ghost(ActorKind::Inky).speed(), 80.0);
        assert_eq!(ghost(ActorKind::Pacman).mode(), AiMode::SeekItem);
        assert_eq!(ghost(ActorKind::Clyde).mode(), AiMode::None);
    }

    #[test]
    fn test_next_ghost_cycles() {
        let mut kind = ActorKind::Pacman;
        let mut seen = Vec::new();
        for _ in 0..4 {
            kind = kind.next_ghost();
            seen.push(kind);
        }
        assert_eq!(seen, ActorKind::GHOSTS.to_vec());
        assert_eq!(ActorKind::Clyde.next_ghost(), ActorKind::Blinky);
    }

    #[test]
    fn test_sprite_state_groups() {
        assert_eq!(SpriteState::facing(Direction::Left, 2), SpriteState::Left2);
        assert_eq!(SpriteState::Down3.direction(), Some(Direction::Down));
        assert_eq!(SpriteState::Spec1.direction(), None);
        assert_eq!(SpriteState::Right1.with_frame(3), SpriteState::Right3);
        assert_eq!(SpriteState::Na.with_frame(3), SpriteState::Na);
        assert_eq!(SpriteState::Up3.frame(), Some(3));
        for i in 0..16 {
            assert_eq!(SpriteState::from_index(i).map(|s| s.index()), Some(i));
        }
        assert_eq!(SpriteState::from_index(16), None);
    }

    #[test]
    fn test_animation_frames() {
        let mut animation = Animation::new(0.0);
        animation.state = SpriteState::Up2;

        animation.advance(0.05);
        assert_eq!(animation.state, SpriteState::Up1);
        animation.advance(0.2);
        assert_eq!(animation.state, SpriteState::Up2);
        animation.advance(0.1);
        assert_eq!(animation.state, SpriteState::Up3);
        animation.advance(0.2);
        assert_eq!(animation.state, SpriteState::Up2);
        // Wraps past the period
        animation.advance(0.2);
        assert!(animation.time_seed() < config::ANIMATION_PERIOD);
    }

    #[test]
    fn test_idle_animation_stays_na() {
        let mut animation = Animation::new(0.9);
        animation.advance(0.1);
        assert_eq!(animation.state, SpriteState::Na);
        assert!((animation.time_seed() - 0.34).abs() < 1e-4);
    }

    #[test]
    fn test_motion_heading_and_rescale() {
        let mut motion = Motion::new(80.0);
        assert_eq!(motion.heading(), None);
        motion.vx = -80.0;
        assert_eq!(motion.heading(), Some(Direction::Left));
        motion.rescale(120.0);
        assert_eq!(motion.vx, -120.0);
        assert_eq!(motion.vy, 0.0);
        motion.integrate(0.5);
        assert_eq!(motion.x, -60.0);
    }

    #[test]
    fn test_dead_actor_cannot_be_selected_or_moved() {
        let mut actor = ghost(ActorKind::Pinky);
        actor.motion_mut().vx = 80.0;
        actor.set_alive(false);
        assert!(!actor.select());
        assert!(!actor.is_selected());
        actor.update(1.0);
        assert_eq!(actor.motion().x, 0.0);
    }
}
