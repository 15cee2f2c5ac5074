//! # Input Module
//!
//! Key bindings and command dispatch for player interactions.
//!
//! The core does not read a keyboard itself. A front end translates its own
//! key events into [`Key`] values, and [`InputHandler`] maps those onto
//! [`Command`]s for [`Simulation::apply_command`](crate::Simulation::apply_command).

pub mod commands;

pub use commands::*;

use crate::game::{ActorKind, Direction};
use serde::{Deserialize, Serialize};

/// A backend-independent key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    /// A printable key, compared case-insensitively
    Char(char),
}

impl Key {
    /// Parses a key name as typed on a command line or in a script:
    /// `up`, `down`, `left`, `right`, `space`, `enter`, `esc`, or a single
    /// character.
    ///
    /// # Examples
    ///
    /// ```
    /// use vengeance::Key;
    ///
    /// assert_eq!(Key::parse("LEFT"), Some(Key::Left));
    /// assert_eq!(Key::parse("e"), Some(Key::Char('e')));
    /// assert_eq!(Key::parse("bogus"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Key> {
        let lower = name.trim().to_ascii_lowercase();
        match lower.as_str() {
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "space" | " " => Some(Key::Space),
            "enter" | "return" => Some(Key::Enter),
            "esc" | "escape" => Some(Key::Escape),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    fn normalized(self) -> Key {
        match self {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            key => key,
        }
    }
}

/// Maps key presses to simulation commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputHandler {
    /// Whether W/A/S/D also turn the selection. `d` then turns right
    /// instead of dumping distances.
    pub wasd_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a handler with arrow-key steering only.
    ///
    /// # Examples
    ///
    /// ```
    /// use vengeance::{Command, Direction, InputHandler, Key};
    ///
    /// let input = InputHandler::new();
    /// assert_eq!(input.command_for(Key::Up), Some(Command::Turn(Direction::Up)));
    /// assert_eq!(input.command_for(Key::Space), Some(Command::RotateSelection));
    /// ```
    pub fn new() -> Self {
        Self {
            wasd_enabled: false,
        }
    }

    pub fn with_wasd() -> Self {
        Self { wasd_enabled: true }
    }

    /// The command bound to `key` during play, if any.
    pub fn command_for(&self, key: Key) -> Option<Command> {
        let key = key.normalized();
        if let Some(direction) = self.direction_for(key) {
            return Some(Command::Turn(direction));
        }
        match key {
            Key::Space => Some(Command::RotateSelection),
            Key::Char('e') => Some(Command::ExecuteAbility),
            Key::Char('p') => Some(Command::TogglePause),
            Key::Char('n') => Some(Command::NewLevel { reset: false }),
            Key::Char('d') => Some(Command::DumpDistances),
            _ => None,
        }
    }

    fn direction_for(&self, key: Key) -> Option<Direction> {
        match key {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Char('w') if self.wasd_enabled => Some(Direction::Up),
            Key::Char('s') if self.wasd_enabled => Some(Direction::Down),
            Key::Char('a') if self.wasd_enabled => Some(Direction::Left),
            Key::Char('d') if self.wasd_enabled => Some(Direction::Right),
            _ => None,
        }
    }

    /// The ghost a key levels up on the leveling screen: `b`linky, `p`inky,
    /// `i`nky or `c`lyde.
    pub fn level_up_for_key(key: Key) -> Option<ActorKind> {
        match key.normalized() {
            Key::Char('b') => Some(ActorKind::Blinky),
            Key::Char('p') => Some(ActorKind::Pinky),
            Key::Char('i') => Some(ActorKind::Inky),
            Key::Char('c') => Some(ActorKind::Clyde),
            _ => None,
        }
    }

    /// Parses a whitespace-separated key script such as `"left left e space"`.
    /// Unknown names and unbound keys are skipped.
    pub fn parse_script(&self, script: &str) -> Vec<Command> {
        script
            .split_whitespace()
            .filter_map(Key::parse)
            .filter_map(|key| self.command_for(key))
            .collect()
    }
}
