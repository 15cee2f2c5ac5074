//! # Clocks
//!
//! Time sources for cooldowns and vulnerability windows.

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;
use std::time::Instant;

/// A source of elapsed seconds. Only differences between readings matter.
pub trait Clock: Debug {
    /// Current reading in seconds.
    fn now(&self) -> f64;
}

/// Monotonic wall clock measured from construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock advanced by hand.
///
/// Clones share the same reading, so a test can keep one handle while the
/// simulation owns another.
///
/// # Examples
///
/// ```
/// use vengeance::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(1.5);
/// assert_eq!(clock.now(), 1.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    seconds: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock reading `seconds`.
    pub fn starting_at(seconds: f64) -> Self {
        Self {
            seconds: Rc::new(Cell::new(seconds)),
        }
    }

    pub fn advance(&self, seconds: f64) {
        self.seconds.set(self.seconds.get() + seconds);
    }

    pub fn set(&self, seconds: f64) {
        self.seconds.set(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.seconds.get()
    }
}
