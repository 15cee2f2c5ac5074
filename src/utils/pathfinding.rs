//! # Pathfinding
//!
//! Hop-count distance flood fill over the maze grid.
//!
//! The AI runs the fill with its waypoint as the source and then compares the
//! distances of the four cells around the actor; the same maps back the debug
//! distance dump.

use crate::game::{Direction, Grid, Position};
use std::collections::VecDeque;
use std::fmt::Write;

/// Per-cell hop counts from a source cell. `None` marks unreached cells.
///
/// # Examples
///
/// ```
/// use vengeance::{DistanceMap, Position};
///
/// let map = DistanceMap::seeded(3, 3, Position::new(1, 1));
/// assert_eq!(map.get(Position::new(1, 1)), Some(0));
/// assert_eq!(map.get(Position::new(0, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    width: i32,
    height: i32,
    values: Vec<Option<u32>>,
}

impl DistanceMap {
    /// Creates a map with every cell unreached.
    pub fn unvisited(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            values: vec![None; (width * height) as usize],
        }
    }

    /// Creates a map with 0 at `source` and every other cell unreached.
    pub fn seeded(width: i32, height: i32, source: Position) -> Self {
        let mut map = Self::unvisited(width, height);
        map.set(source, 0);
        map
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some((pos.x * self.height + pos.y) as usize)
    }

    /// Distance at `pos`, or `None` if unreached or off the map.
    pub fn get(&self, pos: Position) -> Option<u32> {
        self.index(pos).and_then(|i| self.values[i])
    }

    /// Records a distance. Positions off the map are ignored.
    pub fn set(&mut self, pos: Position, distance: u32) {
        if let Some(i) = self.index(pos) {
            self.values[i] = Some(distance);
        }
    }

    /// Number of cells with a recorded distance.
    pub fn reachable_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Fills `distances` outward from `source` through open walls.
///
/// `distances` must already hold 0 at `source`; a source without a recorded
/// distance leaves the map untouched. A neighbour is relabelled whenever the
/// route through the current cell strictly improves it, so the fill settles on
/// the shortest hop count for every reachable cell.
pub fn plot_distances(grid: &Grid, distances: &mut DistanceMap, source: Position) {
    if distances.get(source).is_none() {
        return;
    }

    let mut frontier = VecDeque::new();
    frontier.push_back(source);

    while let Some(pos) = frontier.pop_front() {
        let Some(current) = distances.get(pos) else {
            continue;
        };
        for direction in Direction::ALL {
            if !grid.is_open(pos, direction) {
                continue;
            }
            let next = pos.step(direction);
            let improves = distances
                .get(next)
                .map_or(true, |known| known > current + 1);
            if improves {
                distances.set(next, current + 1);
                frontier.push_back(next);
            }
        }
    }
}

/// Builds a fresh distance map for `grid` rooted at `source`.
pub fn distances_from(grid: &Grid, source: Position) -> DistanceMap {
    let mut distances = DistanceMap::seeded(grid.width(), grid.height(), source);
    plot_distances(grid, &mut distances, source);
    distances
}

/// Renders a distance map as text, top row first, `-1` for unreached cells.
pub fn format_distance_map(distances: &DistanceMap) -> String {
    let mut out = String::new();
    for y in (0..distances.height()).rev() {
        let _ = write!(out, "{} row:", y);
        for x in 0..distances.width() {
            match distances.get(Position::new(x, y)) {
                Some(d) => {
                    let _ = write!(out, " {}", d);
                }
                None => out.push_str(" -1"),
            }
            if x + 1 < distances.width() {
                out.push(',');
            }
        }
        out.push('\n');
    }
    out
}
