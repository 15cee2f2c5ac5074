//! # Grid Mathematics
//!
//! Small coordinate helpers shared by the AI and ability code.

use crate::game::Position;

/// Clamps a cell coordinate into a `width x height` grid.
///
/// # Examples
///
/// ```
/// use vengeance::{clamp_to_grid, Position};
///
/// assert_eq!(clamp_to_grid(Position::new(-3, 9), 6, 8), Position::new(0, 7));
/// ```
pub fn clamp_to_grid(pos: Position, width: i32, height: i32) -> Position {
    Position::new(
        pos.x.clamp(0, (width - 1).max(0)),
        pos.y.clamp(0, (height - 1).max(0)),
    )
}

/// Reflects `threat` through `origin`: the point as far past `origin` as
/// `threat` is before it.
pub fn reflect_through(origin: Position, threat: Position) -> Position {
    Position::new(2 * origin.x - threat.x, 2 * origin.y - threat.y)
}

/// Index of the smallest value; ties go to the earliest entry.
pub fn first_minimum<T: PartialOrd + Copy>(values: &[T]) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
