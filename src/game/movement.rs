//! # Turn and Movement Discipline
//!
//! Actors move freely in pixel space but only change direction near a cell
//! centre and only stop at walls once they reach the centre of the cell they
//! are in.

use crate::game::{Actor, Direction, Grid, Motion, Movable, Position, SpriteState};

/// Fraction of a cell an actor may be off-axis and still turn.
const TURN_TOLERANCE: f32 = 0.25;

/// The cell containing an actor's (truncated) pixel position.
pub fn cell_of(grid: &Grid, motion: &Motion) -> Position {
    grid.cell_at_pixel(motion.x, motion.y)
}

/// True once the actor has reached or passed the centre of its cell in the
/// direction it is travelling.
pub fn fully_entered(grid: &Grid, motion: &Motion) -> bool {
    let (cx, cy) = grid.cell_center(cell_of(grid, motion));
    let (cx, cy) = (cx as f32, cy as f32);
    if motion.vy > 0.0 {
        motion.y >= cy
    } else if motion.vx < 0.0 {
        motion.x <= cx
    } else if motion.vy < 0.0 {
        motion.y <= cy
    } else if motion.vx > 0.0 {
        motion.x >= cx
    } else {
        false
    }
}

/// True when the actor has not yet reached its cell centre along its heading.
pub fn in_transit(grid: &Grid, motion: &Motion) -> bool {
    let (cx, cy) = grid.cell_center(cell_of(grid, motion));
    let (cx, cy) = (cx as f32, cy as f32);
    if motion.vy > 0.0 {
        cy > motion.y
    } else if motion.vx < 0.0 {
        cx < motion.x
    } else if motion.vy < 0.0 {
        cy < motion.y
    } else if motion.vx > 0.0 {
        cx > motion.x
    } else {
        false
    }
}

/// Places an actor at the centre of `pos`.
pub fn move_to_cell(grid: &Grid, actor: &mut impl Movable, pos: Position) {
    let (px, py) = grid.cell_center(pos);
    actor.move_to_pixel(px as f32, py as f32);
}

/// Turns an actor toward `direction`.
///
/// Returns `false` without touching the actor when it already travels that
/// way, when it is off the grid, or when it is more than a quarter cell off
/// the new axis. Reversing along the current axis is always allowed.
/// Otherwise the actor faces `direction` and moves at its speed unless a wall
/// lies ahead and it has already reached the cell centre on that side.
pub fn turn(grid: &Grid, actor: &mut Actor, direction: Direction) -> bool {
    let heading = actor.heading();
    if heading == Some(direction) {
        return false;
    }

    let pos = cell_of(grid, actor.motion());
    let Some(cell) = grid.cell(pos).copied() else {
        return false;
    };
    let (cx, cy) = grid.cell_center(pos);
    let (cx, cy) = (cx as f32, cy as f32);
    let tolerance = TURN_TOLERANCE * grid.geometry().square_dim;

    let same_axis = heading.is_some_and(|h| h.is_vertical() == direction.is_vertical());
    let motion = *actor.motion();
    let off_axis = if direction.is_vertical() {
        (motion.x - cx).abs() > tolerance
    } else {
        (motion.y - cy).abs() > tolerance
    };
    if off_axis && !same_axis {
        return false;
    }

    let at_boundary = match direction {
        Direction::Up => motion.y >= cy,
        Direction::Down => motion.y <= cy,
        Direction::Left => motion.x <= cx,
        Direction::Right => motion.x >= cx,
    };
    let blocked = cell.has_wall(direction) && at_boundary;

    actor.set_state(SpriteState::facing(direction, 2));
    let m = actor.motion_mut();
    let delta = direction.to_delta();
    let along = if blocked { 0.0 } else { m.speed };
    m.vx = along * delta.x as f32;
    m.vy = along * delta.y as f32;

    if m.vx == 0.0 && m.vy != 0.0 {
        m.x = cx;
    }
    if m.vy == 0.0 && m.vx != 0.0 {
        m.y = cy;
    }
    true
}

/// Stops an actor that has reached the centre of its cell with a wall ahead.
/// Returns whether it was stopped.
pub fn stop_at_wall(grid: &Grid, motion: &mut Motion, fully_entered: bool) -> bool {
    if !fully_entered {
        return false;
    }
    let pos = cell_of(grid, motion);
    let Some(heading) = motion.heading() else {
        return false;
    };
    let Some(cell) = grid.cell(pos) else {
        return false;
    };
    if !cell.has_wall(heading) {
        return false;
    }
    let (cx, cy) = grid.cell_center(pos);
    if heading.is_vertical() {
        motion.vy = 0.0;
        motion.y = cy as f32;
    } else {
        motion.vx = 0.0;
        motion.x = cx as f32;
    }
    true
}

/// Pins a moving actor's cross axis to its cell centre.
pub fn align_to_rail(grid: &Grid, motion: &mut Motion) {
    let (cx, cy) = grid.cell_center(cell_of(grid, motion));
    if motion.vx != 0.0 && motion.vy == 0.0 {
        motion.y = cy as f32;
    } else if motion.vy != 0.0 && motion.vx == 0.0 {
        motion.x = cx as f32;
    }
}
