//! # Rendering Module
//!
//! Backend-independent read surface for drawing a level.
//!
//! [`render_maze`] walks the simulation and feeds a [`RenderSink`] with wall
//! segments, items and actors in painter's order. A graphical front end
//! implements the sink with textures; [`AsciiRenderer`] implements it with
//! characters for the driver and tests.

pub mod ascii;

pub use ascii::*;

use crate::game::{ActorKind, ActorView, Direction, Grid, Position, Renderable, Simulation};
use crate::generation::ItemKind;

/// Arm bits of a wall segment key. A vertex key is the sum of the arms that
/// leave it.
pub mod arms {
    pub const UP: u8 = 1;
    pub const LEFT: u8 = 2;
    pub const DOWN: u8 = 4;
    pub const RIGHT: u8 = 8;
}

/// Pixel offset of an item sprite from its cell corner.
pub const ITEM_INSET: i32 = 10;

/// Something that can draw a level.
pub trait RenderSink {
    /// Draws the wall segment with arm bitmask `key` at wall vertex `(x, y)`.
    /// Vertices run from `(0, 0)` to `(width, height)`.
    fn draw_wall_segment(&mut self, key: u8, x: i32, y: i32);

    /// Draws an uneaten item with its lower-left corner at pixel `(px, py)`.
    fn draw_item(&mut self, kind: ItemKind, px: i32, py: i32);

    /// Draws a living actor.
    fn draw_actor(&mut self, actor: &ActorView);
}

/// Wall segment key for vertex `(x, y)`.
///
/// Corners and border vertices use fixed shapes with one optional arm into
/// the maze; interior vertices combine the four walls that meet there.
///
/// # Examples
///
/// ```
/// use vengeance::{wall_segment_key, Grid, GridGeometry};
///
/// let grid = Grid::new(3, 3, GridGeometry::default());
/// assert_eq!(wall_segment_key(&grid, 0, 0), 9);
/// assert_eq!(wall_segment_key(&grid, 1, 1), 15);
///
/// let open = Grid::open(3, 3, GridGeometry::default());
/// assert_eq!(wall_segment_key(&open, 1, 1), 0);
/// assert_eq!(wall_segment_key(&open, 3, 1), 5);
/// ```
pub fn wall_segment_key(grid: &Grid, x: i32, y: i32) -> u8 {
    use arms::*;
    let (width, height) = (grid.width(), grid.height());
    let wall = |cx: i32, cy: i32, side: Direction| {
        grid.cell(Position::new(cx, cy))
            .is_some_and(|cell| cell.has_wall(side))
    };
    let arm = |present: bool, bit: u8| if present { bit } else { 0 };

    if x == 0 {
        if y == 0 {
            UP | RIGHT
        } else if y == height {
            DOWN | RIGHT
        } else {
            UP | DOWN | arm(wall(x, y, Direction::Down), RIGHT)
        }
    } else if x == width {
        if y == 0 {
            UP | LEFT
        } else if y == height {
            LEFT | DOWN
        } else {
            UP | DOWN | arm(wall(x - 1, y, Direction::Down), LEFT)
        }
    } else if y == 0 {
        LEFT | RIGHT | arm(wall(x, y, Direction::Left), UP)
    } else if y == height {
        LEFT | RIGHT | arm(wall(x - 1, y - 1, Direction::Right), DOWN)
    } else {
        arm(wall(x, y, Direction::Left), UP)
            | arm(wall(x - 1, y - 1, Direction::Up), LEFT)
            | arm(wall(x - 1, y - 1, Direction::Right), DOWN)
            | arm(wall(x, y, Direction::Down), RIGHT)
    }
}

/// Pixel of wall vertex `(x, y)`: the shared corner of the four cells around it.
pub fn vertex_to_screen(grid: &Grid, x: i32, y: i32) -> (i32, i32) {
    let geometry = grid.geometry();
    let half = (geometry.square_dim / 2.0) as i32;
    (
        (x as f32 * geometry.square_dim) as i32 + geometry.offset_x - half,
        (y as f32 * geometry.square_dim) as i32 + geometry.offset_y - half,
    )
}

/// Lower-left pixel of the item sprite in cell `pos`.
pub fn item_to_screen(grid: &Grid, pos: Position) -> (i32, i32) {
    let geometry = grid.geometry();
    (
        (pos.x as f32 * geometry.square_dim) as i32 + geometry.offset_x + ITEM_INSET,
        (pos.y as f32 * geometry.square_dim) as i32 + geometry.offset_y + ITEM_INSET,
    )
}

/// Draws a whole level: every wall vertex, then uneaten items, then the
/// living ghosts and finally Pacman on top.
pub fn render_maze(sim: &Simulation, sink: &mut impl RenderSink) {
    let grid = sim.grid();
    for x in 0..=grid.width() {
        for y in 0..=grid.height() {
            sink.draw_wall_segment(wall_segment_key(grid, x, y), x, y);
        }
    }

    for (pos, kind) in sim.items().uneaten() {
        let (px, py) = item_to_screen(grid, pos);
        sink.draw_item(kind, px, py);
    }

    for kind in ActorKind::GHOSTS.into_iter().chain([ActorKind::Pacman]) {
        let view = sim.actor(kind).view();
        if view.alive {
            sink.draw_actor(&view);
        }
    }
}
