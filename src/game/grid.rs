//! # Grid Model
//!
//! The maze as a rectangle of cells with four wall flags each, plus the
//! geometry that places the grid in pixel space.
//!
//! Walls are stored twice, once on each side. Every setter writes both
//! halves so the two flags between neighbouring cells always agree. Cells are
//! stored column by column (`x * height + y`) and `y` grows upward.

use crate::game::{Direction, Position};
use serde::{Deserialize, Serialize};

/// One grid square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub wall_up: bool,
    pub wall_down: bool,
    pub wall_left: bool,
    pub wall_right: bool,
    /// Scratch flag for the connectivity repair pass
    pub visited: bool,
    /// Reachable from the ghost-town entrance
    pub accessible: bool,
}

impl Cell {
    /// A cell with all four walls present.
    pub fn walled() -> Self {
        Self {
            wall_up: true,
            wall_down: true,
            wall_left: true,
            wall_right: true,
            visited: false,
            accessible: false,
        }
    }

    /// A cell with no walls.
    pub fn open() -> Self {
        let mut cell = Self::walled();
        cell.reset(true);
        cell
    }

    /// Sets all four walls to `!empty` and clears the bookkeeping flags.
    pub fn reset(&mut self, empty: bool) {
        self.wall_up = !empty;
        self.wall_down = !empty;
        self.wall_left = !empty;
        self.wall_right = !empty;
        self.visited = false;
        self.accessible = false;
    }

    pub fn has_wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.wall_up,
            Direction::Left => self.wall_left,
            Direction::Down => self.wall_down,
            Direction::Right => self.wall_right,
        }
    }

    fn set_wall_flag(&mut self, direction: Direction, present: bool) {
        match direction {
            Direction::Up => self.wall_up = present,
            Direction::Left => self.wall_left = present,
            Direction::Down => self.wall_down = present,
            Direction::Right => self.wall_right = present,
        }
    }

    pub fn wall_count(&self) -> usize {
        Direction::ALL.iter().filter(|&&d| self.has_wall(d)).count()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::walled()
    }
}

/// Placement of the grid in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Edge length of one cell in pixels
    pub square_dim: f32,
    /// Pixel x of the grid's left edge
    pub offset_x: i32,
    /// Pixel y of the grid's bottom edge
    pub offset_y: i32,
}

impl GridGeometry {
    pub fn new(square_dim: f32, offset_x: i32, offset_y: i32) -> Self {
        Self {
            square_dim,
            offset_x,
            offset_y,
        }
    }

    /// Geometry that centres a `width x height` grid in the viewport.
    pub fn centered(
        width: i32,
        height: i32,
        square_dim: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Self {
        Self {
            square_dim,
            offset_x: (viewport_width / 2.0 - width as f32 * square_dim / 2.0) as i32,
            offset_y: (viewport_height / 2.0 - height as f32 * square_dim / 2.0) as i32,
        }
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(40.0, 0, 0)
    }
}

/// Rectangular maze of `width x height` cells.
///
/// # Examples
///
/// ```
/// use vengeance::{Direction, Grid, GridGeometry, Position};
///
/// let mut grid = Grid::new(3, 3, GridGeometry::default());
/// assert!(!grid.is_open(Position::new(0, 0), Direction::Right));
///
/// grid.set_wall(Position::new(0, 0), Direction::Right, false);
/// assert!(grid.is_open(Position::new(0, 0), Direction::Right));
/// assert!(grid.is_open(Position::new(1, 0), Direction::Left));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    geometry: GridGeometry,
}

impl Grid {
    /// Creates a grid with every wall present.
    pub fn new(width: i32, height: i32, geometry: GridGeometry) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![Cell::walled(); (width * height) as usize],
            geometry,
        }
    }

    /// Creates a grid with no interior walls and a solid border.
    pub fn open(width: i32, height: i32, geometry: GridGeometry) -> Self {
        let mut grid = Self::new(width, height, geometry);
        grid.reset_cells(true);
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Storage index of a cell, `None` when off the grid.
    pub fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some((pos.x * self.height + pos.y) as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(move |i| &mut self.cells[i])
    }

    /// All positions in storage order (column by column).
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Position::new(x, y)))
    }

    // --- Walls ---

    /// Resets every cell. With `empty` the interior is cleared and the
    /// border stays solid; otherwise every wall is raised.
    pub fn reset_cells(&mut self, empty: bool) {
        for cell in &mut self.cells {
            cell.reset(empty);
        }
        if empty {
            self.enforce_border();
        }
    }

    /// Raises the full vertical wall line `v` (0 = left border, `width` = right border).
    pub fn set_vertical_line(&mut self, v: i32) {
        if v < 0 || v > self.width {
            return;
        }
        for y in 0..self.height {
            self.set_vertical_wall(v, y, true);
        }
    }

    /// Raises the full horizontal wall line `h` (0 = bottom border, `height` = top border).
    pub fn set_horizontal_line(&mut self, h: i32) {
        if h < 0 || h > self.height {
            return;
        }
        for x in 0..self.width {
            self.set_horizontal_wall(x, h, true);
        }
    }

    /// Makes the outer border solid.
    pub fn enforce_border(&mut self) {
        self.set_vertical_line(0);
        self.set_vertical_line(self.width);
        self.set_horizontal_line(0);
        self.set_horizontal_line(self.height);
    }

    /// Sets the wall segment on vertical line `x` in row `y`, between cells
    /// `(x-1, y)` and `(x, y)`. Halves that fall off the grid are skipped.
    pub fn set_vertical_wall(&mut self, x: i32, y: i32, present: bool) {
        if let Some(left) = self.cell_mut(Position::new(x - 1, y)) {
            left.wall_right = present;
        }
        if let Some(right) = self.cell_mut(Position::new(x, y)) {
            right.wall_left = present;
        }
    }

    /// Sets the wall segment on horizontal line `y` in column `x`, between
    /// cells `(x, y-1)` and `(x, y)`.
    pub fn set_horizontal_wall(&mut self, x: i32, y: i32, present: bool) {
        if let Some(below) = self.cell_mut(Position::new(x, y - 1)) {
            below.wall_up = present;
        }
        if let Some(above) = self.cell_mut(Position::new(x, y)) {
            above.wall_down = present;
        }
    }

    /// Sets the wall on the `direction` side of `pos`, mirrored onto the neighbour.
    pub fn set_wall(&mut self, pos: Position, direction: Direction, present: bool) {
        match direction {
            Direction::Up => self.set_horizontal_wall(pos.x, pos.y + 1, present),
            Direction::Down => self.set_horizontal_wall(pos.x, pos.y, present),
            Direction::Left => self.set_vertical_wall(pos.x, pos.y, present),
            Direction::Right => self.set_vertical_wall(pos.x + 1, pos.y, present),
        }
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_wall_flag(direction, present);
        }
    }

    /// Wall state on one side of a cell, `None` when the cell is off the grid.
    pub fn has_wall(&self, pos: Position, direction: Direction) -> Option<bool> {
        self.cell(pos).map(|c| c.has_wall(direction))
    }

    /// True when a move from `pos` in `direction` stays on the grid and
    /// crosses no wall.
    pub fn is_open(&self, pos: Position, direction: Direction) -> bool {
        match self.cell(pos) {
            Some(cell) => !cell.has_wall(direction) && self.contains(pos.step(direction)),
            None => false,
        }
    }

    // --- Ghost town ---

    /// Centre cell of the grid.
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// The cell below the centre through which the ghost town opens.
    pub fn ghost_town_entrance(&self) -> Position {
        let c = self.center();
        Position::new(c.x, c.y - 1)
    }

    /// The three cells of the ghost town's row: left, centre, right.
    pub fn ghost_town_row(&self) -> [Position; 3] {
        let c = self.center();
        [Position::new(c.x - 1, c.y), c, Position::new(c.x + 1, c.y)]
    }

    /// The four ghost-town cells: the row plus the entrance.
    pub fn ghost_town_cells(&self) -> [Position; 4] {
        let [left, center, right] = self.ghost_town_row();
        [left, center, right, self.ghost_town_entrance()]
    }

    pub fn is_ghost_town(&self, pos: Position) -> bool {
        self.ghost_town_cells().contains(&pos)
    }

    // --- Accessibility ---

    pub fn reset_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }

    /// Marks the ghost-town cells accessible and every other cell not.
    pub fn reset_accessibility(&mut self) {
        for cell in &mut self.cells {
            cell.accessible = false;
        }
        for pos in self.ghost_town_cells() {
            if let Some(cell) = self.cell_mut(pos) {
                cell.accessible = true;
            }
        }
    }

    /// Cells reachable from `start` through open walls, indexed like storage.
    pub fn reachable_from(&self, start: Position) -> Vec<bool> {
        let mut reached = vec![false; self.cells.len()];
        let Some(first) = self.index(start) else {
            return reached;
        };
        reached[first] = true;
        let mut stack = vec![start];
        while let Some(pos) = stack.pop() {
            for direction in Direction::ALL {
                if !self.is_open(pos, direction) {
                    continue;
                }
                let next = pos.step(direction);
                if let Some(i) = self.index(next) {
                    if !reached[i] {
                        reached[i] = true;
                        stack.push(next);
                    }
                }
            }
        }
        reached
    }

    /// Recomputes every cell's `accessible` flag from the ghost-town entrance.
    pub fn refresh_accessibility(&mut self) {
        self.reset_accessibility();
        let reached = self.reachable_from(self.ghost_town_entrance());
        for (cell, reached) in self.cells.iter_mut().zip(reached) {
            cell.accessible |= reached;
        }
    }

    /// True when every cell is flagged accessible.
    pub fn is_fully_accessible(&self) -> bool {
        self.cells.iter().all(|c| c.accessible)
    }

    pub fn inaccessible_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.accessible).count()
    }

    // --- Structural checks ---

    /// True when every shared wall is recorded identically on both sides.
    pub fn walls_mirrored(&self) -> bool {
        self.positions().all(|pos| {
            let Some(cell) = self.cell(pos) else {
                return true;
            };
            let right_ok = self
                .cell(pos.step(Direction::Right))
                .map_or(true, |r| r.wall_left == cell.wall_right);
            let up_ok = self
                .cell(pos.step(Direction::Up))
                .map_or(true, |u| u.wall_down == cell.wall_up);
            right_ok && up_ok
        })
    }

    /// True when every outward-facing wall is present.
    pub fn border_is_solid(&self) -> bool {
        self.positions().all(|pos| {
            Direction::ALL.iter().all(|&d| {
                self.contains(pos.step(d)) || self.has_wall(pos, d) == Some(true)
            })
        })
    }

    /// Interior wall vertices where all four meeting walls are absent.
    ///
    /// Vertex `(i, j)` is the corner shared by cells `(i-1, j-1)`, `(i, j-1)`,
    /// `(i-1, j)` and `(i, j)`.
    pub fn open_crossings(&self) -> Vec<Position> {
        let mut crossings = Vec::new();
        for i in 1..self.width {
            for j in 1..self.height {
                if self.is_open_crossing(i, j) {
                    crossings.push(Position::new(i, j));
                }
            }
        }
        crossings
    }

    pub(crate) fn is_open_crossing(&self, i: i32, j: i32) -> bool {
        match (
            self.cell(Position::new(i, j)),
            self.cell(Position::new(i - 1, j - 1)),
        ) {
            (Some(upper_right), Some(lower_left)) => {
                !upper_right.wall_left
                    && !upper_right.wall_down
                    && !lower_left.wall_up
                    && !lower_left.wall_right
            }
            _ => false,
        }
    }

    // --- Coordinate transformations ---

    /// Pixel x of the centre of column `x`.
    pub fn maze_to_screen_x(&self, x: i32) -> i32 {
        let g = &self.geometry;
        (x as f32 * g.square_dim) as i32 + g.offset_x + (0.5 * g.square_dim) as i32
    }

    /// Pixel y of the centre of row `y`.
    pub fn maze_to_screen_y(&self, y: i32) -> i32 {
        let g = &self.geometry;
        (y as f32 * g.square_dim) as i32 + g.offset_y + (0.5 * g.square_dim) as i32
    }

    /// Column containing pixel x. Clamped to -1 on the left and `width` on
    /// the right, both of which name no cell.
    pub fn screen_to_maze_x(&self, px: i32) -> i32 {
        let g = &self.geometry;
        let x = ((px - g.offset_x) as f32 - 0.5 * g.square_dim) / g.square_dim + 0.5;
        (x as i32).clamp(-1, self.width)
    }

    /// Row containing pixel y, clamped like [`Grid::screen_to_maze_x`].
    pub fn screen_to_maze_y(&self, py: i32) -> i32 {
        let g = &self.geometry;
        let y = ((py - g.offset_y) as f32 - 0.5 * g.square_dim) / g.square_dim + 0.5;
        (y as i32).clamp(-1, self.height)
    }

    /// Cell under a pixel-space point.
    pub fn cell_at_pixel(&self, x: f32, y: f32) -> Position {
        Position::new(
            self.screen_to_maze_x(x as i32),
            self.screen_to_maze_y(y as i32),
        )
    }

    /// Pixel-space centre of a cell.
    pub fn cell_center(&self, pos: Position) -> (i32, i32) {
        (self.maze_to_screen_x(pos.x), self.maze_to_screen_y(pos.y))
    }
}
