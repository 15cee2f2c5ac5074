//! # Maze Generation
//!
//! Recursive-division maze generation with connectivity repair.
//!
//! This module builds the wall grid for a level in four passes:
//! 1. Recursive division of the open interior into quadrants, each split by
//!    one vertical and one horizontal wall with a few gaps punched through
//! 2. A fixed ghost town carved at the centre of the grid
//! 3. Repair: every cell cut off from the ghost town digs its way back
//! 4. Crossing fill: every four-way open vertex gets one wall back

use crate::game::{Direction, Grid, Position};
use crate::generation::{utils, Generator, LevelSpec};
use crate::utils::Dice;
use crate::{VengeanceError, VengeanceResult};
use log::debug;

/// Maze generator based on recursive spatial division.
///
/// # Examples
///
/// ```
/// use vengeance::{DivisionGenerator, Dice, Generator, LevelSpec, MazeConfig};
///
/// let spec = LevelSpec::for_level(&MazeConfig::default(), 1);
/// let mut dice = Dice::from_seed(42);
/// let generator = DivisionGenerator::new();
///
/// let grid = generator.generate(&spec, &mut dice);
/// assert!(generator.validate(&grid, &spec).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionGenerator {
    /// Fewest gaps punched through each dividing wall
    pub min_gaps: i32,
    /// Most gaps punched through each dividing wall
    pub max_gaps: i32,
}

/// Uniform integer in `[low, high]`, or `low` when the range is a single value.
fn roll_between(dice: &mut Dice, low: i32, high: i32) -> i32 {
    if low >= high {
        low
    } else {
        dice.roll_int_range(low, high)
    }
}

fn is_accessible(grid: &Grid, pos: Position) -> bool {
    grid.cell(pos).is_some_and(|c| c.accessible)
}

impl DivisionGenerator {
    pub fn new() -> Self {
        Self {
            min_gaps: 2,
            max_gaps: 3,
        }
    }

    /// Divides the region between wall lines `left..right` and
    /// `bottom..top`, then recurses into the four quadrants.
    ///
    /// Regions one cell wide or tall are left alone.
    pub fn division_step(
        &self,
        grid: &mut Grid,
        dice: &mut Dice,
        left: i32,
        right: i32,
        bottom: i32,
        top: i32,
    ) {
        if right - left <= 1 || top - bottom <= 1 {
            return;
        }

        let v = roll_between(dice, left + 1, right - 1);
        for y in bottom..top {
            grid.set_vertical_wall(v, y, true);
        }
        let h = roll_between(dice, bottom + 1, top - 1);
        for x in left..right {
            grid.set_horizontal_wall(x, h, true);
        }

        let gaps = roll_between(dice, self.min_gaps, self.max_gaps);
        for _ in 0..gaps {
            let y = roll_between(dice, bottom, top - 1);
            grid.set_vertical_wall(v, y, false);
        }
        let gaps = roll_between(dice, self.min_gaps, self.max_gaps);
        for _ in 0..gaps {
            let x = roll_between(dice, left, right - 1);
            grid.set_horizontal_wall(x, h, false);
        }

        self.division_step(grid, dice, left, v, bottom, h);
        self.division_step(grid, dice, v, right, bottom, h);
        self.division_step(grid, dice, left, v, h, top);
        self.division_step(grid, dice, v, right, h, top);
    }

    /// Carves the ghost town: three cells side by side at the centre, closed
    /// above and at both ends, opening through the centre cell onto the
    /// entrance cell below it. All four cells are marked accessible.
    pub fn build_ghost_town(&self, grid: &mut Grid) {
        let c = grid.center();
        let (cx, cy) = (c.x, c.y);

        // Centre
        grid.set_horizontal_wall(cx, cy, false);
        grid.set_horizontal_wall(cx, cy + 1, true);
        grid.set_vertical_wall(cx, cy, false);
        grid.set_vertical_wall(cx + 1, cy, false);

        // Left
        grid.set_horizontal_wall(cx - 1, cy, true);
        grid.set_horizontal_wall(cx - 1, cy + 1, true);
        grid.set_vertical_wall(cx - 1, cy, true);

        // Right
        grid.set_horizontal_wall(cx + 1, cy, true);
        grid.set_horizontal_wall(cx + 1, cy + 1, true);
        grid.set_vertical_wall(cx + 2, cy, true);

        // Entrance
        grid.set_horizontal_wall(cx, cy - 1, false);
        grid.set_vertical_wall(cx, cy - 1, false);
        grid.set_vertical_wall(cx + 1, cy - 1, false);

        for pos in grid.ghost_town_cells() {
            if let Some(cell) = grid.cell_mut(pos) {
                cell.accessible = true;
            }
        }
    }

    /// Connects every inaccessible cell to the ghost town. Returns the number
    /// of walls removed.
    pub fn repair_connectivity(&self, grid: &mut Grid, dice: &mut Dice) -> usize {
        let mut broken = 0;
        let positions: Vec<Position> = grid.positions().collect();
        for pos in positions {
            if is_accessible(grid, pos) {
                continue;
            }
            grid.reset_visited();
            broken += Self::break_isolation(grid, dice, pos);
        }
        broken
    }

    /// Depth-first dig from `pos`: knock down walls toward unvisited
    /// neighbours in random order until `pos` becomes accessible.
    ///
    /// The ghost-town row is never dug into.
    fn break_isolation(grid: &mut Grid, dice: &mut Dice, pos: Position) -> usize {
        match grid.cell_mut(pos) {
            Some(cell) if !cell.accessible => cell.visited = true,
            _ => return 0,
        }

        let town_row = grid.ghost_town_row();
        let mut untried: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| {
                let next = pos.step(d);
                grid.cell(next).is_some_and(|c| !c.visited) && !town_row.contains(&next)
            })
            .collect();

        let mut broken = 0;
        while !is_accessible(grid, pos) {
            let Some(i) = dice.pick_index(untried.len()) else {
                break;
            };
            let direction = untried.swap_remove(i);
            if grid.has_wall(pos, direction) == Some(true) {
                grid.set_wall(pos, direction, false);
                broken += 1;
            }
            grid.refresh_accessibility();
            if !is_accessible(grid, pos) {
                broken += Self::break_isolation(grid, dice, pos.step(direction));
            }
        }
        broken
    }

    /// Puts one random wall back at every vertex where all four meeting walls
    /// are absent. Returns the number of walls added.
    pub fn fill_open_crossings(&self, grid: &mut Grid, dice: &mut Dice) -> usize {
        let mut filled = 0;
        for i in 1..grid.width() {
            for j in 1..grid.height() {
                if !grid.is_open_crossing(i, j) {
                    continue;
                }
                match dice.roll_int(4) {
                    0 => grid.set_vertical_wall(i, j, true),
                    1 => grid.set_horizontal_wall(i - 1, j, true),
                    2 => grid.set_vertical_wall(i, j - 1, true),
                    _ => grid.set_horizontal_wall(i, j, true),
                }
                filled += 1;
            }
        }
        filled
    }
}

impl Generator<Grid> for DivisionGenerator {
    fn generate(&self, spec: &LevelSpec, dice: &mut Dice) -> Grid {
        let mut grid = Grid::open(spec.width, spec.height, spec.geometry);
        let (width, height) = (grid.width(), grid.height());

        self.division_step(&mut grid, dice, 0, width, 0, height);
        self.build_ghost_town(&mut grid);
        grid.refresh_accessibility();

        let isolated = grid.inaccessible_count();
        let broken = self.repair_connectivity(&mut grid, dice);
        let filled = self.fill_open_crossings(&mut grid, dice);
        grid.refresh_accessibility();

        debug!(
            "Generated {}x{} maze for level {}: {} isolated cells, {} walls broken, {} crossings filled",
            width, height, spec.level, isolated, broken, filled
        );
        grid
    }

    fn validate(&self, grid: &Grid, spec: &LevelSpec) -> VengeanceResult<()> {
        if grid.width() != spec.width || grid.height() != spec.height {
            return Err(VengeanceError::GenerationFailed(format!(
                "grid is {}x{}, expected {}x{}",
                grid.width(),
                grid.height(),
                spec.width,
                spec.height
            )));
        }
        utils::validate_grid(grid)
    }

    fn generator_type(&self) -> &'static str {
        "DivisionGenerator"
    }
}

impl Default for DivisionGenerator {
    fn default() -> Self {
        Self::new()
    }
}
