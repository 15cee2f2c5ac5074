//! # Item Generation
//!
//! Dots and fruit, one per cell, laid out fresh for every level.

use crate::game::{Grid, Position};
use crate::generation::{Generator, LevelSpec, MazeConfig};
use crate::utils::Dice;
use crate::{VengeanceError, VengeanceResult};
use serde::{Deserialize, Serialize};

/// Edible item types, ranked by point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    SmallDot,
    LargeDot,
    Banana,
    Pear,
    Apple,
    Pretzel,
    Peach,
    Strawberry,
    Cherries,
}

impl ItemKind {
    const ORDER: [ItemKind; 9] = [
        ItemKind::SmallDot,
        ItemKind::LargeDot,
        ItemKind::Banana,
        ItemKind::Pear,
        ItemKind::Apple,
        ItemKind::Pretzel,
        ItemKind::Peach,
        ItemKind::Strawberry,
        ItemKind::Cherries,
    ];

    /// Rank from 0 (small dot) to 8 (cherries).
    pub fn tier(self) -> u8 {
        self as u8
    }

    pub fn from_tier(tier: u8) -> Option<ItemKind> {
        Self::ORDER.get(tier as usize).copied()
    }

    /// Points awarded for eating this kind of item.
    ///
    /// # Examples
    ///
    /// ```
    /// use vengeance::ItemKind;
    ///
    /// assert_eq!(ItemKind::SmallDot.points(), 10);
    /// assert_eq!(ItemKind::Cherries.points(), 90);
    /// ```
    pub fn points(self) -> u32 {
        10 * (self.tier() as u32 + 1)
    }

    pub fn is_fruit(self) -> bool {
        self.tier() >= ItemKind::Banana.tier()
    }
}

/// The item in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    kind: ItemKind,
    cell: Option<Position>,
}

impl Item {
    pub fn new(kind: ItemKind, cell: Position) -> Self {
        Self {
            kind,
            cell: Some(cell),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The cell the item sits in, `None` once eaten.
    pub fn cell(&self) -> Option<Position> {
        self.cell
    }

    pub fn is_consumed(&self) -> bool {
        self.cell.is_none()
    }

    /// Current point value, zero once eaten.
    pub fn points(&self) -> u32 {
        if self.is_consumed() {
            0
        } else {
            self.kind.points()
        }
    }

    /// Eats the item and returns the points it was worth. Eating an already
    /// eaten item returns 0 and changes nothing.
    pub fn consume(&mut self) -> u32 {
        let points = self.points();
        self.cell = None;
        points
    }
}

/// One item per grid cell, stored in the same order as the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGrid {
    width: i32,
    height: i32,
    items: Vec<Item>,
}

impl ItemGrid {
    /// A grid of small dots.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let items = (0..width)
            .flat_map(|x| (0..height).map(move |y| Item::new(ItemKind::SmallDot, Position::new(x, y))))
            .collect();
        Self {
            width,
            height,
            items,
        }
    }

    /// A grid with every item already eaten.
    pub fn empty(width: i32, height: i32) -> Self {
        let mut grid = Self::new(width, height);
        for item in &mut grid.items {
            item.consume();
        }
        grid
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

    pub fn get(&self, pos: Position) -> Option<&Item> {
        self.index(pos).map(|i| &self.items[i])
    }

    /// Replaces the item at `pos` with a fresh, uneaten one.
    pub fn place(&mut self, pos: Position, kind: ItemKind) {
        if let Some(i) = self.index(pos) {
            self.items[i] = Item::new(kind, pos);
        }
    }

    /// Eats the item at `pos`, returning its points.
    pub fn consume(&mut self, pos: Position) -> u32 {
        match self.index(pos) {
            Some(i) => self.items[i].consume(),
            None => 0,
        }
    }

    /// Items in storage order (column by column).
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Uneaten items in storage order.
    pub fn uneaten(&self) -> impl Iterator<Item = (Position, ItemKind)> + '_ {
        self.items
            .iter()
            .filter_map(|item| item.cell().map(|pos| (pos, item.kind())))
    }

    pub fn remaining_count(&self) -> usize {
        self.uneaten().count()
    }

    /// Total value of every uneaten item.
    pub fn remaining_points(&self) -> u32 {
        self.items.iter().map(Item::points).sum()
    }

    pub fn matches(&self, grid: &Grid) -> bool {
        self.width == grid.width() && self.height == grid.height()
    }
}

/// Lays out the items for a level.
///
/// The ghost-town row starts empty, large dots sit at the four corners and
/// the four edge midpoints, and every other cell holds fruit with
/// probability `fruit_density` or a small dot otherwise. Fruit quality rises
/// with the level.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemGenerator {
    pub fruit_density: f32,
    pub level_scale_speed: f32,
}

impl ItemGenerator {
    pub fn new(fruit_density: f32, level_scale_speed: f32) -> Self {
        Self {
            fruit_density,
            level_scale_speed,
        }
    }

    pub fn from_config(config: &MazeConfig) -> Self {
        Self::new(config.fruit_density, config.level_scale_speed)
    }

    /// The eight large-dot cells of a `width x height` grid.
    pub fn large_dot_cells(width: i32, height: i32) -> [Position; 8] {
        let (cx, cy) = (width / 2, height / 2);
        let (right, top) = (width - 1, height - 1);
        [
            Position::new(0, 0),
            Position::new(0, cy),
            Position::new(0, top),
            Position::new(cx, 0),
            Position::new(cx, top),
            Position::new(right, 0),
            Position::new(right, cy),
            Position::new(right, top),
        ]
    }

    /// Picks a fruit for `level`. Base quality grows with the level, then a
    /// die adds one step (2 in 6) or two steps (1 in 6).
    pub fn roll_fruit(&self, level: u32, dice: &mut Dice) -> ItemKind {
        let base = 4 - (1.0 / (self.level_scale_speed * level as f32 + 0.25)) as i32;
        let bump = match dice.roll_int(6) {
            5 => 2,
            3 | 4 => 1,
            _ => 0,
        };
        let tier = (base + bump + 2).clamp(ItemKind::Banana.tier() as i32, ItemKind::Cherries.tier() as i32);
        ItemKind::from_tier(tier as u8).unwrap_or(ItemKind::Cherries)
    }
}

impl Default for ItemGenerator {
    fn default() -> Self {
        Self::from_config(&MazeConfig::default())
    }
}

impl Generator<ItemGrid> for ItemGenerator {
    fn generate(&self, spec: &LevelSpec, dice: &mut Dice) -> ItemGrid {
        let mut items = ItemGrid::new(spec.width, spec.height);
        let (width, height) = (items.width(), items.height());
        let (cx, cy) = (width / 2, height / 2);
        let large_dots = Self::large_dot_cells(width, height);

        for x in 0..width {
            for y in 0..height {
                let pos = Position::new(x, y);
                if (cx - x).abs() <= 1 && y == cy {
                    items.consume(pos);
                } else if large_dots.contains(&pos) {
                    items.place(pos, ItemKind::LargeDot);
                } else if dice.roll_float(1.0) <= self.fruit_density {
                    let fruit = self.roll_fruit(spec.level, dice);
                    items.place(pos, fruit);
                }
            }
        }
        items
    }

    fn validate(&self, items: &ItemGrid, spec: &LevelSpec) -> VengeanceResult<()> {
        if items.width() != spec.width || items.height() != spec.height {
            return Err(VengeanceError::GenerationFailed(format!(
                "item grid is {}x{}, expected {}x{}",
                items.width(),
                items.height(),
                spec.width,
                spec.height
            )));
        }
        let (cx, cy) = (spec.width / 2, spec.height / 2);
        for dx in -1..=1 {
            if items.get(Position::new(cx + dx, cy)).is_some_and(|i| !i.is_consumed()) {
                return Err(VengeanceError::GenerationFailed(
                    "ghost town holds an item".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "ItemGenerator"
    }
}
