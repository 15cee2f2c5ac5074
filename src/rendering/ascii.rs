//! # ASCII Rendering
//!
//! A [`RenderSink`] that draws into a character canvas, top row first.
//!
//! Wall vertices sit on even rows and columns, cells on odd ones:
//!
//! ```text
//! +-+-+
//! |@ .|
//! + +-+
//! |B o|
//! +-+-+
//! ```

use crate::game::{ActorKind, ActorView, Grid, GridGeometry};
use crate::generation::ItemKind;
use crate::rendering::{arms, render_maze, RenderSink, ITEM_INSET};
use crate::Simulation;

/// Character canvas for one level.
#[derive(Debug, Clone, PartialEq)]
pub struct AsciiRenderer {
    width: i32,
    height: i32,
    geometry: GridGeometry,
    canvas: Vec<Vec<char>>,
}

impl AsciiRenderer {
    /// Creates a blank canvas sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        let (width, height) = (grid.width(), grid.height());
        let cols = (2 * width + 1) as usize;
        let rows = (2 * height + 1) as usize;
        Self {
            width,
            height,
            geometry: *grid.geometry(),
            canvas: vec![vec![' '; cols]; rows],
        }
    }

    /// Renders the whole simulation to text.
    ///
    /// # Examples
    ///
    /// ```
    /// use vengeance::{AsciiRenderer, ManualClock, MazeConfig, Simulation};
    ///
    /// let sim = Simulation::new(MazeConfig::for_testing(3), Box::new(ManualClock::new())).unwrap();
    /// let text = AsciiRenderer::render(&sim);
    /// assert_eq!(text.lines().count(), 2 * sim.grid().height() as usize + 1);
    /// assert!(text.contains('@'));
    /// ```
    pub fn render(sim: &Simulation) -> String {
        let mut renderer = Self::new(sim.grid());
        render_maze(sim, &mut renderer);
        renderer.finish()
    }

    /// The canvas as newline-terminated rows.
    pub fn finish(&self) -> String {
        let mut out = String::with_capacity(self.canvas.len() * (self.canvas[0].len() + 1));
        for row in &self.canvas {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }

    fn put(&mut self, col: i32, row: i32, ch: char) {
        if col < 0 || row < 0 {
            return;
        }
        if let Some(slot) = self
            .canvas
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            *slot = ch;
        }
    }

    /// Canvas position of cell `(x, y)`.
    fn cell_slot(&self, x: i32, y: i32) -> (i32, i32) {
        (2 * x + 1, 2 * (self.height - y) - 1)
    }

    fn pixel_to_cell(&self, px: f32, py: f32) -> (i32, i32) {
        let sq = self.geometry.square_dim;
        let x = ((px - self.geometry.offset_x as f32) / sq).floor() as i32;
        let y = ((py - self.geometry.offset_y as f32) / sq).floor() as i32;
        (x.clamp(0, self.width - 1), y.clamp(0, self.height - 1))
    }
}

fn item_char(kind: ItemKind) -> char {
    match kind {
        ItemKind::SmallDot => '.',
        ItemKind::LargeDot => 'o',
        _ => '%',
    }
}

fn actor_char(view: &ActorView) -> char {
    let ch = match view.kind {
        ActorKind::Pacman => return '@',
        ActorKind::Blinky => 'B',
        ActorKind::Pinky => 'P',
        ActorKind::Inky => 'I',
        ActorKind::Clyde => 'C',
    };
    if view.scared {
        ch.to_ascii_lowercase()
    } else {
        ch
    }
}

impl RenderSink for AsciiRenderer {
    fn draw_wall_segment(&mut self, key: u8, x: i32, y: i32) {
        let (col, row) = (2 * x, 2 * (self.height - y));
        if key == 0 {
            return;
        }
        self.put(col, row, '+');
        if key & arms::UP != 0 {
            self.put(col, row - 1, '|');
        }
        if key & arms::DOWN != 0 {
            self.put(col, row + 1, '|');
        }
        if key & arms::LEFT != 0 {
            self.put(col - 1, row, '-');
        }
        if key & arms::RIGHT != 0 {
            self.put(col + 1, row, '-');
        }
    }

    fn draw_item(&mut self, kind: ItemKind, px: i32, py: i32) {
        let (x, y) = self.pixel_to_cell((px - ITEM_INSET) as f32, (py - ITEM_INSET) as f32);
        let (col, row) = self.cell_slot(x, y);
        self.put(col, row, item_char(kind));
    }

    fn draw_actor(&mut self, actor: &ActorView) {
        let (x, y) = self.pixel_to_cell(actor.x, actor.y);
        let (col, row) = self.cell_slot(x, y);
        self.put(col, row, actor_char(actor));
    }
}
