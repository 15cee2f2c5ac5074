//! # AI Policy Engine
//!
//! Each frame an idle actor picks a waypoint according to its [`AiMode`],
//! floods distances out from that waypoint and steps toward the neighbouring
//! cell with the smallest distance.

use crate::game::{
    cell_of, in_transit, turn, ActorKind, AiMode, Direction, Grid, Movable, Position, Simulation,
};
use crate::generation::ItemGrid;
use crate::utils::{clamp_to_grid, distances_from, first_minimum, reflect_through, DistanceMap};
use log::trace;

impl Simulation {
    /// Runs one AI decision for `kind`.
    ///
    /// Dead actors and actors still travelling toward the centre of their
    /// cell are left alone. Otherwise the waypoint is refreshed and, if the
    /// actor is not already there, it turns one step toward it.
    pub fn apply_ai(&mut self, kind: ActorKind) {
        self.grid.enforce_border();
        let actor = &self.actors[kind.index()];
        if !actor.is_alive() || in_transit(&self.grid, actor.motion()) {
            return;
        }
        let cell = cell_of(&self.grid, actor.motion());

        let waypoint = self.choose_waypoint(kind, cell);
        self.actors[kind.index()].set_waypoint(Some(waypoint));

        if let Some(direction) = choose_step(&self.grid, cell, waypoint) {
            let turned = turn(&self.grid, &mut self.actors[kind.index()], direction);
            trace!(
                "{} at ({}, {}) heading for ({}, {}): {:?}{}",
                kind,
                cell.x,
                cell.y,
                waypoint.x,
                waypoint.y,
                direction,
                if turned { "" } else { " (kept course)" }
            );
        }
    }

    fn choose_waypoint(&mut self, kind: ActorKind, cell: Position) -> Position {
        let actor = &self.actors[kind.index()];
        let arrived = actor.waypoint().map_or(true, |w| w == cell);
        let (width, height) = (self.grid.width(), self.grid.height());

        match actor.mode() {
            AiMode::None => cell,
            AiMode::Avoid if arrived => {
                let threat = self.nearest_opponent(kind, cell, false);
                clamp_to_grid(reflect_through(cell, threat), width, height)
            }
            AiMode::Hunt => {
                let target = self.nearest_opponent(kind, cell, true);
                clamp_to_grid(target, width, height)
            }
            AiMode::SeekItem if arrived => nearest_item(&self.items, cell),
            AiMode::Random if arrived => {
                Position::new(self.dice.roll_int(width), self.dice.roll_int(height))
            }
            AiMode::Avoid | AiMode::SeekItem | AiMode::Random => actor.waypoint().unwrap_or(cell),
        }
    }

    /// Cell of the closest actor on the other team. Ghosts only ever look at
    /// Pacman; Pacman looks at the nearest ghost, pushing dead ones out of
    /// reach when `skip_dead` is set.
    fn nearest_opponent(&self, kind: ActorKind, cell: Position, skip_dead: bool) -> Position {
        if kind.is_ghost() {
            return cell_of(&self.grid, self.actors[ActorKind::Pacman.index()].motion());
        }

        let far = self.grid.width() * self.grid.height();
        let ghosts = ActorKind::GHOSTS.map(|g| {
            let actor = &self.actors[g.index()];
            let pos = cell_of(&self.grid, actor.motion());
            let distance = if actor.is_alive() || !skip_dead {
                pos.squared_distance(cell)
            } else {
                far * far
            };
            (pos, distance)
        });
        let distances = ghosts.map(|(_, d)| d);
        first_minimum(&distances).map_or(cell, |i| ghosts[i].0)
    }

    /// Distance map rooted at an actor's waypoint, or at its cell when it has
    /// none. Used by the debug distance dump.
    pub fn distance_map_for(&self, kind: ActorKind) -> DistanceMap {
        let actor = &self.actors[kind.index()];
        let source = actor
            .waypoint()
            .unwrap_or_else(|| cell_of(&self.grid, actor.motion()));
        distances_from(&self.grid, source)
    }
}

/// Nearest uneaten item by squared distance. Ties go to the item found first
/// in storage order; an empty board gives the origin.
pub fn nearest_item(items: &ItemGrid, from: Position) -> Position {
    let mut best: Option<(Position, i32)> = None;
    for (pos, _) in items.uneaten() {
        let distance = pos.squared_distance(from);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((pos, distance));
        }
    }
    best.map_or(Position::origin(), |(pos, _)| pos)
}

/// The first step from `cell` toward `waypoint`, or `None` when the actor is
/// already there, off the grid, or has no open side leading anywhere.
///
/// Neighbours behind a wall or never reached by the flood fill score
/// `width * height`; ties resolve up, left, down, right.
///
/// # Examples
///
/// ```
/// use vengeance::{choose_step, Direction, Grid, GridGeometry, Position};
///
/// let grid = Grid::open(4, 4, GridGeometry::default());
/// let step = choose_step(&grid, Position::new(0, 0), Position::new(3, 0));
/// assert_eq!(step, Some(Direction::Right));
/// ```
pub fn choose_step(grid: &Grid, cell: Position, waypoint: Position) -> Option<Direction> {
    if !grid.contains(cell) || cell == waypoint {
        return None;
    }
    let distances = distances_from(grid, waypoint);
    let blocked = (grid.width() * grid.height()) as u32;
    let scores = Direction::ALL.map(|direction| {
        if grid.is_open(cell, direction) {
            distances.get(cell.step(direction)).unwrap_or(blocked)
        } else {
            blocked
        }
    });
    first_minimum(&scores)
        .filter(|&i| scores[i] < blocked)
        .map(|i| Direction::ALL[i])
}
