//! Property tests for generated mazes and the distance flood fill.

use pathfinding::prelude::bfs_reach;
use proptest::prelude::*;
use std::collections::HashMap;
use vengeance::{
    distances_from, generation::utils::validate_grid, Dice, Direction, DivisionGenerator,
    Generator, Grid, GridGeometry, LevelSpec, MazeConfig, Position,
};

fn generate(seed: u64, level: u32) -> Grid {
    let spec = LevelSpec::for_level(&MazeConfig::default(), level);
    DivisionGenerator::new().generate(&spec, &mut Dice::from_seed(seed))
}

/// Hop counts from `source` computed by an independent breadth-first search.
fn oracle_distances(grid: &Grid, source: Position) -> HashMap<Position, u32> {
    let mut distances = HashMap::new();
    let mut frontier = vec![source];
    let mut depth = 0;
    distances.insert(source, 0);
    while !frontier.is_empty() {
        depth += 1;
        let mut next = Vec::new();
        for pos in frontier {
            for direction in Direction::ALL {
                if grid.is_open(pos, direction) {
                    let neighbour = pos.step(direction);
                    if !distances.contains_key(&neighbour) {
                        distances.insert(neighbour, depth);
                        next.push(neighbour);
                    }
                }
            }
        }
        frontier = next;
    }
    distances
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_mazes_pass_validation(seed in any::<u64>(), level in 1u32..40) {
        let grid = generate(seed, level);
        prop_assert!(validate_grid(&grid).is_ok(), "{:?}", validate_grid(&grid));
    }

    #[test]
    fn walls_are_symmetric_and_border_closed(seed in any::<u64>(), level in 1u32..40) {
        let grid = generate(seed, level);
        prop_assert!(grid.walls_mirrored());
        prop_assert!(grid.border_is_solid());
        prop_assert_eq!(grid.width() % 2, 0);
        prop_assert_eq!(grid.height() % 2, 0);
    }

    #[test]
    fn no_four_way_crossings(seed in any::<u64>(), level in 1u32..40) {
        let grid = generate(seed, level);
        prop_assert!(grid.open_crossings().is_empty());
    }

    #[test]
    fn every_cell_reaches_the_ghost_town(seed in any::<u64>(), level in 1u32..40) {
        let grid = generate(seed, level);
        let entrance = grid.ghost_town_entrance();
        let reached = bfs_reach(entrance, |&pos| {
            Direction::ALL
                .into_iter()
                .filter(|&d| grid.is_open(pos, d))
                .map(|d| pos.step(d))
                .collect::<Vec<_>>()
        })
        .count();
        prop_assert_eq!(reached, grid.cell_count());
    }

    #[test]
    fn ghost_town_shape_is_fixed(seed in any::<u64>(), level in 1u32..40) {
        let grid = generate(seed, level);
        let c = grid.center();
        let left = Position::new(c.x - 1, c.y);
        let right = Position::new(c.x + 1, c.y);

        prop_assert_eq!(grid.has_wall(c, Direction::Up), Some(true));
        prop_assert_eq!(grid.has_wall(c, Direction::Down), Some(false));
        prop_assert_eq!(grid.has_wall(c, Direction::Left), Some(false));
        prop_assert_eq!(grid.has_wall(c, Direction::Right), Some(false));
        for side in [Direction::Up, Direction::Down, Direction::Left] {
            prop_assert_eq!(grid.has_wall(left, side), Some(true));
        }
        for side in [Direction::Up, Direction::Down, Direction::Right] {
            prop_assert_eq!(grid.has_wall(right, side), Some(true));
        }
    }

    #[test]
    fn flood_fill_matches_breadth_first_search(seed in any::<u64>(), x in 0i32..6, y in 0i32..8) {
        let grid = generate(seed, 1);
        let source = Position::new(x, y);
        let expected = oracle_distances(&grid, source);
        let actual = distances_from(&grid, source);
        for pos in grid.positions() {
            prop_assert_eq!(actual.get(pos), expected.get(&pos).copied(), "at {:?}", pos);
        }
    }
}

#[test]
fn smallest_maze_is_valid_across_seeds() {
    let mut config = MazeConfig::default();
    config.min_width = 3;
    config.max_width = 4;
    config.min_height = 3;
    config.max_height = 4;
    let spec = LevelSpec::for_level(&config, 1);
    assert_eq!((spec.width, spec.height), (4, 4));

    let generator = DivisionGenerator::new();
    for seed in 0..200 {
        let grid = generator.generate(&spec, &mut Dice::from_seed(seed));
        assert!(generator.validate(&grid, &spec).is_ok(), "seed {}", seed);
    }
}

#[test]
fn odd_five_by_seven_maze_is_connected() {
    let spec = LevelSpec::new(1, 5, 7, GridGeometry::default());
    let generator = DivisionGenerator::new();
    for seed in 0..300 {
        let grid = generator.generate(&spec, &mut Dice::from_seed(seed));
        assert_eq!((grid.width(), grid.height()), (5, 7));
        assert!(generator.validate(&grid, &spec).is_ok(), "seed {}", seed);

        let reached = bfs_reach(grid.ghost_town_entrance(), |&pos| {
            Direction::ALL
                .into_iter()
                .filter(|&d| grid.is_open(pos, d))
                .map(|d| pos.step(d))
                .collect::<Vec<_>>()
        })
        .count();
        assert_eq!(reached, grid.cell_count(), "seed {}", seed);
    }
}

#[test]
fn hand_built_grid_distances() {
    // Closed 3x3 with a single opening between (1,1) and (1,2)
    let mut grid = Grid::new(3, 3, GridGeometry::default());
    grid.set_horizontal_wall(1, 2, false);
    let map = distances_from(&grid, Position::new(1, 1));
    assert_eq!(map.get(Position::new(1, 1)), Some(0));
    assert_eq!(map.get(Position::new(1, 2)), Some(1));
    assert_eq!(map.get(Position::new(0, 0)), None);
    assert_eq!(map.reachable_count(), 2);
}

#[test]
fn same_seed_same_maze() {
    assert_eq!(generate(77, 3), generate(77, 3));
}
