//! End-to-end scenarios driving the simulation frame by frame.

use vengeance::{
    ActorKind, AiMode, Command, Dice, GameOutcome, Grid, GridGeometry, ItemGrid, ItemKind,
    ManualClock, MazeConfig, Movable, Position, Simulation, SoundEffect, VengeanceResult,
};

const DT: f32 = 1.0 / 60.0;

fn step(sim: &mut Simulation, clock: &ManualClock, frames: usize) {
    for _ in 0..frames {
        clock.advance(DT as f64);
        sim.update(DT);
    }
}

/// Runs until `done` holds or `limit` frames pass. Returns the frames used.
fn run_until(
    sim: &mut Simulation,
    clock: &ManualClock,
    limit: usize,
    mut done: impl FnMut(&Simulation) -> bool,
) -> Option<usize> {
    for frame in 0..limit {
        if done(sim) {
            return Some(frame);
        }
        clock.advance(DT as f64);
        sim.update(DT);
    }
    None
}

fn open_sim(clock: &ManualClock) -> Simulation {
    Simulation::from_parts(
        MazeConfig::for_testing(11),
        Grid::open(6, 8, GridGeometry::new(40.0, 0, 0)),
        ItemGrid::empty(6, 8),
        Dice::from_seed(11),
        Box::new(clock.clone()),
    )
}

fn clear_items(sim: &mut Simulation) {
    let cells: Vec<Position> = sim.grid().positions().collect();
    for pos in cells {
        sim.items_mut().consume(pos);
    }
}

#[test]
fn test_ghost_touching_pacman_wins() {
    let clock = ManualClock::new();
    let mut sim = open_sim(&clock);
    sim.move_actor_to_cell(ActorKind::Blinky, Position::origin());

    sim.update(DT);
    assert!(!sim.actor(ActorKind::Pacman).is_alive());
    assert!(sim.actor(ActorKind::Blinky).is_alive());
    assert!(sim.take_sound(SoundEffect::PacmanDeath));
    assert_eq!(sim.outcome(), GameOutcome::Victory);
}

#[test]
fn test_scared_ghost_is_eaten() {
    let clock = ManualClock::new();
    let mut sim = open_sim(&clock);
    sim.level_up(ActorKind::Pinky);
    sim.actor_mut(ActorKind::Pinky).set_scared(true);
    sim.move_actor_to_cell(ActorKind::Pinky, Position::origin());

    let pacman = *sim.actor(ActorKind::Pacman).motion();
    sim.actor_mut(ActorKind::Pinky).move_to_pixel(pacman.x + 7.0, pacman.y);
    sim.update(0.0);

    // No window is running, so the flag drops at the end of the frame, after
    // the collision has been resolved
    assert!(!sim.actor(ActorKind::Pinky).is_alive());
    assert_eq!(sim.actor(ActorKind::Pinky).level(), 0);
    assert!(sim.actor(ActorKind::Pacman).is_alive());
    assert!(sim.take_sound(SoundEffect::GhostDeath));
    assert_eq!(sim.stats().ghosts_lost, 1);
}

/// Pacman at cell (2, 2) with Blinky five pixels off on both axes.
fn close_encounter(clock: &ManualClock, scared: bool) -> Simulation {
    let mut sim = open_sim(clock);
    sim.move_actor_to_cell(ActorKind::Pacman, Position::new(2, 2));
    let (px, py) = sim.grid().cell_center(Position::new(2, 2));
    let blinky = sim.actor_mut(ActorKind::Blinky);
    blinky.move_to_pixel(px as f32 + 5.0, py as f32 + 5.0);
    blinky.set_scared(scared);
    sim.update(0.0);
    sim
}

#[test]
fn test_scared_ghost_dies_at_five_pixels() {
    let clock = ManualClock::new();
    let mut sim = close_encounter(&clock, true);
    assert!(!sim.actor(ActorKind::Blinky).is_alive());
    assert!(sim.actor(ActorKind::Pacman).is_alive());
    assert!(sim.take_sound(SoundEffect::GhostDeath));
    assert!(!sim.sound(SoundEffect::PacmanDeath));
}

#[test]
fn test_unscared_ghost_kills_at_five_pixels() {
    let clock = ManualClock::new();
    let mut sim = close_encounter(&clock, false);
    assert!(sim.actor(ActorKind::Blinky).is_alive());
    assert!(!sim.actor(ActorKind::Pacman).is_alive());
    assert!(sim.take_sound(SoundEffect::PacmanDeath));
    assert!(!sim.sound(SoundEffect::GhostDeath));
}

#[test]
fn test_collision_box_is_strict() {
    let clock = ManualClock::new();
    let mut sim = open_sim(&clock);
    let (px, py) = sim.grid().cell_center(Position::origin());
    sim.actor_mut(ActorKind::Blinky).move_to_pixel(px as f32 + 8.0, py as f32);
    sim.update(0.0);
    assert_eq!(sim.outcome(), GameOutcome::Playing);
}

#[test]
fn test_dead_pacman_collides_with_nobody() {
    let clock = ManualClock::new();
    let mut sim = open_sim(&clock);
    sim.actor_mut(ActorKind::Pacman).set_alive(false);
    sim.actor_mut(ActorKind::Blinky).set_scared(true);
    sim.move_actor_to_cell(ActorKind::Blinky, Position::origin());
    sim.update(DT);
    assert!(sim.actor(ActorKind::Blinky).is_alive());
    assert!(!sim.sound(SoundEffect::GhostDeath));
}

/// A generated level with every item eaten, no ghosts, and a single peach at
/// `target`.
fn lone_peach(clock: &ManualClock, target: Position) -> VengeanceResult<Simulation> {
    let mut sim = Simulation::new(MazeConfig::for_testing(21), Box::new(clock.clone()))?;
    clear_items(&mut sim);
    for ghost in ActorKind::GHOSTS {
        sim.actor_mut(ghost).set_alive(false);
    }
    sim.items_mut().place(target, ItemKind::Peach);
    Ok(sim)
}

#[test]
fn test_pacman_seeks_the_only_item() -> VengeanceResult<()> {
    let layout = lone_peach(&ManualClock::new(), Position::origin())?;
    let (width, height) = (layout.grid().width(), layout.grid().height());
    let target = Position::new(width - 1, height - 1);
    let town = layout.grid().ghost_town_row();
    let starts = [
        Position::origin(),
        Position::new(width - 1, 0),
        Position::new(0, height - 1),
        layout.grid().ghost_town_entrance(),
        town[0],
        town[1],
        town[2],
    ];

    for start in starts {
        let clock = ManualClock::new();
        let mut sim = lone_peach(&clock, target)?;
        sim.move_actor_to_cell(ActorKind::Pacman, start);
        sim.actor_mut(ActorKind::Pacman).set_waypoint(None);

        let frames = run_until(&mut sim, &clock, 6000, |s| {
            s.items().get(target).is_some_and(|item| item.is_consumed())
        });

        assert!(frames.is_some(), "Pacman never reached {:?} from {:?}", target, start);
        assert_eq!(sim.actor(ActorKind::Pacman).waypoint(), Some(Position::origin()));
        assert!(sim.take_sound(SoundEffect::Fruit));
        assert_eq!(sim.stats().items_eaten, 1);
        assert_eq!(sim.stats().points_eaten, ItemKind::Peach.points());
        assert_eq!(sim.remaining_points(), 0);
    }
    Ok(())
}

#[test]
fn test_hunting_ghost_catches_idle_pacman() -> VengeanceResult<()> {
    let clock = ManualClock::new();
    let mut sim = Simulation::new(MazeConfig::for_testing(5), Box::new(clock.clone()))?;
    clear_items(&mut sim);
    sim.actor_mut(ActorKind::Blinky).set_mode(AiMode::Hunt);

    let frames = run_until(&mut sim, &clock, 6000, |s| s.outcome() != GameOutcome::Playing);
    assert!(frames.is_some());
    assert_eq!(sim.outcome(), GameOutcome::Victory);
    Ok(())
}

#[test]
fn test_large_dot_turns_the_tables() {
    let clock = ManualClock::new();
    let mut sim = open_sim(&clock);
    sim.items_mut().place(Position::new(0, 1), ItemKind::LargeDot);
    sim.turn_actor(ActorKind::Pacman, vengeance::Direction::Up);

    let eaten = run_until(&mut sim, &clock, 120, |s| s.sound(SoundEffect::LargeDot));
    assert!(eaten.is_some());
    assert!(sim.take_sound(SoundEffect::VulnerabilityStarted));
    for ghost in ActorKind::GHOSTS {
        assert!(sim.actor(ghost).is_scared(), "{} should be scared", ghost);
    }
    assert_eq!(sim.actor(ActorKind::Pacman).mode(), AiMode::Hunt);

    // The window is 3 s plus half a second per level
    let started = sim.vulnerability_started().unwrap_or_default();
    clock.set(started + 3.4);
    sim.update(0.0);
    assert!(sim.actor(ActorKind::Clyde).is_scared());
    clock.set(started + 3.6);
    sim.update(0.0);
    assert!(!sim.actor(ActorKind::Clyde).is_scared());
    assert!(sim.take_sound(SoundEffect::VulnerabilityEnded));
    assert_eq!(sim.actor(ActorKind::Pacman).mode(), AiMode::SeekItem);
}

#[test]
fn test_consumption_sounds_clear_next_frame() {
    let clock = ManualClock::new();
    let mut sim = open_sim(&clock);
    sim.items_mut().place(Position::new(0, 1), ItemKind::SmallDot);
    sim.turn_actor(ActorKind::Pacman, vengeance::Direction::Up);
    run_until(&mut sim, &clock, 120, |s| s.sound(SoundEffect::SmallDot));
    assert!(sim.sound(SoundEffect::SmallDot));
    step(&mut sim, &clock, 1);
    assert!(!sim.sound(SoundEffect::SmallDot));
}

#[test]
fn test_levels_grow_and_unlock_ghosts() -> VengeanceResult<()> {
    let clock = ManualClock::new();
    let mut sim = Simulation::new(MazeConfig::for_testing(8), Box::new(clock.clone()))?;
    assert_eq!(sim.total_points(), 0);
    let mut last_size = (0, 0);
    for level in 1..=7 {
        assert_eq!(sim.level(), level);
        let size = (sim.grid().width(), sim.grid().height());
        assert!(size.0 >= last_size.0 && size.1 >= last_size.1);
        last_size = size;

        step(&mut sim, &clock, 10);
        let saved = sim.total_points() + sim.remaining_points();
        sim.apply_command(&Command::NewLevel { reset: false });
        assert_eq!(sim.total_points(), saved);
    }
    assert_eq!(sim.level(), 8);
    assert!(ActorKind::GHOSTS.iter().all(|&g| sim.actor(g).is_alive()));
    Ok(())
}

#[test]
fn test_pause_freezes_everything() {
    let clock = ManualClock::new();
    let mut sim = open_sim(&clock);
    sim.turn_actor(ActorKind::Blinky, vengeance::Direction::Down);
    sim.apply_command(&Command::TogglePause);
    let before = sim.actor(ActorKind::Blinky).clone();
    step(&mut sim, &clock, 30);
    assert_eq!(sim.actor(ActorKind::Blinky), &before);
    assert_eq!(sim.stats().frames, 0);
}

#[test]
fn test_all_ghosts_dead_is_defeat() {
    let clock = ManualClock::new();
    let mut sim = open_sim(&clock);
    for ghost in ActorKind::GHOSTS {
        assert_eq!(sim.outcome(), GameOutcome::Playing);
        sim.actor_mut(ghost).set_alive(false);
    }
    assert_eq!(sim.outcome(), GameOutcome::Defeat);
}
