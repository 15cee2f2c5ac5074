//! Integration test to ensure the simulation can start up without errors.

use std::io::Write;
use vengeance::{
    generation::utils::validate_grid, ActorKind, AsciiRenderer, GameOutcome, InputHandler,
    ManualClock, MazeConfig, Simulation, VengeanceError, VengeanceResult,
};

#[test]
fn test_basic_startup() -> VengeanceResult<()> {
    let clock = ManualClock::new();
    let mut sim = Simulation::new(MazeConfig::for_testing(12345), Box::new(clock.clone()))?;

    // Verify the level is properly initialized
    assert_eq!(sim.level(), 1);
    assert_eq!(sim.total_points(), 0);
    assert_eq!((sim.grid().width(), sim.grid().height()), (6, 8));
    validate_grid(sim.grid())?;
    assert!(sim.items().matches(sim.grid()));
    assert!(sim.remaining_points() > 0);

    // Only Blinky plays on the first level, and he starts selected
    assert!(sim.actor(ActorKind::Pacman).is_alive());
    assert!(sim.actor(ActorKind::Blinky).is_alive());
    assert!(!sim.actor(ActorKind::Clyde).is_alive());
    assert_eq!(sim.selection(), ActorKind::Blinky);

    for _ in 0..120 {
        clock.advance(1.0 / 60.0);
        sim.update(1.0 / 60.0);
    }
    assert_eq!(sim.stats().frames, 120);
    assert_ne!(sim.outcome(), GameOutcome::Defeat);

    let text = AsciiRenderer::render(&sim);
    assert_eq!(text.lines().count(), 2 * sim.grid().height() as usize + 1);
    // Pacman is drawn last, so he may cover Blinky
    assert!(text.contains('B') || text.contains('@'));

    Ok(())
}

#[test]
fn test_key_script_drives_the_selection() -> VengeanceResult<()> {
    let mut sim = Simulation::new(MazeConfig::for_testing(9), Box::new(ManualClock::new()))?;
    let input = InputHandler::new();

    // Blinky is the only ghost alive, so rotating comes back to him
    for command in input.parse_script("space p") {
        sim.apply_command(&command);
    }
    assert_eq!(sim.selection(), ActorKind::Blinky);
    assert!(sim.is_paused());
    Ok(())
}

#[test]
fn test_config_loads_from_file() -> VengeanceResult<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, r#"{{ "seed": 4, "min_width": 9, "max_width": 21 }}"#)?;

    let config = MazeConfig::from_json_file(file.path())?;
    assert_eq!(config.seed, Some(4));
    assert_eq!(config.min_width, 9);
    assert_eq!(config.min_height, MazeConfig::default().min_height);

    let sim = Simulation::new(config, Box::new(ManualClock::new()))?;
    assert_eq!(sim.grid().width(), 10);
    Ok(())
}

#[test]
fn test_config_errors_are_reported() {
    let dir = tempfile::tempdir().expect("temp dir");

    let missing = MazeConfig::from_json_file(dir.path().join("missing.json"));
    assert!(matches!(missing, Err(VengeanceError::Io(_))));

    let garbled = dir.path().join("garbled.json");
    std::fs::write(&garbled, "{ not json").expect("write");
    assert!(matches!(
        MazeConfig::from_json_file(&garbled),
        Err(VengeanceError::Serde(_))
    ));

    let invalid = dir.path().join("invalid.json");
    std::fs::write(&invalid, r#"{ "fruit_density": 2.0 }"#).expect("write");
    assert!(matches!(
        MazeConfig::from_json_file(&invalid),
        Err(VengeanceError::InvalidConfig(_))
    ));
}
