//! # Vengeance Headless Driver
//!
//! Generates a level, runs the simulation for a fixed number of frames on a
//! manual clock and prints the maze and a summary.

use clap::Parser;
use log::{error, info, warn};
use vengeance::{
    generation::utils::validate_grid, ActorKind, AiMode, AsciiRenderer, Command, CommandOutcome,
    GameOutcome, InputHandler, ManualClock, MazeConfig, Simulation, SoundEffect, VengeanceError,
    VengeanceResult,
};

/// Command line arguments for the vengeance driver.
#[derive(Parser, Debug)]
#[command(name = "vengeance")]
#[command(about = "Headless maze-chase simulation played from the ghosts' side")]
#[command(version)]
struct Args {
    /// Random seed for maze generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Level to start on
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// JSON file with tuning overrides
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Let every living ghost hunt Pacman
    #[arg(long)]
    autopilot: bool,

    /// Key presses applied before the first frame, e.g. "left e space"
    #[arg(long)]
    keys: Option<String>,

    /// Print Pacman's distance map after the run
    #[arg(long)]
    dump_distances: bool,

    /// Check the generated maze's structural guarantees and exit non-zero on failure
    #[arg(long)]
    verify: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_target(false)
        .init();
}

fn load_config(args: &Args) -> VengeanceResult<MazeConfig> {
    let mut config = match &args.config {
        Some(path) => MazeConfig::from_json_file(path)?,
        None => MazeConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> VengeanceResult<()> {
    if args.dt <= 0.0 {
        return Err(VengeanceError::InvalidConfig(format!(
            "frame time {} must be positive",
            args.dt
        )));
    }
    let config = load_config(args)?;
    info!("Starting vengeance v{}", vengeance::VERSION);

    let clock = ManualClock::new();
    let mut sim = Simulation::new(config, Box::new(clock.clone()))?;
    for _ in 1..args.level.max(1) {
        sim.new_level(false);
    }

    if args.verify {
        validate_grid(sim.grid())?;
        info!("Level {} maze passed verification", sim.level());
    }

    if args.autopilot {
        for ghost in ActorKind::GHOSTS {
            sim.actor_mut(ghost).set_mode(AiMode::Hunt);
        }
    }

    if let Some(script) = &args.keys {
        let input = InputHandler::new();
        for command in input.parse_script(script) {
            let outcome = sim.apply_command(&command);
            report(&command, &outcome);
        }
    }

    let mut sounds = 0usize;
    for frame in 0..args.frames {
        clock.advance(args.dt);
        sim.update(args.dt as f32);
        for effect in SoundEffect::ALL {
            if sim.take_sound(effect) {
                sounds += 1;
            }
        }
        if sim.outcome() != GameOutcome::Playing {
            info!("Game decided after {} frames", frame + 1);
            break;
        }
    }

    println!("{}", AsciiRenderer::render(&sim));
    if args.dump_distances {
        if let CommandOutcome::Distances(text) = sim.apply_command(&Command::DumpDistances) {
            println!("{}", text);
        }
    }

    let stats = sim.stats();
    let outcome = match sim.outcome() {
        GameOutcome::Playing => "still playing",
        GameOutcome::Victory => "victory: Pacman was caught",
        GameOutcome::Defeat => "defeat: every ghost was eaten",
    };
    println!("Level:            {}", sim.level());
    println!("Outcome:          {}", outcome);
    println!("Frames:           {}", stats.frames);
    println!("Items eaten:      {} ({} points)", stats.items_eaten, stats.points_eaten);
    println!("Points remaining: {}", sim.remaining_points());
    println!("Points saved:     {}", sim.total_points() + sim.remaining_points());
    println!("Ghosts lost:      {}", stats.ghosts_lost);
    println!("Abilities used:   {}", stats.abilities_used);
    println!("Sounds played:    {}", sounds);
    Ok(())
}

fn report(command: &Command, outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::Refused => warn!("{:?} had no effect", command),
        CommandOutcome::Distances(text) => println!("{}", text),
        other => info!("{:?}: {:?}", command, other),
    }
}
