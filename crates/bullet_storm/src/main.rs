//! Headless bullet storm runner

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command};

use bullet_storm::{run_headless, BulletStorm, ClockMode, GameConfig, GameError};
use scene_engine::config::Config;
use scene_engine::foundation::logging;
use scene_engine::input::{KeyCode, ScriptedInput};

const DEFAULT_CONFIG_PATH: &str = "bullet_storm.toml";
const DEFAULT_HEADLESS_FRAMES: u64 = 300;

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), GameError> {
    let matches = Command::new("bullet_storm")
        .about("Dodge rings of pooled bullets fired by an orbiting emitter")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML or RON configuration file; defaults are used if it is missing")
                .default_value(DEFAULT_CONFIG_PATH),
        )
        .arg(
            Arg::new("frames")
                .short('f')
                .long("frames")
                .value_name("COUNT")
                .help("Stop after this many frames")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("hold")
                .long("hold")
                .value_name("KEY")
                .help("Keep a key held for the whole run (up, down, left, right, space)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("realtime")
                .long("realtime")
                .help("Pace frames with the wall clock instead of simulating ticks")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("write-config")
                .long("write-config")
                .value_name("FILE")
                .help("Write the effective configuration to FILE and exit"),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let mut config = GameConfig::load_or_default(&config_path)?;

    if let Some(path) = matches.get_one::<String>("write-config") {
        config.save_to_file(path)?;
        log::info!("Wrote configuration to {}", path);
        return Ok(());
    }

    let frames = matches
        .get_one::<u64>("frames")
        .copied()
        .or(config.engine.max_frames)
        .unwrap_or(DEFAULT_HEADLESS_FRAMES);
    config.engine.max_frames = Some(frames);

    let held = matches
        .get_many::<String>("hold")
        .into_iter()
        .flatten()
        .map(|name| KeyCode::from_name(name).ok_or_else(|| GameError::InvalidArgument(format!("unknown key '{}'", name))))
        .collect::<Result<Vec<_>, _>>()?;

    let mode = if matches.get_flag("realtime") {
        ClockMode::Realtime
    } else {
        ClockMode::Simulated
    };

    let engine_config = config.engine.clone();
    let mut game = BulletStorm::new(config);
    let stats = run_headless(&mut game, engine_config, ScriptedInput::new().holding(held), mode)?;

    log::info!(
        "Done after {} frames: {} bullets created, ship hit on {} frames",
        stats.frames,
        game.arena().bullets.created(),
        game.frame_hits()
    );
    Ok(())
}
