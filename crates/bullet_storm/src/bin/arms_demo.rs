//! Headless arms demo runner

use std::process::ExitCode;

use clap::{Arg, ArgAction, Command};

use bullet_storm::{run_headless, ArmsConfig, ArmsDemo, ClockMode};
use scene_engine::foundation::logging;
use scene_engine::input::ScriptedInput;
use scene_engine::EngineConfig;

fn main() -> ExitCode {
    logging::init();

    let matches = Command::new("arms_demo")
        .about("Four chains of wobbling sprites hanging off a root node")
        .arg(
            Arg::new("sprite")
                .long("sprite")
                .value_name("FILE")
                .help("Sprite image")
                .default_value("assets/sprite.png"),
        )
        .arg(
            Arg::new("frames")
                .short('f')
                .long("frames")
                .value_name("COUNT")
                .help("Stop after this many frames")
                .value_parser(clap::value_parser!(u64))
                .default_value("300"),
        )
        .arg(
            Arg::new("self-loop")
                .long("self-loop")
                .help("Make the root its own child")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("realtime")
                .long("realtime")
                .help("Pace frames with the wall clock instead of simulating ticks")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = ArmsConfig {
        sprite_path: matches
            .get_one::<String>("sprite")
            .cloned()
            .unwrap_or_else(|| ArmsConfig::default().sprite_path),
        self_loop: matches.get_flag("self-loop"),
        ..Default::default()
    };
    let engine_config = EngineConfig {
        title: "Arms Demo".to_string(),
        max_frames: matches.get_one::<u64>("frames").copied(),
        ..Default::default()
    };
    let mode = if matches.get_flag("realtime") {
        ClockMode::Realtime
    } else {
        ClockMode::Simulated
    };

    let mut demo = ArmsDemo::new(config);
    match run_headless(&mut demo, engine_config, ScriptedInput::new(), mode) {
        Ok(stats) => {
            log::info!("Arms demo ran {} frames", stats.frames);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
