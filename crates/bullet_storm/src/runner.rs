//! Headless launcher shared by the binaries

use scene_engine::config::ConfigError;
use scene_engine::input::ScriptedInput;
use scene_engine::platform::{Clock, DrawQueue, ManualClock, SystemClock};
use scene_engine::{Application, Engine, EngineConfig, EngineError, FrameStats};

/// How frame time advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// Wall clock; frames are paced in real time
    Realtime,
    /// Simulated clock; every frame takes exactly one tick, no waiting
    Simulated,
}

/// Launcher errors
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Configuration could not be loaded or saved
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The engine loop failed
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Bad command line value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Run an application against the headless platform
pub fn run_headless<A: Application>(
    app: &mut A,
    config: EngineConfig,
    input: ScriptedInput,
    mode: ClockMode,
) -> Result<FrameStats, EngineError> {
    match mode {
        ClockMode::Realtime => run_with(app, config, SystemClock::new(), input),
        ClockMode::Simulated => run_with(app, config, ManualClock::new(), input),
    }
}

fn run_with<A: Application, K: Clock>(
    app: &mut A,
    config: EngineConfig,
    clock: K,
    input: ScriptedInput,
) -> Result<FrameStats, EngineError> {
    let mut engine = Engine::new(config, clock, input, DrawQueue::new());
    let stats = engine.run(app)?;
    log::info!(
        "{} frames in {:.2}s, {} sprites submitted",
        stats.frames,
        stats.elapsed.as_secs_f32(),
        engine.canvas().total_submitted()
    );
    Ok(stats)
}
