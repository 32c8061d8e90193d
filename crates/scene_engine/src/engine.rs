//! Core engine implementation
//!
//! [`Engine`] owns the platform collaborators and runs the fixed-tick frame
//! loop:
//!
//! ```text
//! delta time -> poll input -> (quit?) -> app.update -> clear -> app.draw
//!            -> present -> fps telemetry -> sleep until next tick
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::Application;
use crate::config::Config;
use crate::foundation::time::{FpsCounter, FramePacer, Timer};
use crate::input::InputState;
use crate::platform::{Canvas, Clock, InputSource, TextureRegistry};
use crate::scene::DEFAULT_MAX_SELF_CHILD_COUNT;

/// Main engine struct
pub struct Engine<K: Clock, I: InputSource, S: Canvas> {
    clock: K,
    input_source: I,
    canvas: S,

    /// Texture metadata shared with the application
    textures: TextureRegistry,

    input: InputState,
    timer: Timer,
    fps: FpsCounter,
    pacer: FramePacer,
    config: EngineConfig,
}

impl<K: Clock, I: InputSource, S: Canvas> Engine<K, I, S> {
    /// Create a new engine instance
    pub fn new(config: EngineConfig, clock: K, input_source: I, canvas: S) -> Self {
        log::info!("Initializing engine: {} ({}x{})", config.title, config.width, config.height);

        Self {
            clock,
            input_source,
            canvas,
            textures: TextureRegistry::new(),
            input: InputState::new(),
            timer: Timer::new(),
            fps: FpsCounter::new(),
            pacer: FramePacer::new(config.tick_interval()),
            config,
        }
    }

    /// Run the main loop until quit or the configured frame limit
    pub fn run<A: Application>(&mut self, app: &mut A) -> Result<FrameStats, EngineError> {
        if let Err(e) = app.initialize(&mut self.textures) {
            app.cleanup();
            return Err(EngineError::InitializationFailed(format!("App initialization: {}", e)));
        }

        log::info!("Starting main loop...");
        let started = self.clock.now();
        let result = self.run_frames(app);

        // Cleanup
        app.cleanup();

        let frames = result?;
        let stats = FrameStats {
            frames,
            elapsed: self.clock.now().saturating_sub(started),
            last_fps: self.fps.last_fps(),
            quit_requested: self.input.quit_requested(),
        };
        log::info!("Engine shutdown complete after {} frames", stats.frames);
        Ok(stats)
    }

    fn run_frames<A: Application>(&mut self, app: &mut A) -> Result<u64, EngineError> {
        let mut frames = 0_u64;

        loop {
            let now = self.clock.now();
            self.pacer.begin_frame(now);
            let delta_time = self.timer.update(now);

            self.input.handle_events(self.input_source.poll_events());
            if self.input.quit_requested() {
                log::info!("Quit requested");
                break;
            }

            app.update(&self.input, &self.textures, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

            self.canvas.clear();
            app.draw(&self.textures, &mut self.canvas)
                .map_err(|e| EngineError::ApplicationError(format!("App draw: {}", e)))?;
            self.canvas.present();
            frames += 1;

            if let Some(fps) = self.fps.tick(self.clock.now()) {
                log::info!("{} - fps {}", app.status(), fps);
            }

            if self.config.max_frames.is_some_and(|max| frames >= max) {
                log::info!("Reached frame limit of {}", frames);
                break;
            }

            let time_left = self.pacer.time_left(self.clock.now());
            self.clock.sleep(time_left);
        }

        Ok(frames)
    }

    /// Get the texture registry
    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    /// Get the canvas
    pub fn canvas(&self) -> &S {
        &self.canvas
    }

    /// Get the clock
    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Get the accumulated input state
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames fully updated and drawn
    pub frames: u64,
    /// Clock time between the first and last frame
    pub elapsed: Duration,
    /// Most recent frame rate report
    pub last_fps: u32,
    /// Whether the loop ended on a quit request
    pub quit_requested: bool,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window title
    pub title: String,

    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// Target frame interval in milliseconds
    pub tick_interval_ms: u64,

    /// Self-loop recursion bound for scene traversals
    pub max_self_child_count: u32,

    /// Stop after this many frames; run until quit when unset
    pub max_frames: Option<u64>,
}

impl EngineConfig {
    /// Target frame interval
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Scene Engine Application".to_string(),
            width: 800,
            height: 600,
            tick_interval_ms: 30,
            max_self_child_count: DEFAULT_MAX_SELF_CHILD_COUNT,
            max_frames: None,
        }
    }
}

impl Config for EngineConfig {}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// The application failed to initialize
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// The application failed during a frame
    #[error("Application error: {0}")]
    ApplicationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::input::{InputEvent, KeyCode, ScriptedInput};
    use crate::platform::{DrawQueue, ManualClock, SpriteSink};

    #[derive(Default)]
    struct CountingApp {
        initialized: bool,
        updates: u32,
        deltas: Vec<f32>,
        cleaned_up: bool,
        fail_init: bool,
        fail_at: Option<u32>,
    }

    impl Application for CountingApp {
        fn initialize(&mut self, _textures: &mut TextureRegistry) -> Result<(), AppError> {
            if self.fail_init {
                return Err(AppError::Custom("no assets".to_string()));
            }
            self.initialized = true;
            Ok(())
        }

        fn update(&mut self, _input: &InputState, _textures: &TextureRegistry, delta_time: f32) -> Result<(), AppError> {
            self.updates += 1;
            self.deltas.push(delta_time);
            if self.fail_at == Some(self.updates) {
                return Err(AppError::Custom("boom".to_string()));
            }
            Ok(())
        }

        fn draw<S: SpriteSink>(&self, _textures: &TextureRegistry, _sink: &mut S) -> Result<(), AppError> {
            Ok(())
        }

        fn cleanup(&mut self) {
            self.cleaned_up = true;
        }
    }

    fn engine(input: ScriptedInput, max_frames: Option<u64>) -> Engine<ManualClock, ScriptedInput, DrawQueue> {
        let config = EngineConfig {
            max_frames,
            ..Default::default()
        };
        Engine::new(config, ManualClock::new(), input, DrawQueue::new())
    }

    #[test]
    fn test_stops_at_frame_limit() {
        let mut engine = engine(ScriptedInput::new(), Some(5));
        let mut app = CountingApp::default();

        let stats = engine.run(&mut app).unwrap();

        assert_eq!(stats.frames, 5);
        assert!(!stats.quit_requested);
        assert!(app.initialized && app.cleaned_up);
        assert_eq!(engine.canvas().frames_presented(), 5);
    }

    #[test]
    fn test_fixed_tick_delta() {
        let mut engine = engine(ScriptedInput::new(), Some(3));
        let mut app = CountingApp::default();

        engine.run(&mut app).unwrap();

        assert_eq!(app.deltas[0], 0.0);
        assert!((app.deltas[1] - 0.03).abs() < 1e-6);
        assert!((app.deltas[2] - 0.03).abs() < 1e-6);
    }

    #[test]
    fn test_escape_stops_before_update() {
        let input = ScriptedInput::new().with_events_at(2, [InputEvent::KeyDown(KeyCode::Escape)]);
        let mut engine = engine(input, None);
        let mut app = CountingApp::default();

        let stats = engine.run(&mut app).unwrap();

        assert_eq!(stats.frames, 2);
        assert_eq!(app.updates, 2);
        assert!(stats.quit_requested);
    }

    #[test]
    fn test_app_error_still_cleans_up() {
        let mut engine = engine(ScriptedInput::new(), Some(10));
        let mut app = CountingApp {
            fail_at: Some(3),
            ..Default::default()
        };

        let result = engine.run(&mut app);

        assert!(matches!(result, Err(EngineError::ApplicationError(_))));
        assert!(app.cleaned_up);
    }

    #[test]
    fn test_initialize_failure_skips_loop_and_cleans_up() {
        let mut engine = engine(ScriptedInput::new(), Some(10));
        let mut app = CountingApp {
            fail_init: true,
            ..Default::default()
        };

        let result = engine.run(&mut app);

        assert!(matches!(result, Err(EngineError::InitializationFailed(_))));
        assert_eq!(app.updates, 0);
        assert!(app.cleaned_up);
        assert_eq!(engine.canvas().frames_presented(), 0);
    }

    #[test]
    fn test_fps_reported_with_manual_clock() {
        let mut engine = engine(ScriptedInput::new(), Some(40));
        let mut app = CountingApp::default();

        let stats = engine.run(&mut app).unwrap();

        // 30 ms ticks: the first report covers frames at 0..=1020 ms
        assert_eq!(stats.last_fps, 35);
        assert_eq!(engine.clock().now(), Duration::from_millis(39 * 30));
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: EngineConfig = toml::from_str("title = \"demo\"\nmax_frames = 3").unwrap();

        assert_eq!(config.title, "demo");
        assert_eq!(config.tick_interval(), Duration::from_millis(30));
        assert_eq!(config.max_self_child_count, 50);
        assert_eq!(config.max_frames, Some(3));
    }
}
