//! Application trait and lifecycle management

use thiserror::Error;

use crate::config::ConfigError;
use crate::input::InputState;
use crate::platform::{SpriteSink, TextureError, TextureRegistry};
use crate::scene::SceneError;

/// Application lifecycle trait
///
/// Implement this trait to drive a scene with [`Engine::run`](crate::Engine::run).
/// Each frame the engine calls [`update`](Self::update) then
/// [`draw`](Self::draw).
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame. Register or load textures here
    /// and build the initial scene.
    fn initialize(&mut self, textures: &mut TextureRegistry) -> Result<(), AppError>;

    /// Advance the simulation
    ///
    /// # Arguments
    /// * `input` - Keys held this frame
    /// * `textures` - Texture metadata for size-dependent logic such as collision
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, input: &InputState, textures: &TextureRegistry, delta_time: f32) -> Result<(), AppError>;

    /// Emit this frame's sprites
    fn draw<S: SpriteSink>(&self, textures: &TextureRegistry, sink: &mut S) -> Result<(), AppError>;

    /// Short status shown in the once-per-second telemetry line
    fn status(&self) -> String {
        String::from("running")
    }

    /// Cleanup the application
    ///
    /// Called once when the loop ends, whether it stopped normally or not.
    fn cleanup(&mut self) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Scene graph operation failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Texture lookup or loading failed
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
