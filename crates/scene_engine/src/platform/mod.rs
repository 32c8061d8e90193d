//! Platform abstraction
//!
//! The engine only talks to the outside world through these traits: a clock,
//! an input event source, texture metadata and a sprite sink. The headless
//! implementations here drive the binaries and every test; a windowed
//! backend plugs in by implementing the same traits.

mod canvas;
mod clock;
mod textures;

use std::time::Duration;

use crate::foundation::collections::TextureHandle;
use crate::foundation::math::Rect;
use crate::input::InputEvent;

pub use canvas::DrawQueue;
pub use clock::{ManualClock, SystemClock};
pub use textures::{TextureError, TextureInfo, TextureRegistry};

/// Monotonic time source
pub trait Clock {
    /// Time elapsed since the clock started
    fn now(&self) -> Duration;

    /// Block for `duration`
    fn sleep(&mut self, duration: Duration);
}

/// Source of platform events
pub trait InputSource {
    /// Drain the events that arrived since the previous poll
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// Texture metadata lookup
pub trait TextureStore {
    /// Pixel size of a texture, `None` if the handle is unknown
    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)>;
}

/// One sprite to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Texture to draw
    pub texture: TextureHandle,

    /// Destination rectangle in screen space
    pub dest: Rect,

    /// Clockwise rotation around the rectangle center, in degrees
    pub rotation_degrees: f32,
}

/// Receives draw commands
pub trait SpriteSink {
    /// Queue one sprite for the current frame
    fn submit(&mut self, command: DrawCommand);
}

/// Frame-oriented sprite target
pub trait Canvas: SpriteSink {
    /// Start a new frame
    fn clear(&mut self);

    /// Show the frame drawn since the last clear
    fn present(&mut self);
}
