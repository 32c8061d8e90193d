//! Input management system
//!
//! Platforms report [`InputEvent`]s through an
//! [`InputSource`](crate::platform::InputSource); [`InputState`] folds them
//! into the set of held keys the game reads each frame.

use std::collections::VecDeque;

use bitflags::bitflags;

use crate::foundation::math::{normalize_or_zero, Vec2};
use crate::platform::InputSource;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Space key
    Space,
    /// Escape key
    Escape,
    /// Any key the engine does not track
    Other,
}

impl KeyCode {
    /// Parse a key name as used on the command line (`up`, `left`, `escape`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "space" => Some(Self::Space),
            "escape" | "esc" => Some(Self::Escape),
            _ => None,
        }
    }

    fn flag(self) -> KeySet {
        match self {
            Self::Up => KeySet::UP,
            Self::Down => KeySet::DOWN,
            Self::Left => KeySet::LEFT,
            Self::Right => KeySet::RIGHT,
            Self::Space => KeySet::SPACE,
            Self::Escape => KeySet::ESCAPE,
            Self::Other => KeySet::empty(),
        }
    }
}

/// Platform input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close or equivalent
    Quit,
    /// Key pressed
    KeyDown(KeyCode),
    /// Key released
    KeyUp(KeyCode),
}

bitflags! {
    /// Set of currently held keys
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeySet: u8 {
        /// Up arrow
        const UP     = 0b0000_0001;
        /// Down arrow
        const DOWN   = 0b0000_0010;
        /// Left arrow
        const LEFT   = 0b0000_0100;
        /// Right arrow
        const RIGHT  = 0b0000_1000;
        /// Space key
        const SPACE  = 0b0001_0000;
        /// Escape key
        const ESCAPE = 0b0010_0000;
    }
}

/// Held keys and quit requests accumulated from events
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    held: KeySet,
    quit_requested: bool,
}

impl InputState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the state
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => self.quit_requested = true,
            InputEvent::KeyDown(key) => {
                if key == KeyCode::Escape {
                    self.quit_requested = true;
                }
                self.held.insert(key.flag());
            }
            InputEvent::KeyUp(key) => self.held.remove(key.flag()),
        }
    }

    /// Fold a batch of events into the state
    pub fn handle_events(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    /// Check if a key is held
    pub fn is_held(&self, key: KeyCode) -> bool {
        let flag = key.flag();
        !flag.is_empty() && self.held.contains(flag)
    }

    /// Currently held keys
    pub fn held(&self) -> KeySet {
        self.held
    }

    /// Quit event seen or Escape pressed
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Unit vector from the held arrow keys (screen space, y down); zero if none
    pub fn direction(&self) -> Vec2 {
        let mut direction = Vec2::zeros();
        if self.held.contains(KeySet::LEFT) {
            direction.x -= 1.0;
        }
        if self.held.contains(KeySet::RIGHT) {
            direction.x += 1.0;
        }
        if self.held.contains(KeySet::UP) {
            direction.y -= 1.0;
        }
        if self.held.contains(KeySet::DOWN) {
            direction.y += 1.0;
        }
        normalize_or_zero(direction)
    }
}

/// Replays a fixed schedule of events, one batch per poll
///
/// Poll `n` (zero based) returns the events scheduled for frame `n`. Once the
/// schedule runs out every poll is empty.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    /// Input that never produces events
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Schedule events for the given frame
    pub fn with_events_at(mut self, frame: usize, events: impl IntoIterator<Item = InputEvent>) -> Self {
        if self.frames.len() <= frame {
            self.frames.resize_with(frame + 1, Vec::new);
        }
        self.frames[frame].extend(events);
        self
    }

    /// Builder pattern: Press keys on the first frame and keep them held
    pub fn holding(self, keys: impl IntoIterator<Item = KeyCode>) -> Self {
        self.with_events_at(0, keys.into_iter().map(InputEvent::KeyDown))
    }

    /// Frames still scheduled
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}
