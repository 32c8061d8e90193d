//! State shared with behaviors during the update traversal

use scene_engine::input::InputState;

use crate::bullets::BulletPool;
use crate::config::GameConfig;

/// Mutable game state handed to every behavior
#[derive(Debug)]
pub struct Arena {
    /// Retired bullets waiting for reuse
    pub bullets: BulletPool,

    /// Keys held this frame
    pub input: InputState,
}

impl Arena {
    /// Build the state for a game configuration
    pub fn new(config: &GameConfig) -> Self {
        Self {
            bullets: BulletPool::new(config.pool.initial_capacity, config.play_area),
            input: InputState::new(),
        }
    }
}
