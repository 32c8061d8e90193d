//! Orbiting bullet emitter
//!
//! Every frame the emitter moves along its orbit and releases a full ring of
//! bullets. The ring slowly twists and the bullet speed pulses, which is what
//! turns the rings into spirals.

use std::f32::consts::TAU;

use scene_engine::foundation::collections::{NodeId, TextureHandle};
use scene_engine::foundation::math::Vec2;
use scene_engine::pool::Acquired;
use scene_engine::scene::{SceneError, SceneGraph};

use crate::arena::Arena;
use crate::config::EmitterConfig;

/// Emitter phase state
#[derive(Debug, Clone)]
pub struct Emitter {
    config: EmitterConfig,
    orbit_angle: f32,
    speed_phase: f32,
    spread_phase: f32,
    spread_angle: f32,
}

impl Emitter {
    /// Create an emitter at the start of its orbit
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            config,
            orbit_angle: 0.0,
            speed_phase: 0.0,
            spread_phase: 0.0,
            spread_angle: 0.0,
        }
    }

    /// Advance every phase by one frame
    pub fn advance(&mut self, delta_time: f32) {
        self.speed_phase += self.config.speed_rate * delta_time;
        self.spread_phase += self.config.spread_rate * delta_time;
        self.spread_angle += self.config.spread_step * self.spread_phase.sin();
        self.orbit_angle += self.config.orbit_rate * delta_time;
    }

    /// Current emitter position
    pub fn position(&self) -> Vec2 {
        self.config.center + Vec2::new(self.orbit_angle.sin(), self.orbit_angle.cos()) * self.config.radius
    }

    /// Current bullet speed
    pub fn speed(&self) -> f32 {
        self.config.base_speed + self.config.speed_swing * self.speed_phase.sin()
    }

    /// Firing angles of the current ring
    pub fn wave(&self) -> impl Iterator<Item = f32> {
        let count = self.config.bullets_per_wave;
        let spread_angle = self.spread_angle;
        (0..count).map(move |i| i as f32 * TAU / count as f32 + spread_angle)
    }

    /// Advance one frame and fire a ring of bullets under `parent`
    ///
    /// Returns the number of bullets fired.
    pub fn emit(
        &mut self,
        delta_time: f32,
        graph: &mut SceneGraph<Arena>,
        arena: &mut Arena,
        parent: NodeId,
        texture: TextureHandle,
    ) -> Result<usize, SceneError> {
        self.advance(delta_time);
        let position = self.position();
        let speed = self.speed();
        let mut fired = 0;

        for angle in self.wave() {
            let acquired = arena.bullets.acquire(graph, texture, angle, speed)?;
            let id = acquired.id();
            let node = graph.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
            node.transform.position = position;

            match acquired {
                Acquired::Reused(_) => node.enabled = true,
                Acquired::Fresh(_) => graph.add_child(parent, id)?,
            }
            fired += 1;
        }

        Ok(fired)
    }
}
