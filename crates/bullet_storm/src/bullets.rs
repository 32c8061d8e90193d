//! Bullet pool
//!
//! Thin layer over [`NodePool`] that knows how to turn a node into a bullet.

use scene_engine::foundation::collections::{NodeId, TextureHandle};
use scene_engine::foundation::math::Vec2;
use scene_engine::pool::{Acquired, NodePool};
use scene_engine::scene::{Node, SceneError, SceneGraph};

use crate::arena::Arena;
use crate::behaviors::BulletMotion;
use crate::config::PlayArea;

/// Velocity of a bullet fired at `angle` radians with `speed`
pub fn bullet_velocity(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.sin() * speed, angle.cos() * speed)
}

/// Pool of bullet nodes
#[derive(Debug, Clone)]
pub struct BulletPool {
    nodes: NodePool,
    play_area: PlayArea,
}

impl BulletPool {
    /// Create a pool whose bullets live inside `play_area`
    pub fn new(initial_capacity: usize, play_area: PlayArea) -> Self {
        Self {
            nodes: NodePool::with_capacity(initial_capacity),
            play_area,
        }
    }

    /// Take a bullet and aim it
    ///
    /// Scale, angle, texture and velocity are reset on both paths; the
    /// position is not. A [`Acquired::Fresh`] bullet is enabled but detached,
    /// a [`Acquired::Reused`] one is still attached and still disabled.
    pub fn acquire(
        &mut self,
        graph: &mut SceneGraph<Arena>,
        texture: TextureHandle,
        angle: f32,
        speed: f32,
    ) -> Result<Acquired, SceneError> {
        let acquired = self.nodes.acquire(graph, |graph| graph.create(Node::new()));
        let id = acquired.id();
        let velocity = bullet_velocity(angle, speed);

        let node = graph.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        node.transform.scale = Vec2::new(1.0, 1.0);
        node.transform.angle = 0.0;
        node.texture = Some(texture);

        match graph.behavior_mut::<BulletMotion>(id) {
            Some(motion) => motion.velocity = velocity,
            None => graph.add_behavior(id, BulletMotion::new(velocity, self.play_area))?,
        }

        Ok(acquired)
    }

    /// Disable a bullet and put it on the free list
    pub fn retire(&mut self, id: NodeId, node: &mut Node) -> bool {
        self.nodes.retire(id, node)
    }

    /// Retire a bullet through the graph
    pub fn release(&mut self, graph: &mut SceneGraph<Arena>, id: NodeId) -> Result<bool, SceneError> {
        self.nodes.release(graph, id)
    }

    /// Total bullets ever created
    pub fn created(&self) -> u64 {
        self.nodes.created()
    }

    /// Bullets waiting for reuse
    pub fn free_len(&self) -> usize {
        self.nodes.free_len()
    }

    /// Current free list capacity
    pub fn free_capacity(&self) -> usize {
        self.nodes.free_capacity()
    }

    /// Every bullet ever created
    pub fn members(&self) -> &[NodeId] {
        self.nodes.members()
    }

    /// Bullets currently in flight
    pub fn live<'a>(&'a self, graph: &'a SceneGraph<Arena>) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes.live(graph)
    }
}
