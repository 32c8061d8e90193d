//! Player ship

use scene_engine::foundation::collections::{NodeId, TextureHandle};
use scene_engine::foundation::math::Rect;
use scene_engine::physics::collision::any_overlap;
use scene_engine::platform::TextureStore;
use scene_engine::scene::{Node, SceneError, SceneGraph};

use crate::arena::Arena;
use crate::behaviors::ShipControl;
use crate::bullets::BulletPool;
use crate::config::ShipConfig;

/// Ship node plus the data the collision pass needs
#[derive(Debug, Clone)]
pub struct Ship {
    /// Ship node
    pub id: NodeId,
    /// Texture while not hit
    pub normal_texture: TextureHandle,
    /// Texture while hit
    pub hit_texture: TextureHandle,
    /// Collision rectangle relative to the ship position
    pub hit_box: Rect,
    hit: bool,
}

impl Ship {
    /// Create the ship node under `parent`
    pub fn spawn(
        graph: &mut SceneGraph<Arena>,
        parent: NodeId,
        config: &ShipConfig,
        normal_texture: TextureHandle,
        hit_texture: TextureHandle,
    ) -> Result<Self, SceneError> {
        let id = graph.create_child(parent, Node::from_texture(normal_texture).with_position(config.start))?;
        graph.add_behavior(id, ShipControl::new(config.speed))?;

        Ok(Self {
            id,
            normal_texture,
            hit_texture,
            hit_box: config.hit_box,
            hit: false,
        })
    }

    /// Hit box in world space, `None` if the ship node is gone
    pub fn world_hit_box(&self, graph: &SceneGraph<Arena>) -> Option<Rect> {
        let global = graph.resolve(self.id)?;
        Some(self.hit_box.translated(global.position))
    }

    /// Test the ship against every bullet in flight
    pub fn check_hits(&self, graph: &SceneGraph<Arena>, bullets: &BulletPool, textures: &impl TextureStore) -> bool {
        let Some(hit_box) = self.world_hit_box(graph) else {
            return false;
        };

        let bullet_rects: Vec<Rect> = bullets
            .members()
            .iter()
            .filter(|&&id| graph.is_active(id))
            .filter_map(|&id| graph.bounds(id, textures))
            .collect();

        any_overlap(&hit_box, &bullet_rects)
    }

    /// Record this frame's hit state and swap the texture to match
    pub fn set_hit(&mut self, graph: &mut SceneGraph<Arena>, hit: bool) {
        self.hit = hit;
        if let Some(node) = graph.get_mut(self.id) {
            node.texture = Some(if hit { self.hit_texture } else { self.normal_texture });
        }
    }

    /// Hit state of the last frame
    pub fn is_hit(&self) -> bool {
        self.hit
    }
}
