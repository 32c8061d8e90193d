//! Scene graph node
//!
//! Pure data: local placement, optional texture, child links and the enabled
//! flag. Behaviors live next to the node inside the owning
//! [`SceneGraph`](super::SceneGraph).

use crate::foundation::collections::{NodeId, TextureHandle};
use crate::foundation::math::{Transform2D, Vec2};

/// Hierarchy entity
#[derive(Debug, Clone)]
pub struct Node {
    /// Placement relative to the parent
    pub transform: Transform2D,

    /// Sprite drawn at the resolved placement; `None` for grouping nodes
    pub texture: Option<TextureHandle>,

    /// Disabled nodes and their whole subtree are skipped by every traversal
    pub enabled: bool,

    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            transform: Transform2D::identity(),
            texture: None,
            enabled: true,
            children: Vec::new(),
            parent: None,
        }
    }
}

impl Node {
    /// Create an enabled grouping node at the parent's origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an enabled node drawing `texture`
    pub fn from_texture(texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
            ..Default::default()
        }
    }

    /// Builder pattern: Set texture
    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Builder pattern: Set local transform
    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.transform = transform;
        self
    }

    /// Builder pattern: Set local position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    /// Builder pattern: Set uniform local scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.transform.scale = Vec2::new(scale, scale);
        self
    }

    /// Builder pattern: Set local rotation in radians
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.transform.angle = angle;
        self
    }

    /// Builder pattern: Start disabled
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Local position shortcut
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Children in traversal order (may contain this node's own id)
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Owning parent, if attached
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}
