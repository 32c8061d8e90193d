//! Node arena and traversals
//!
//! The graph owns every node in a slot map and the behaviors attached to
//! them in a secondary map keyed by the same [`NodeId`]. Two depth-first
//! pre-order walks run over it each frame:
//!
//! - [`SceneGraph::update`] invokes every enabled node's behaviors.
//! - [`SceneGraph::draw`] resolves each enabled node's world placement and
//!   submits a [`DrawCommand`] for textured nodes.
//!
//! A node may list itself as its own child. Both walks count consecutive
//! self edges and stop descending once the count reaches
//! [`SceneGraph::max_self_child_count`]; the count resets on every edge to a
//! distinct child. There is no general cycle detection: `add_child` refuses
//! edges that would create a cycle among distinct nodes instead.

use crate::foundation::collections::{NodeId, SecondaryMap, SlotMap};
use crate::foundation::math::{GlobalTransform, Rect, Vec2};
use crate::platform::{DrawCommand, SpriteSink, TextureStore};

use super::behavior::{Behavior, BehaviorContext};
use super::Node;

/// How many nested times a node may be processed as its own child
pub const DEFAULT_MAX_SELF_CHILD_COUNT: u32 = 50;

/// Scene graph errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not refer to a live node
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// The child is already owned by another node
    #[error("Node {child:?} already has parent {parent:?}")]
    AlreadyParented {
        /// Child that was being attached
        child: NodeId,
        /// Its current parent
        parent: NodeId,
    },

    /// The child is an ancestor of the requested parent
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// Requested parent
        parent: NodeId,
        /// Requested child
        child: NodeId,
    },
}

/// Hierarchical sprite scene
///
/// `C` is the application state handed to behaviors during
/// [`update`](Self::update).
pub struct SceneGraph<C = ()> {
    nodes: SlotMap<NodeId, Node>,
    behaviors: SecondaryMap<NodeId, Vec<Box<dyn Behavior<C>>>>,
    max_self_child_count: u32,
}

impl<C: 'static> Default for SceneGraph<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> SceneGraph<C> {
    /// Create an empty graph with the default self-loop bound
    pub fn new() -> Self {
        Self::with_max_self_child_count(DEFAULT_MAX_SELF_CHILD_COUNT)
    }

    /// Create an empty graph with a custom self-loop bound
    pub fn with_max_self_child_count(max_self_child_count: u32) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            behaviors: SecondaryMap::new(),
            max_self_child_count,
        }
    }

    /// Self-loop recursion bound
    pub fn max_self_child_count(&self) -> u32 {
        self.max_self_child_count
    }

    /// Insert a detached node
    pub fn create(&mut self, mut node: Node) -> NodeId {
        node.children.clear();
        node.parent = None;
        self.nodes.insert(node)
    }

    /// Insert a node and attach it under `parent`
    pub fn create_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        let id = self.create(node);
        self.add_child(parent, id)?;
        Ok(id)
    }

    /// Append `child` to `parent`'s children
    ///
    /// `parent == child` records a self edge and leaves the parent link
    /// untouched. Otherwise the child must be detached and must not be an
    /// ancestor of `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        let current_parent = self.nodes.get(child).ok_or(SceneError::NodeNotFound(child))?.parent;
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }

        if parent != child {
            if let Some(owner) = current_parent {
                return Err(SceneError::AlreadyParented { child, parent: owner });
            }
            if self.ancestors(parent).any(|ancestor| ancestor == child) {
                return Err(SceneError::WouldCycle { parent, child });
            }
            self.nodes[child].parent = Some(parent);
        }

        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Remove `child` from its parent's children, keeping the node alive
    pub fn detach(&mut self, child: NodeId) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(child).ok_or(SceneError::NodeNotFound(child))?;
        if let Some(parent) = node.parent.take() {
            if let Some(parent) = self.nodes.get_mut(parent) {
                parent.children.retain(|&id| id != child);
            }
        }
        Ok(())
    }

    /// Remove a node and its whole subtree; returns how many nodes were freed
    ///
    /// Ids held elsewhere (e.g. in a pool) go stale.
    pub fn remove(&mut self, id: NodeId) -> usize {
        if self.detach(id).is_err() {
            return 0;
        }
        self.remove_subtree(id)
    }

    fn remove_subtree(&mut self, id: NodeId) -> usize {
        let Some(node) = self.nodes.remove(id) else {
            return 0;
        };
        self.behaviors.remove(id);

        1 + node
            .children
            .into_iter()
            .filter(|&child| child != id)
            .map(|child| self.remove_subtree(child))
            .sum::<usize>()
    }

    /// Attach a behavior; it runs after the ones already attached
    pub fn add_behavior<B>(&mut self, id: NodeId, behavior: B) -> Result<(), SceneError>
    where
        B: Behavior<C>,
    {
        if !self.nodes.contains_key(id) {
            return Err(SceneError::NodeNotFound(id));
        }
        match self.behaviors.get_mut(id) {
            Some(list) => list.push(Box::new(behavior)),
            None => {
                self.behaviors.insert(id, vec![Box::new(behavior)]);
            }
        }
        Ok(())
    }

    /// Number of behaviors attached to a node
    pub fn behavior_count(&self, id: NodeId) -> usize {
        self.behaviors.get(id).map_or(0, Vec::len)
    }

    /// First attached behavior of concrete type `T`
    pub fn behavior_mut<T>(&mut self, id: NodeId) -> Option<&mut T>
    where
        T: Behavior<C>,
    {
        self.behaviors
            .get_mut(id)?
            .iter_mut()
            .find_map(|behavior| behavior.as_mut().as_any_mut().downcast_mut::<T>())
    }

    /// Shared access to a node
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable access to a node
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Check if the id refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk parent links upward, starting with `id`'s parent
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.get(id).and_then(|node| node.parent), move |&current| {
            self.nodes.get(current).and_then(|node| node.parent)
        })
    }

    /// A node is active when it and every ancestor are enabled
    pub fn is_active(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.enabled)
            && self.ancestors(id).all(|ancestor| self.nodes[ancestor].enabled)
    }

    /// World placement of a node, folding the chain from its root down
    pub fn resolve(&self, id: NodeId) -> Option<GlobalTransform> {
        let node = self.nodes.get(id)?;
        let mut chain: Vec<NodeId> = self.ancestors(id).collect();
        chain.reverse();

        let parent = chain
            .into_iter()
            .fold(GlobalTransform::identity(), |global, ancestor| {
                global.propagate(&self.nodes[ancestor].transform)
            });
        Some(parent.propagate(&node.transform))
    }

    /// World-space rectangle covered by a node's texture
    pub fn bounds(&self, id: NodeId, textures: &impl TextureStore) -> Option<Rect> {
        let texture = self.nodes.get(id)?.texture?;
        let (width, height) = textures.texture_size(texture)?;
        let global = self.resolve(id)?;
        Some(sprite_rect(&global, width, height))
    }

    /// Run every enabled node's behaviors, depth first from `root`
    ///
    /// `root` is placed relative to the world origin.
    pub fn update(&mut self, root: NodeId, delta_time: f32, state: &mut C) {
        self.update_from(root, GlobalTransform::identity(), delta_time, state);
    }

    /// Like [`update`](Self::update), with `root` placed relative to `origin`
    ///
    /// Behaviors see the placement their parent resolves to after the
    /// parent's own behaviors ran, which is also what the next draw uses.
    pub fn update_from(&mut self, root: NodeId, origin: GlobalTransform, delta_time: f32, state: &mut C) {
        self.update_node(root, None, origin, 0, delta_time, state);
    }

    fn update_node(
        &mut self,
        id: NodeId,
        parent: Option<NodeId>,
        parent_global: GlobalTransform,
        loop_count: u32,
        delta_time: f32,
        state: &mut C,
    ) {
        let Some(node) = self.nodes.get_mut(id) else {
            log::warn!("Update reached missing node {:?}", id);
            return;
        };
        if !node.enabled || loop_count >= self.max_self_child_count {
            return;
        }

        if let Some(behaviors) = self.behaviors.get_mut(id) {
            let mut ctx = BehaviorContext {
                id,
                delta_time,
                parent: parent_global,
                state: &mut *state,
            };
            for behavior in behaviors.iter_mut() {
                behavior.apply(node, &mut ctx);
            }
        }

        let global = parent_global.propagate(&node.transform);

        let child_loop_count = if parent == Some(id) { loop_count + 1 } else { 0 };
        let mut index = 0;
        while let Some(child) = self.child_at(id, index) {
            self.update_node(child, Some(id), global, child_loop_count, delta_time, state);
            index += 1;
        }
    }

    /// Submit draw commands for every enabled, textured node under `root`
    ///
    /// `root` is placed relative to the world origin. Returns the number of
    /// commands submitted.
    pub fn draw(&self, root: NodeId, textures: &impl TextureStore, sink: &mut impl SpriteSink) -> usize {
        self.draw_from(root, GlobalTransform::identity(), textures, sink)
    }

    /// Like [`draw`](Self::draw), with `root` placed relative to `origin`
    pub fn draw_from(
        &self,
        root: NodeId,
        origin: GlobalTransform,
        textures: &impl TextureStore,
        sink: &mut impl SpriteSink,
    ) -> usize {
        let mut submitted = 0;
        self.draw_node(root, None, origin, 0, textures, sink, &mut submitted);
        submitted
    }

    fn draw_node(
        &self,
        id: NodeId,
        parent: Option<NodeId>,
        parent_global: GlobalTransform,
        loop_count: u32,
        textures: &impl TextureStore,
        sink: &mut impl SpriteSink,
        submitted: &mut usize,
    ) {
        let Some(node) = self.nodes.get(id) else {
            log::warn!("Draw reached missing node {:?}", id);
            return;
        };
        if !node.enabled || loop_count >= self.max_self_child_count {
            return;
        }

        let global = parent_global.propagate(&node.transform);

        if let Some(texture) = node.texture {
            match textures.texture_size(texture) {
                Some((width, height)) => {
                    let command = DrawCommand {
                        texture,
                        dest: sprite_rect(&global, width, height),
                        rotation_degrees: global.angle_degrees(),
                    };
                    log::trace!("Draw {:?} at {:?}", texture, command.dest);
                    sink.submit(command);
                    *submitted += 1;
                }
                None => log::warn!("Node {:?} uses unknown texture {:?}", id, texture),
            }
        }

        let child_loop_count = if parent == Some(id) { loop_count + 1 } else { 0 };
        for &child in &node.children {
            self.draw_node(child, Some(id), global, child_loop_count, textures, sink, submitted);
        }
    }

    fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.nodes.get(id)?.children.get(index).copied()
    }
}

/// Texture rectangle scaled by the resolved scale and centered on the resolved position
fn sprite_rect(global: &GlobalTransform, width: u32, height: u32) -> Rect {
    let size = Vec2::new(width as f32, height as f32).component_mul(&global.scale);
    Rect::centered(global.position, size)
}
