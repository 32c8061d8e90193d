//! Object pool for scene nodes
//!
//! Retired entities are disabled in place and their ids kept on a
//! last-in-first-out free list. Acquiring pops the most recently retired id;
//! only when the list is empty does the pool ask the caller to spawn a new
//! node.
//!
//! The two outcomes need different handling by the caller:
//!
//! - [`Acquired::Fresh`]: a brand-new node, enabled, not attached anywhere.
//!   Attach it to its parent exactly once.
//! - [`Acquired::Reused`]: still attached where it was, still disabled.
//!   Reset its state and set `enabled = true`; attaching it again would fail.
//!
//! Position is never touched by the pool.

use crate::foundation::collections::{FreeStack, NodeId};
use crate::scene::{Node, SceneError, SceneGraph};

/// Default free list capacity before the first growth
pub const DEFAULT_INITIAL_CAPACITY: usize = 2;

/// Result of [`NodePool::acquire`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquired {
    /// Newly spawned node
    Fresh(NodeId),
    /// Previously retired node popped from the free list
    Reused(NodeId),
}

impl Acquired {
    /// Node id regardless of origin
    pub fn id(self) -> NodeId {
        match self {
            Self::Fresh(id) | Self::Reused(id) => id,
        }
    }

    /// Check if the node was spawned by this call
    pub fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh(_))
    }
}

/// Free list of retired pooled nodes
#[derive(Debug, Clone)]
pub struct NodePool {
    free: FreeStack<NodeId>,
    members: Vec<NodeId>,
    created: u64,
}

impl Default for NodePool {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }
}

impl NodePool {
    /// Create a pool with the default initial capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool whose free list holds `capacity` ids before growing
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            free: FreeStack::with_capacity(capacity),
            members: Vec::new(),
            created: 0,
        }
    }

    /// Take the most recently retired node, or spawn one
    ///
    /// Ids whose node no longer exists are dropped from the free list.
    pub fn acquire<C: 'static>(
        &mut self,
        graph: &mut SceneGraph<C>,
        spawn: impl FnOnce(&mut SceneGraph<C>) -> NodeId,
    ) -> Acquired {
        while let Some(id) = self.free.pop() {
            if graph.contains(id) {
                return Acquired::Reused(id);
            }
            log::warn!("Dropping stale pooled node {:?}", id);
        }

        let id = spawn(graph);
        self.created += 1;
        self.members.push(id);
        if self.created.is_power_of_two() {
            log::debug!("Pool has created {} nodes", self.created);
        }
        Acquired::Fresh(id)
    }

    /// Disable a node and put it on the free list
    ///
    /// Takes the node directly so behaviors can retire the node they run on.
    /// Returns `false` without pushing if the node was already disabled.
    pub fn retire(&mut self, id: NodeId, node: &mut Node) -> bool {
        if !node.enabled {
            return false;
        }
        node.enabled = false;
        self.free.push(id);
        true
    }

    /// [`retire`](Self::retire) through the graph
    pub fn release<C: 'static>(&mut self, graph: &mut SceneGraph<C>, id: NodeId) -> Result<bool, SceneError> {
        let node = graph.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        Ok(self.retire(id, node))
    }

    /// Total nodes ever spawned by this pool
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Ids waiting on the free list
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Current free list capacity
    pub fn free_capacity(&self) -> usize {
        self.free.capacity()
    }

    /// Every node the pool spawned, in creation order
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Members that still exist and are enabled
    pub fn live<'a, C: 'static>(&'a self, graph: &'a SceneGraph<C>) -> impl Iterator<Item = NodeId> + 'a {
        self.members
            .iter()
            .copied()
            .filter(move |&id| graph.get(id).is_some_and(|node| node.enabled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use std::collections::HashSet;

    fn spawn_under(root: NodeId) -> impl FnOnce(&mut SceneGraph) -> NodeId {
        move |graph| graph.create_child(root, Node::new()).unwrap()
    }

    #[test]
    fn test_release_then_acquire_returns_same_node() {
        let mut graph: SceneGraph = SceneGraph::new();
        let root = graph.create(Node::new());
        let mut pool = NodePool::new();

        let id = pool.acquire(&mut graph, spawn_under(root)).id();
        graph.get_mut(id).unwrap().transform.position = Vec2::new(3.0, 4.0);
        assert!(pool.release(&mut graph, id).unwrap());

        let again = pool.acquire(&mut graph, |_| panic!("pool should reuse"));
        assert_eq!(again, Acquired::Reused(id));

        // Caller re-enables; the pool leaves enabled and position alone
        let node = graph.get(id).unwrap();
        assert!(!node.enabled);
        assert_eq!(node.position(), Vec2::new(3.0, 4.0));
        assert_eq!(pool.created(), 1);
    }

    #[test]
    fn test_reuse_is_lifo() {
        let mut graph: SceneGraph = SceneGraph::new();
        let root = graph.create(Node::new());
        let mut pool = NodePool::new();

        let a = pool.acquire(&mut graph, spawn_under(root)).id();
        let b = pool.acquire(&mut graph, spawn_under(root)).id();
        pool.release(&mut graph, a).unwrap();
        pool.release(&mut graph, b).unwrap();

        assert_eq!(pool.acquire(&mut graph, spawn_under(root)), Acquired::Reused(b));
        assert_eq!(pool.acquire(&mut graph, spawn_under(root)), Acquired::Reused(a));
        assert!(pool.acquire(&mut graph, spawn_under(root)).is_fresh());
    }

    #[test]
    fn test_growth_loses_nothing() {
        let mut graph: SceneGraph = SceneGraph::new();
        let root = graph.create(Node::new());
        let mut pool = NodePool::with_capacity(2);

        let ids: Vec<NodeId> = (0..9).map(|_| pool.acquire(&mut graph, spawn_under(root)).id()).collect();
        for &id in &ids {
            pool.release(&mut graph, id).unwrap();
        }

        assert_eq!(pool.free_len(), 9);
        assert_eq!(pool.free_capacity(), 16);

        let reused: HashSet<NodeId> = (0..9)
            .map(|_| match pool.acquire(&mut graph, spawn_under(root)) {
                Acquired::Reused(id) => id,
                Acquired::Fresh(_) => panic!("free list lost an entry"),
            })
            .collect();
        assert_eq!(reused, ids.iter().copied().collect());
        assert_eq!(pool.created(), 9);
    }

    #[test]
    fn test_double_release_is_ignored() {
        let mut graph: SceneGraph = SceneGraph::new();
        let mut pool = NodePool::new();
        let id = pool.acquire(&mut graph, |graph| graph.create(Node::new())).id();

        assert!(pool.release(&mut graph, id).unwrap());
        assert!(!pool.release(&mut graph, id).unwrap());
        assert_eq!(pool.free_len(), 1);
    }

    #[test]
    fn test_stale_ids_are_skipped() {
        let mut graph: SceneGraph = SceneGraph::new();
        let root = graph.create(Node::new());
        let mut pool = NodePool::new();

        let kept = pool.acquire(&mut graph, spawn_under(root)).id();
        let removed = pool.acquire(&mut graph, spawn_under(root)).id();
        pool.release(&mut graph, kept).unwrap();
        pool.release(&mut graph, removed).unwrap();
        graph.remove(removed);

        assert_eq!(pool.acquire(&mut graph, spawn_under(root)), Acquired::Reused(kept));
        assert!(pool.acquire(&mut graph, spawn_under(root)).is_fresh());
        assert_eq!(pool.release(&mut graph, removed), Err(SceneError::NodeNotFound(removed)));
    }

    #[test]
    fn test_live_skips_retired() {
        let mut graph: SceneGraph = SceneGraph::new();
        let root = graph.create(Node::new());
        let mut pool = NodePool::new();

        let a = pool.acquire(&mut graph, spawn_under(root)).id();
        let b = pool.acquire(&mut graph, spawn_under(root)).id();
        pool.release(&mut graph, a).unwrap();

        assert_eq!(pool.live(&graph).collect::<Vec<_>>(), vec![b]);
        assert_eq!(pool.members(), &[a, b]);
    }
}
