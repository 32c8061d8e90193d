//! Specialized collection types

pub use slotmap::{SecondaryMap, SlotMap};

slotmap::new_key_type! {
    /// Stable, generational reference to a node in a [`SceneGraph`](crate::scene::SceneGraph)
    ///
    /// A key outlives nothing: once the node is removed every copy of the key
    /// goes stale and lookups return `None`.
    pub struct NodeId;

    /// Handle to a texture owned by a [`TextureRegistry`](crate::platform::TextureRegistry)
    pub struct TextureHandle;
}

/// Last-in-first-out stack with explicit doubling growth
///
/// Used as the free list of object pools. When the stack is full its
/// capacity doubles; entries are never dropped or reordered by growth.
#[derive(Debug, Clone)]
pub struct FreeStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> FreeStack<T> {
    /// Create a stack able to hold `capacity` items before growing
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push an item on top, doubling the capacity first if the stack is full
    pub fn push(&mut self, item: T) {
        if self.items.len() >= self.capacity {
            let grown = self.capacity * 2;
            self.items.reserve_exact(grown - self.items.len());
            log::debug!("Free stack grew from {} to {} slots", self.capacity, grown);
            self.capacity = grown;
        }
        self.items.push(item);
    }

    /// Pop the most recently pushed item
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the stack holds nothing
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity (doubles on overflow)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate from bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for FreeStack<T> {
    fn default() -> Self {
        Self::with_capacity(2)
    }
}
