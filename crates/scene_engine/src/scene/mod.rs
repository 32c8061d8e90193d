//! Hierarchical 2D scene
//!
//! Nodes carry a local [`Transform2D`](crate::foundation::math::Transform2D),
//! an optional texture and an ordered child list. The [`SceneGraph`] arena
//! owns them and runs the per-frame update and draw walks:
//!
//! ```text
//! update(root, dt, state)          draw(root, textures, sink)
//!      |                                 |
//!  behaviors of each enabled node    resolve placement, submit DrawCommand
//!      |                                 |
//!  children, depth first             children, depth first
//! ```

mod behavior;
mod node;
mod scene_graph;

pub use behavior::{
    from_fn, AsAny, Behavior, BehaviorContext, ConstantSpin, DriftingSpin, FnBehavior, OscillationChannel,
    Oscillate, ScaleFromAngle,
};
pub use node::Node;
pub use scene_graph::{SceneError, SceneGraph, DEFAULT_MAX_SELF_CHILD_COUNT};
