//! Per-node behaviors
//!
//! A behavior is a mutator attached to a node and invoked once per update
//! tick, in registration order, with the node itself and a
//! [`BehaviorContext`]. The context carries the tick's delta time, the
//! parent's resolved placement and a mutable borrow of the application state
//! `C` threaded through [`SceneGraph::update`](super::SceneGraph::update),
//! which is how a behavior reaches shared resources such as an object pool.
//!
//! Behaviors only ever see their own node. Structural edits (adding
//! children, attaching behaviors) go through the graph outside the update
//! traversal.

use std::any::Any;

use crate::foundation::collections::NodeId;
use crate::foundation::math::{GlobalTransform, Vec2};

use super::Node;

/// Upcast to [`Any`] for concrete-type lookups on boxed behaviors
pub trait AsAny: Any {
    /// Shared upcast
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Data handed to a behavior on each invocation
pub struct BehaviorContext<'a, C> {
    /// Node the behavior is attached to
    pub id: NodeId,

    /// Seconds since the previous tick
    pub delta_time: f32,

    /// Resolved placement of the node's parent, after the parent's own
    /// behaviors ran this tick
    pub parent: GlobalTransform,

    /// Application state passed to the update traversal
    pub state: &'a mut C,
}

impl<C> BehaviorContext<'_, C> {
    /// World placement of `node` at its current local transform
    pub fn resolve(&self, node: &Node) -> GlobalTransform {
        self.parent.propagate(&node.transform)
    }
}

/// Per-tick node mutator
pub trait Behavior<C>: AsAny {
    /// Mutate `node` for this tick
    fn apply(&mut self, node: &mut Node, ctx: &mut BehaviorContext<'_, C>);
}

/// Behavior backed by a closure, see [`from_fn`]
pub struct FnBehavior<F>(F);

/// Wrap a closure as a behavior
pub fn from_fn<C, F>(f: F) -> FnBehavior<F>
where
    F: FnMut(&mut Node, &mut BehaviorContext<'_, C>) + 'static,
{
    FnBehavior(f)
}

impl<C, F> Behavior<C> for FnBehavior<F>
where
    F: FnMut(&mut Node, &mut BehaviorContext<'_, C>) + 'static,
{
    fn apply(&mut self, node: &mut Node, ctx: &mut BehaviorContext<'_, C>) {
        (self.0)(node, ctx);
    }
}

/// Constant angular drift
#[derive(Debug, Clone, Copy)]
pub struct ConstantSpin {
    /// Rotation speed
    pub radians_per_second: f32,
}

impl ConstantSpin {
    /// Spin at `radians_per_second`
    pub fn new(radians_per_second: f32) -> Self {
        Self { radians_per_second }
    }
}

impl<C> Behavior<C> for ConstantSpin {
    fn apply(&mut self, node: &mut Node, ctx: &mut BehaviorContext<'_, C>) {
        node.transform.angle += self.radians_per_second * ctx.delta_time;
    }
}

/// Slowly accelerating wobble
///
/// The phase grows by a fixed step every tick regardless of delta time, and
/// the node turns by `sin(phase) * amplitude`. Each instance keeps its own
/// phase.
#[derive(Debug, Clone, Copy)]
pub struct DriftingSpin {
    /// Current phase
    pub phase: f32,
    /// Phase added per tick
    pub phase_step: f32,
    /// Largest rotation applied in one tick
    pub amplitude: f32,
}

impl Default for DriftingSpin {
    fn default() -> Self {
        Self {
            phase: 0.01,
            phase_step: 0.0001,
            amplitude: 0.05,
        }
    }
}

impl<C> Behavior<C> for DriftingSpin {
    fn apply(&mut self, node: &mut Node, _ctx: &mut BehaviorContext<'_, C>) {
        self.phase += self.phase_step;
        node.transform.angle += self.phase.sin() * self.amplitude;
    }
}

/// What an [`Oscillate`] behavior drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillationChannel {
    /// Local x position
    PositionX,
    /// Local y position
    PositionY,
    /// Uniform local scale
    Scale,
}

/// Phase-driven oscillation: `value = base + amplitude * sin(phase)`
#[derive(Debug, Clone, Copy)]
pub struct Oscillate {
    /// Driven value
    pub channel: OscillationChannel,
    /// Value at zero phase
    pub base: f32,
    /// Peak deviation from `base`
    pub amplitude: f32,
    /// Phase speed in radians per second
    pub rate: f32,
    /// Accumulated phase
    pub phase: f32,
}

impl Oscillate {
    /// Oscillate `channel` around `base`
    pub fn new(channel: OscillationChannel, base: f32, amplitude: f32, rate: f32) -> Self {
        Self {
            channel,
            base,
            amplitude,
            rate,
            phase: 0.0,
        }
    }
}

impl<C> Behavior<C> for Oscillate {
    fn apply(&mut self, node: &mut Node, ctx: &mut BehaviorContext<'_, C>) {
        self.phase += self.rate * ctx.delta_time;
        let value = self.base + self.amplitude * self.phase.sin();

        match self.channel {
            OscillationChannel::PositionX => node.transform.position.x = value,
            OscillationChannel::PositionY => node.transform.position.y = value,
            OscillationChannel::Scale => node.transform.scale = Vec2::new(value, value),
        }
    }
}

/// Pulses scale with the node's own rotation: `scale = 1 + cos(angle) * amplitude`
#[derive(Debug, Clone, Copy)]
pub struct ScaleFromAngle {
    /// Peak deviation from unit scale
    pub amplitude: f32,
}

impl Default for ScaleFromAngle {
    fn default() -> Self {
        Self { amplitude: 0.1 }
    }
}

impl<C> Behavior<C> for ScaleFromAngle {
    fn apply(&mut self, node: &mut Node, _ctx: &mut BehaviorContext<'_, C>) {
        let scale = 1.0 + node.transform.angle.cos() * self.amplitude;
        node.transform.scale = Vec2::new(scale, scale);
    }
}
