//! Game behaviors

use scene_engine::foundation::math::Vec2;
use scene_engine::scene::{Behavior, BehaviorContext, Node};

use crate::arena::Arena;
use crate::config::PlayArea;

/// Straight-line bullet flight
///
/// Moves the node by `velocity * dt` and retires it into the arena's bullet
/// pool as soon as its resolved position leaves the play area.
#[derive(Debug, Clone, Copy)]
pub struct BulletMotion {
    /// Pixels per second
    pub velocity: Vec2,
    /// Where the bullet may live
    pub play_area: PlayArea,
}

impl BulletMotion {
    /// Create a new motion
    pub fn new(velocity: Vec2, play_area: PlayArea) -> Self {
        Self { velocity, play_area }
    }
}

impl Behavior<Arena> for BulletMotion {
    fn apply(&mut self, node: &mut Node, ctx: &mut BehaviorContext<'_, Arena>) {
        node.transform.position += self.velocity * ctx.delta_time;

        if !self.play_area.contains(ctx.resolve(node).position) {
            ctx.state.bullets.retire(ctx.id, node);
        }
    }
}

/// Arrow-key movement at a fixed speed
#[derive(Debug, Clone, Copy)]
pub struct ShipControl {
    /// Pixels per second
    pub speed: f32,
}

impl ShipControl {
    /// Create a new controller
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

impl Behavior<Arena> for ShipControl {
    fn apply(&mut self, node: &mut Node, ctx: &mut BehaviorContext<'_, Arena>) {
        let direction = ctx.state.input.direction();
        node.transform.position += direction * self.speed * ctx.delta_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use approx::assert_relative_eq;
    use scene_engine::foundation::collections::NodeId;
    use scene_engine::foundation::math::GlobalTransform;
    use scene_engine::input::{InputEvent, KeyCode};

    fn apply_under(
        behavior: &mut impl Behavior<Arena>,
        parent: GlobalTransform,
        node: &mut Node,
        arena: &mut Arena,
        delta_time: f32,
    ) {
        let mut ctx = BehaviorContext {
            id: NodeId::default(),
            delta_time,
            parent,
            state: arena,
        };
        behavior.apply(node, &mut ctx);
    }

    fn apply(behavior: &mut impl Behavior<Arena>, node: &mut Node, arena: &mut Arena, delta_time: f32) {
        apply_under(behavior, GlobalTransform::identity(), node, arena, delta_time);
    }

    #[test]
    fn test_bullet_moves_by_velocity() {
        let mut arena = Arena::new(&GameConfig::default());
        let mut node = Node::new().with_position(Vec2::new(400.0, 300.0));
        let mut motion = BulletMotion::new(Vec2::new(100.0, -50.0), PlayArea::default());

        apply(&mut motion, &mut node, &mut arena, 0.5);

        assert_relative_eq!(node.position(), Vec2::new(450.0, 275.0));
        assert!(node.enabled);
        assert_eq!(arena.bullets.free_len(), 0);
    }

    #[test]
    fn test_bullet_retires_past_bottom_edge() {
        let mut arena = Arena::new(&GameConfig::default());
        let mut node = Node::new().with_position(Vec2::new(400.0, 589.0));
        let mut motion = BulletMotion::new(Vec2::new(0.0, 100.0), PlayArea::default());

        apply(&mut motion, &mut node, &mut arena, 0.03);

        assert!(!node.enabled);
        assert_eq!(arena.bullets.free_len(), 1);
    }

    #[test]
    fn test_bullet_bounds_use_resolved_position() {
        let mut arena = Arena::new(&GameConfig::default());
        let turned = GlobalTransform {
            angle: std::f32::consts::PI,
            ..GlobalTransform::identity()
        };

        // Inside locally, mirrored through the origin by the parent
        let mut node = Node::new().with_position(Vec2::new(400.0, 300.0));
        apply_under(&mut BulletMotion::new(Vec2::zeros(), PlayArea::default()), turned, &mut node, &mut arena, 0.03);
        assert!(!node.enabled);
        assert_eq!(arena.bullets.free_len(), 1);

        // Outside locally, brought back on screen by the parent
        let shifted = GlobalTransform::at(Vec2::new(500.0, 400.0));
        let mut node = Node::new().with_position(Vec2::new(-100.0, -100.0));
        apply_under(&mut BulletMotion::new(Vec2::zeros(), PlayArea::default()), shifted, &mut node, &mut arena, 0.03);
        assert!(node.enabled);
        assert_eq!(arena.bullets.free_len(), 1);
    }

    #[test]
    fn test_ship_follows_arrows() {
        let mut arena = Arena::new(&GameConfig::default());
        arena.input.handle_event(InputEvent::KeyDown(KeyCode::Left));
        let mut node = Node::new().with_position(Vec2::new(400.0, 500.0));

        apply(&mut ShipControl::new(200.0), &mut node, &mut arena, 0.5);

        assert_relative_eq!(node.position(), Vec2::new(300.0, 500.0));
    }

    #[test]
    fn test_ship_idle_without_input() {
        let mut arena = Arena::new(&GameConfig::default());
        let mut node = Node::new().with_position(Vec2::new(400.0, 500.0));

        apply(&mut ShipControl::new(200.0), &mut node, &mut arena, 1.0);

        assert_eq!(node.position(), Vec2::new(400.0, 500.0));
    }
}
