//! Math utilities and types
//!
//! Provides the 2D math used by the scene graph: vectors, local and resolved
//! transforms, and axis-aligned rectangles.

use serde::{Deserialize, Serialize};

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Rotate a vector counter-clockwise by `angle` radians
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Normalize a vector, returning the zero vector when it has no length
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vec2::zeros)
}

/// Local placement of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Offset from the parent's origin, in the parent's space
    pub position: Vec2,

    /// Non-uniform scale factors
    pub scale: Vec2,

    /// Rotation in radians
    pub angle: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            angle: 0.0,
        }
    }
}

impl Transform2D {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::new(scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set rotation in radians
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }
}

/// Fully resolved (world space) placement of a node
///
/// Produced by folding every ancestor's [`Transform2D`] into the root's
/// placement with [`GlobalTransform::propagate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalTransform {
    /// World scale
    pub scale: Vec2,

    /// World position
    pub position: Vec2,

    /// World rotation in radians
    pub angle: f32,
}

impl Default for GlobalTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl GlobalTransform {
    /// Placement of the world origin
    pub fn identity() -> Self {
        Self {
            scale: Vec2::new(1.0, 1.0),
            position: Vec2::zeros(),
            angle: 0.0,
        }
    }

    /// Identity placement moved to `position`
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Fold a child's local transform into this (already resolved) parent
    ///
    /// The child's offset is rotated by the parent angle, then scaled by the
    /// parent scale. Scales multiply component-wise and angles add.
    pub fn propagate(&self, local: &Transform2D) -> GlobalTransform {
        let offset = rotate(local.position, self.angle).component_mul(&self.scale);

        GlobalTransform {
            scale: self.scale.component_mul(&local.scale),
            position: self.position + offset,
            angle: self.angle + local.angle,
        }
    }

    /// Rotation in degrees, as expected by sprite renderers
    pub fn angle_degrees(&self) -> f32 {
        utils::rad_to_deg(self.angle)
    }
}

/// Axis-aligned rectangle with a top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x * 0.5,
            y: center.y - size.y * 0.5,
            w: size.x,
            h: size.y,
        }
    }

    /// Same rectangle moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// A rectangle with no area never intersects anything
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Check if this rectangle overlaps another
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_propagate_identity_local_applies_scale_only() {
        let parent = GlobalTransform {
            scale: Vec2::new(2.0, 3.0),
            position: Vec2::new(10.0, -4.0),
            angle: 0.7,
        };
        let local = Transform2D::identity().with_scale(Vec2::new(0.5, 2.0));

        let resolved = parent.propagate(&local);

        assert_relative_eq!(resolved.position, parent.position, epsilon = EPSILON);
        assert_relative_eq!(resolved.angle, parent.angle, epsilon = EPSILON);
        assert_relative_eq!(resolved.scale, Vec2::new(1.0, 6.0), epsilon = EPSILON);
    }

    #[test]
    fn test_chained_translations_add() {
        let a = Transform2D::from_position(Vec2::new(3.0, 4.0));
        let b = Transform2D::from_position(Vec2::new(-1.0, 7.5));

        let resolved = GlobalTransform::identity().propagate(&a).propagate(&b);

        assert_relative_eq!(resolved.position, Vec2::new(2.0, 11.5), epsilon = EPSILON);
        assert_relative_eq!(resolved.scale, Vec2::new(1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_propagate_rotates_then_scales_offset() {
        let parent = GlobalTransform {
            scale: Vec2::new(2.0, 1.0),
            position: Vec2::new(100.0, 100.0),
            angle: constants::PI * 0.5,
        };
        let local = Transform2D::from_position(Vec2::new(10.0, 0.0)).with_angle(0.25);

        let resolved = parent.propagate(&local);

        // (10, 0) rotated a quarter turn is (0, 10); x scale does not touch it
        assert_relative_eq!(resolved.position, Vec2::new(100.0, 110.0), epsilon = 1e-4);
        assert_relative_eq!(resolved.angle, constants::PI * 0.5 + 0.25, epsilon = EPSILON);
    }

    #[test]
    fn test_propagate_is_associative_over_levels() {
        let root = GlobalTransform::at(Vec2::new(400.0, 300.0));
        let a = Transform2D::from_position(Vec2::new(50.0, 0.0)).with_angle(0.3).with_uniform_scale(0.9);
        let b = Transform2D::from_position(Vec2::new(0.0, 50.0)).with_angle(-1.1).with_scale(Vec2::new(1.5, 0.5));
        let c = Transform2D::from_position(Vec2::new(-20.0, 5.0));

        let step_by_step = root.propagate(&a).propagate(&b).propagate(&c);
        let cached_middle = root.propagate(&a).propagate(&b);
        let from_cache = cached_middle.propagate(&c);

        assert_relative_eq!(step_by_step.position, from_cache.position, epsilon = 1e-3);
        assert_relative_eq!(step_by_step.scale, from_cache.scale, epsilon = EPSILON);
        assert_relative_eq!(step_by_step.angle, from_cache.angle, epsilon = EPSILON);
    }

    #[test]
    fn test_rect_intersects() {
        let hit_box = Rect::new(395.0, 495.0, 10.0, 10.0);

        assert!(hit_box.intersects(&Rect::new(397.0, 497.0, 4.0, 4.0)));
        assert!(hit_box.intersects(&Rect::new(390.0, 490.0, 8.0, 8.0)));
        assert!(!hit_box.intersects(&Rect::new(0.0, 0.0, 5.0, 5.0)));
        // Touching edges only
        assert!(!hit_box.intersects(&Rect::new(405.0, 495.0, 10.0, 10.0)));
        // Empty rectangles
        assert!(!hit_box.intersects(&Rect::new(400.0, 500.0, 0.0, 3.0)));
    }

    #[test]
    fn test_rect_centered() {
        let rect = Rect::centered(Vec2::new(400.0, 300.0), Vec2::new(16.0, 8.0));

        assert_eq!(rect, Rect::new(392.0, 296.0, 16.0, 8.0));
        assert_relative_eq!(rect.center(), Vec2::new(400.0, 300.0), epsilon = EPSILON);
    }

    #[test]
    fn test_normalize_or_zero() {
        assert_eq!(normalize_or_zero(Vec2::zeros()), Vec2::zeros());
        assert_relative_eq!(normalize_or_zero(Vec2::new(1.0, 1.0)).norm(), 1.0, epsilon = EPSILON);
    }
}
