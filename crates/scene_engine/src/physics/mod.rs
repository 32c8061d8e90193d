//! Physics module for collision detection
//!
//! Only overlap queries between axis-aligned rectangles; there is no
//! collision response.

pub mod collision;

pub use collision::{any_overlap, first_overlap, overlapping};
