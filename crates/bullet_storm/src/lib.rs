//! # Bullet Storm
//!
//! A bullet-hell toy on top of `scene_engine`: an orbiting emitter fires a
//! ring of pooled bullets every frame while an arrow-key ship dodges them.
//! The crate also carries the "arms" hierarchy demo.

#![warn(missing_docs)]

pub mod arena;
pub mod arms;
pub mod behaviors;
pub mod bullets;
pub mod config;
pub mod emitter;
pub mod game;
pub mod runner;
pub mod ship;

pub use arena::Arena;
pub use arms::{ArmsConfig, ArmsDemo};
pub use config::GameConfig;
pub use game::BulletStorm;
pub use runner::{run_headless, ClockMode, GameError};
