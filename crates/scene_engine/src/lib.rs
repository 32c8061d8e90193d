//! # Scene Engine
//!
//! A 2D sprite engine built around a hierarchical scene graph.
//!
//! ## Features
//!
//! - **Scene Graph**: Nodes with local transforms resolved through their ancestors
//! - **Behaviors**: Per-node mutators run every update tick
//! - **Object Pooling**: LIFO reuse of retired nodes
//! - **Collision**: Axis-aligned rectangle overlap queries
//! - **Headless Platform**: Simulated clock, scripted input and a recording canvas
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! struct MyApp {
//!     graph: SceneGraph,
//!     root: Option<NodeId>,
//! }
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, textures: &mut TextureRegistry) -> Result<(), AppError> {
//!         let sprite = textures.register("sprite", 16, 16);
//!         let root = self.graph.create(Node::from_texture(sprite).with_position(Vec2::new(400.0, 300.0)));
//!         self.graph.add_behavior(root, ConstantSpin::new(1.0))?;
//!         self.root = Some(root);
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _input: &InputState, _textures: &TextureRegistry, delta_time: f32) -> Result<(), AppError> {
//!         if let Some(root) = self.root {
//!             self.graph.update(root, delta_time, &mut ());
//!         }
//!         Ok(())
//!     }
//!
//!     fn draw<S: SpriteSink>(&self, textures: &TextureRegistry, sink: &mut S) -> Result<(), AppError> {
//!         if let Some(root) = self.root {
//!             self.graph.draw(root, textures, sink);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(EngineConfig::default(), SystemClock::new(), ScriptedInput::new(), DrawQueue::new());
//!     let mut app = MyApp { graph: SceneGraph::new(), root: None };
//!     engine.run(&mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod platform;
pub mod pool;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineConfig, EngineError, FrameStats};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            collections::{NodeId, TextureHandle},
            math::{GlobalTransform, Rect, Transform2D, Vec2},
            time::Timer,
        },
        input::{InputEvent, InputState, KeyCode, ScriptedInput},
        physics::collision::{any_overlap, first_overlap},
        platform::{
            Canvas, Clock, DrawCommand, DrawQueue, InputSource, ManualClock, SpriteSink, SystemClock, TextureRegistry,
            TextureStore,
        },
        pool::{Acquired, NodePool},
        scene::{Behavior, BehaviorContext, ConstantSpin, Node, SceneError, SceneGraph},
        AppError, Application, Engine, EngineConfig, EngineError, FrameStats,
    };
}
