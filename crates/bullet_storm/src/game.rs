//! Bullet storm game
//!
//! Scene layout:
//!
//! ```text
//! root (sprite, world origin)
//!  ├── ship (ShipControl)
//!  └── bullet * n (BulletMotion, pooled)
//! ```
//!
//! Per frame: fire a ring from the emitter, run the update traversal (bullets
//! fly and retire themselves, the ship moves), then test the ship against
//! every bullet still in flight and pick its texture.

use scene_engine::foundation::collections::{NodeId, TextureHandle};
use scene_engine::input::{InputState, KeyCode};
use scene_engine::platform::{SpriteSink, TextureRegistry};
use scene_engine::scene::{ConstantSpin, Node, SceneGraph};
use scene_engine::{AppError, Application};

use crate::arena::Arena;
use crate::config::{GameConfig, TextureSource};
use crate::emitter::Emitter;
use crate::ship::Ship;

/// Root spin in radians per second when enabled
const ROOT_SPIN_RATE: f32 = 1.0;
/// Spin of the root's first child when enabled
const FIRST_CHILD_SPIN_RATE: f32 = 1.1;

struct Scene {
    root: NodeId,
    ship: Ship,
    bullet_texture: TextureHandle,
}

/// The game application
pub struct BulletStorm {
    config: GameConfig,
    graph: SceneGraph<Arena>,
    arena: Arena,
    emitter: Emitter,
    scene: Option<Scene>,
    frame_hits: u64,
}

impl BulletStorm {
    /// Create the game; the scene is built in [`Application::initialize`]
    pub fn new(config: GameConfig) -> Self {
        Self {
            graph: SceneGraph::with_max_self_child_count(config.engine.max_self_child_count),
            arena: Arena::new(&config),
            emitter: Emitter::new(config.emitter),
            scene: None,
            frame_hits: 0,
            config,
        }
    }

    /// Scene graph
    pub fn graph(&self) -> &SceneGraph<Arena> {
        &self.graph
    }

    /// Mutable scene graph
    pub fn graph_mut(&mut self) -> &mut SceneGraph<Arena> {
        &mut self.graph
    }

    /// Behavior state, including the bullet pool
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Root node once initialized
    pub fn root(&self) -> Option<NodeId> {
        self.scene.as_ref().map(|scene| scene.root)
    }

    /// Player ship once initialized
    pub fn ship(&self) -> Option<&Ship> {
        self.scene.as_ref().map(|scene| &scene.ship)
    }

    /// Texture used for bullets once initialized
    pub fn bullet_texture(&self) -> Option<TextureHandle> {
        self.scene.as_ref().map(|scene| scene.bullet_texture)
    }

    /// Number of frames the ship spent hit
    pub fn frame_hits(&self) -> u64 {
        self.frame_hits
    }

    fn load(textures: &mut TextureRegistry, source: &TextureSource) -> TextureHandle {
        textures.load_or_register(&source.path, source.fallback_size)
    }
}

impl Application for BulletStorm {
    fn initialize(&mut self, textures: &mut TextureRegistry) -> Result<(), AppError> {
        let sprite = Self::load(textures, &self.config.textures.sprite);
        let bullet_texture = Self::load(textures, &self.config.textures.bullet);
        let ship_texture = Self::load(textures, &self.config.textures.ship);
        let ship_hit_texture = Self::load(textures, &self.config.textures.ship_hit);

        let root = self.graph.create(Node::from_texture(sprite));
        let ship = Ship::spawn(&mut self.graph, root, &self.config.ship, ship_texture, ship_hit_texture)?;

        if self.config.spin_root {
            self.graph.add_behavior(root, ConstantSpin::new(ROOT_SPIN_RATE))?;
            self.graph.add_behavior(ship.id, ConstantSpin::new(FIRST_CHILD_SPIN_RATE))?;
        }

        log::info!("Scene ready: {} nodes", self.graph.len());
        self.scene = Some(Scene {
            root,
            ship,
            bullet_texture,
        });
        Ok(())
    }

    fn update(&mut self, input: &InputState, textures: &TextureRegistry, delta_time: f32) -> Result<(), AppError> {
        let scene = self
            .scene
            .as_mut()
            .ok_or_else(|| AppError::Custom("update before initialize".to_string()))?;

        self.arena.input = *input;
        self.emitter.emit(delta_time, &mut self.graph, &mut self.arena, scene.root, scene.bullet_texture)?;
        self.graph.update(scene.root, delta_time, &mut self.arena);

        let hit = scene.ship.check_hits(&self.graph, &self.arena.bullets, textures);
        if hit {
            self.frame_hits += 1;
        }
        scene.ship.set_hit(&mut self.graph, hit || input.is_held(KeyCode::Space));
        Ok(())
    }

    fn draw<S: SpriteSink>(&self, textures: &TextureRegistry, sink: &mut S) -> Result<(), AppError> {
        if let Some(scene) = &self.scene {
            self.graph.draw(scene.root, textures, sink);
        }
        Ok(())
    }

    fn status(&self) -> String {
        format!("particle count {}", self.arena.bullets.created())
    }

    fn cleanup(&mut self) {
        log::info!(
            "Bullet storm finished: {} bullets created, ship hit on {} frames",
            self.arena.bullets.created(),
            self.frame_hits
        );
    }
}
