//! Spinning arms demo
//!
//! A root sprite with four chains of children reaching right, left, down and
//! up. Each link is offset 50 px from its parent, a little smaller than the
//! previous one, and wobbles with its own [`DriftingSpin`]; the rotations
//! compound down each chain. Optionally the root lists itself as a child,
//! which exercises the self-loop guard every frame.

use scene_engine::foundation::collections::{NodeId, TextureHandle};
use scene_engine::foundation::math::{GlobalTransform, Vec2};
use scene_engine::input::InputState;
use scene_engine::platform::{SpriteSink, TextureRegistry};
use scene_engine::scene::{DriftingSpin, Node, SceneError, SceneGraph};
use scene_engine::{AppError, Application};

/// Total links across all arms
pub const LINK_COUNT: usize = 52;

/// Distance between consecutive links
pub const LINK_OFFSET: f32 = 50.0;

const ARM_DIRECTIONS: [(f32, f32); 4] = [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)];

/// Arms demo settings
#[derive(Debug, Clone)]
pub struct ArmsConfig {
    /// Where the root is drawn
    pub origin: Vec2,
    /// Sprite image path
    pub sprite_path: String,
    /// Sprite size if the image cannot be read
    pub fallback_size: (u32, u32),
    /// Add the root as its own child
    pub self_loop: bool,
    /// Self-loop recursion bound
    pub max_self_child_count: u32,
}

impl Default for ArmsConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::new(400.0, 300.0),
            sprite_path: "assets/sprite.png".to_string(),
            fallback_size: (16, 16),
            self_loop: false,
            max_self_child_count: scene_engine::scene::DEFAULT_MAX_SELF_CHILD_COUNT,
        }
    }
}

/// Build the arms under `root`; returns every link in creation order
pub fn build_arms<C: 'static>(graph: &mut SceneGraph<C>, root: NodeId, texture: TextureHandle) -> Result<Vec<NodeId>, SceneError> {
    let per_arm = LINK_COUNT / ARM_DIRECTIONS.len();
    let shrink = 1.0 / LINK_COUNT as f32;
    let mut links = Vec::with_capacity(LINK_COUNT);

    for (dx, dy) in ARM_DIRECTIONS {
        let mut parent = root;
        let mut scale = 1.0;
        for _ in 0..per_arm {
            let link = Node::from_texture(texture)
                .with_position(Vec2::new(dx, dy) * LINK_OFFSET)
                .with_uniform_scale(scale);
            parent = graph.create_child(parent, link)?;
            graph.add_behavior(parent, DriftingSpin::default())?;
            links.push(parent);
            scale -= shrink;
        }
    }

    Ok(links)
}

/// The arms demo application
pub struct ArmsDemo {
    config: ArmsConfig,
    graph: SceneGraph,
    root: Option<NodeId>,
    links: Vec<NodeId>,
}

impl ArmsDemo {
    /// Create the demo; the scene is built in [`Application::initialize`]
    pub fn new(config: ArmsConfig) -> Self {
        Self {
            graph: SceneGraph::with_max_self_child_count(config.max_self_child_count),
            config,
            root: None,
            links: Vec::new(),
        }
    }

    /// Scene graph
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Root node once initialized
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Every link in creation order
    pub fn links(&self) -> &[NodeId] {
        &self.links
    }
}

impl Application for ArmsDemo {
    fn initialize(&mut self, textures: &mut TextureRegistry) -> Result<(), AppError> {
        let sprite = textures.load_or_register(&self.config.sprite_path, self.config.fallback_size);
        let root = self.graph.create(Node::from_texture(sprite));
        self.links = build_arms(&mut self.graph, root, sprite)?;

        if self.config.self_loop {
            self.graph.add_child(root, root)?;
        }

        log::info!("Arms ready: {} links", self.links.len());
        self.root = Some(root);
        Ok(())
    }

    fn update(&mut self, _input: &InputState, _textures: &TextureRegistry, delta_time: f32) -> Result<(), AppError> {
        if let Some(root) = self.root {
            self.graph.update_from(root, GlobalTransform::at(self.config.origin), delta_time, &mut ());
        }
        Ok(())
    }

    fn draw<S: SpriteSink>(&self, textures: &TextureRegistry, sink: &mut S) -> Result<(), AppError> {
        if let Some(root) = self.root {
            self.graph.draw_from(root, GlobalTransform::at(self.config.origin), textures, sink);
        }
        Ok(())
    }

    fn status(&self) -> String {
        format!("arms with {} links", self.links.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use scene_engine::platform::DrawQueue;

    fn demo(self_loop: bool) -> (ArmsDemo, TextureRegistry) {
        let mut textures = TextureRegistry::new();
        let mut demo = ArmsDemo::new(ArmsConfig {
            sprite_path: "does/not/exist.png".to_string(),
            self_loop,
            ..Default::default()
        });
        demo.initialize(&mut textures).unwrap();
        (demo, textures)
    }

    #[test]
    fn test_builds_four_arms() {
        let (demo, _) = demo(false);

        assert_eq!(demo.links().len(), LINK_COUNT);
        assert_eq!(demo.graph().len(), LINK_COUNT + 1);
        let root = demo.root().unwrap();
        assert_eq!(demo.graph().get(root).unwrap().children().len(), 4);
    }

    #[test]
    fn test_scale_shrinks_along_arm() {
        let (demo, _) = demo(false);
        let graph = demo.graph();

        let first = graph.get(demo.links()[0]).unwrap();
        let last = graph.get(demo.links()[12]).unwrap();
        assert_relative_eq!(first.transform.scale.x, 1.0);
        assert_relative_eq!(last.transform.scale.x, 1.0 - 12.0 / 52.0, epsilon = 1e-5);
    }

    #[test]
    fn test_first_frame_draws_every_sprite_around_origin() {
        let (demo, textures) = demo(false);
        let mut queue = DrawQueue::new();

        demo.draw(&textures, &mut queue).unwrap();

        assert_eq!(queue.commands().len(), LINK_COUNT + 1);
        assert_relative_eq!(queue.commands()[0].dest.center(), Vec2::new(400.0, 300.0));
        assert_relative_eq!(queue.commands()[1].dest.center(), Vec2::new(450.0, 300.0));
    }

    #[test]
    fn test_self_loop_draws_root_repeatedly_and_terminates() {
        let (mut demo, textures) = demo(true);
        demo.update(&InputState::new(), &textures, 0.03).unwrap();

        let mut queue = DrawQueue::new();
        demo.draw(&textures, &mut queue).unwrap();

        // The root is drawn once from the top and 50 more times along the self
        // edge. Its arms inherit the loop count, so the deepest pass skips them.
        assert_eq!(queue.commands().len(), 51 + 50 * LINK_COUNT);
    }
}
