//! Game configuration
//!
//! Every section has defaults matching the classic 800x600 layout, so a
//! missing file or a partial one both work.

use serde::{Deserialize, Serialize};

use scene_engine::config::Config;
use scene_engine::foundation::math::{Rect, Vec2};
use scene_engine::EngineConfig;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Spin the root node and its first child
    pub spin_root: bool,

    /// Engine and window settings
    pub engine: EngineConfig,

    /// Region bullets live in
    pub play_area: PlayArea,

    /// Bullet emitter settings
    pub emitter: EmitterConfig,

    /// Player ship settings
    pub ship: ShipConfig,

    /// Bullet pool settings
    pub pool: PoolConfig,

    /// Texture sources
    pub textures: TextureConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spin_root: false,
            engine: EngineConfig {
                title: "Bullet Storm".to_string(),
                ..EngineConfig::default()
            },
            play_area: PlayArea::default(),
            emitter: EmitterConfig::default(),
            ship: ShipConfig::default(),
            pool: PoolConfig::default(),
            textures: TextureConfig::default(),
        }
    }
}

impl Config for GameConfig {}

/// Axis-aligned bounds; bullets outside are retired
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayArea {
    /// Smallest allowed coordinates
    pub min: Vec2,
    /// Largest allowed coordinates
    pub max: Vec2,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            min: Vec2::new(10.0, 10.0),
            max: Vec2::new(790.0, 590.0),
        }
    }
}

impl PlayArea {
    /// Check if a point lies inside, boundaries included
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Bullet emitter configuration
///
/// The emitter orbits `center` at `radius` and releases one ring of
/// `bullets_per_wave` bullets every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Orbit center
    pub center: Vec2,
    /// Orbit radius
    pub radius: f32,
    /// Orbit speed in radians per second
    pub orbit_rate: f32,
    /// Bullets released per frame
    pub bullets_per_wave: u32,
    /// Mean bullet speed in pixels per second
    pub base_speed: f32,
    /// Peak deviation from `base_speed`
    pub speed_swing: f32,
    /// Speed oscillation rate in radians per second
    pub speed_rate: f32,
    /// Ring rotation oscillation rate in radians per second
    pub spread_rate: f32,
    /// Peak ring rotation per frame
    pub spread_step: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            center: Vec2::new(400.0, 300.0),
            radius: 100.0,
            orbit_rate: 1.1,
            bullets_per_wave: 100,
            base_speed: 200.0,
            speed_swing: 100.0,
            speed_rate: 1.5,
            spread_rate: 1.2,
            spread_step: 0.1,
        }
    }
}

/// Player ship configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Starting position
    pub start: Vec2,
    /// Movement speed in pixels per second
    pub speed: f32,
    /// Collision rectangle relative to the ship position
    pub hit_box: Rect,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            start: Vec2::new(400.0, 500.0),
            speed: 200.0,
            hit_box: Rect::new(-5.0, -5.0, 10.0, 10.0),
        }
    }
}

/// Bullet pool configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Free list slots before the first growth
    pub initial_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_capacity: scene_engine::pool::DEFAULT_INITIAL_CAPACITY,
        }
    }
}

/// One texture: an image path and the size to assume if it cannot be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSource {
    /// Image file
    pub path: String,
    /// Placeholder dimensions
    pub fallback_size: (u32, u32),
}

impl TextureSource {
    fn new(path: &str, fallback_size: (u32, u32)) -> Self {
        Self {
            path: path.to_string(),
            fallback_size,
        }
    }
}

/// Texture sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Root sprite
    pub sprite: TextureSource,
    /// Bullet sprite
    pub bullet: TextureSource,
    /// Ship sprite
    pub ship: TextureSource,
    /// Ship sprite while hit
    pub ship_hit: TextureSource,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            sprite: TextureSource::new("assets/sprite.png", (64, 64)),
            bullet: TextureSource::new("assets/bullet.png", (8, 8)),
            ship: TextureSource::new("assets/ship.png", (32, 32)),
            ship_hit: TextureSource::new("assets/ship_hit.png", (32, 32)),
        }
    }
}
