use bullet_storm::GameConfig;
use scene_engine::config::{Config, ConfigError};
use scene_engine::foundation::math::Vec2;

fn customized() -> GameConfig {
    let mut config = GameConfig::default();
    config.engine.max_frames = Some(42);
    config.emitter.bullets_per_wave = 12;
    config.emitter.center = Vec2::new(123.5, 77.25);
    config.ship.speed = 321.0;
    config.textures.bullet.fallback_size = (3, 4);
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");
    let config = customized();

    config.save_to_file(&path).unwrap();
    let loaded = GameConfig::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_ron_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.ron");
    let config = customized();

    config.save_to_file(&path).unwrap();
    let loaded = GameConfig::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "spin_root = true\n\n[emitter]\nbullets_per_wave = 7\n").unwrap();

    let loaded = GameConfig::load_from_file(&path).unwrap();

    assert!(loaded.spin_root);
    assert_eq!(loaded.emitter.bullets_per_wave, 7);
    assert_eq!(loaded.emitter.radius, 100.0);
    assert_eq!(loaded.ship, GameConfig::default().ship);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let loaded = GameConfig::load_or_default(dir.path().join("absent.toml")).unwrap();

    assert_eq!(loaded, GameConfig::default());
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.yaml");
    std::fs::write(&path, "spin_root: true").unwrap();

    assert!(matches!(
        GameConfig::load_from_file(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        customized().save_to_file(&path),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[emitter\nradius = ").unwrap();

    assert!(matches!(GameConfig::load_or_default(&path), Err(ConfigError::Parse(_))));
}
