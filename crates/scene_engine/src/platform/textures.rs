use std::collections::HashMap;
use std::path::Path;

use crate::foundation::collections::{SlotMap, TextureHandle};

use super::TextureStore;

/// Texture registry errors
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    /// The image could not be opened or its header decoded
    #[error("Failed to read image: {0}")]
    Decode(#[from] image::ImageError),

    /// No texture registered under that name
    #[error("Unknown texture: {0}")]
    UnknownTexture(String),
}

/// Metadata kept per texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureInfo {
    /// Lookup name (the file path for loaded images)
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Texture metadata store
///
/// Only pixel dimensions are kept; decoding pixels is the concern of
/// whichever backend actually draws.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    textures: SlotMap<TextureHandle, TextureInfo>,
    by_name: HashMap<String, TextureHandle>,
}

impl TextureRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture of known size; re-registering a name updates its size
    pub fn register(&mut self, name: impl Into<String>, width: u32, height: u32) -> TextureHandle {
        let name = name.into();
        if let Some(&handle) = self.by_name.get(&name) {
            if let Some(info) = self.textures.get_mut(handle) {
                info.width = width;
                info.height = height;
            }
            return handle;
        }

        let handle = self.textures.insert(TextureInfo {
            name: name.clone(),
            width,
            height,
        });
        log::debug!("Registered texture {} ({}x{})", name, width, height);
        self.by_name.insert(name, handle);
        handle
    }

    /// Read an image's dimensions from disk and register it under its path
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<TextureHandle, TextureError> {
        let path = path.as_ref();
        let (width, height) = image::image_dimensions(path)?;
        log::info!("Loaded texture {:?} ({}x{})", path, width, height);
        Ok(self.register(path.display().to_string(), width, height))
    }

    /// Like [`load`](Self::load), registering `fallback` dimensions when the file cannot be read
    pub fn load_or_register(&mut self, path: impl AsRef<Path>, fallback: (u32, u32)) -> TextureHandle {
        let path = path.as_ref();
        match self.load(path) {
            Ok(handle) => handle,
            Err(e) => {
                log::warn!("{}; using a {}x{} placeholder for {:?}", e, fallback.0, fallback.1, path);
                self.register(path.display().to_string(), fallback.0, fallback.1)
            }
        }
    }

    /// Look up a texture by name
    pub fn handle(&self, name: &str) -> Option<TextureHandle> {
        self.by_name.get(name).copied()
    }

    /// Look up a texture by name, failing if it was never registered
    pub fn require(&self, name: &str) -> Result<TextureHandle, TextureError> {
        self.handle(name).ok_or_else(|| TextureError::UnknownTexture(name.to_string()))
    }

    /// Metadata for a handle
    pub fn info(&self, texture: TextureHandle) -> Option<&TextureInfo> {
        self.textures.get(texture)
    }

    /// Number of registered textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureStore for TextureRegistry {
    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.textures.get(texture).map(|info| (info.width, info.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut textures = TextureRegistry::new();
        let ship = textures.register("ship", 32, 24);

        assert_eq!(textures.handle("ship"), Some(ship));
        assert_eq!(textures.texture_size(ship), Some((32, 24)));
        assert!(matches!(textures.require("missing"), Err(TextureError::UnknownTexture(_))));
    }

    #[test]
    fn test_reregister_keeps_handle() {
        let mut textures = TextureRegistry::new();
        let first = textures.register("bullet", 8, 8);
        let second = textures.register("bullet", 16, 4);

        assert_eq!(first, second);
        assert_eq!(textures.len(), 1);
        assert_eq!(textures.texture_size(first), Some((16, 4)));
    }

    #[test]
    fn test_load_reads_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.png");
        image::RgbaImage::new(12, 7).save(&path).unwrap();

        let mut textures = TextureRegistry::new();
        let handle = textures.load(&path).unwrap();

        assert_eq!(textures.texture_size(handle), Some((12, 7)));
        assert_eq!(textures.handle(&path.display().to_string()), Some(handle));
    }

    #[test]
    fn test_load_or_register_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        let mut textures = TextureRegistry::new();
        assert!(textures.load(&path).is_err());
        let handle = textures.load_or_register(&path, (5, 9));

        assert_eq!(textures.texture_size(handle), Some((5, 9)));
    }

    #[test]
    fn test_null_handle_is_unknown() {
        let textures = TextureRegistry::new();
        assert_eq!(textures.texture_size(TextureHandle::default()), None);
    }
}
