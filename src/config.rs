//! Scene-wide settings that are not part of the scene script itself.

use std::path::PathBuf;

use crate::{pipelines::broadcast::FALLBACK_COLOR, resources::texture::TEXTURE_SLOT_CAPACITY};

/// Environment variable overriding [`SceneConfig::texture_dir`].
pub const TEXTURE_DIR_VAR: &str = "FORWARD_SCENE_TEXTURE_DIR";

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Directory the scene's texture file names are resolved against.
    pub texture_dir: PathBuf,
    /// Number of texture slots the registry may fill. Clamped to
    /// [`TEXTURE_SLOT_CAPACITY`].
    pub texture_capacity: usize,
    /// Flat colour drawn in place of a texture that failed to load.
    pub fallback_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("./assets/textures"),
            texture_capacity: TEXTURE_SLOT_CAPACITY,
            fallback_color: FALLBACK_COLOR,
        }
    }
}

impl SceneConfig {
    /// Defaults, with the texture directory taken from
    /// `FORWARD_SCENE_TEXTURE_DIR` when it is set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(TEXTURE_DIR_VAR).filter(|dir| !dir.is_empty()) {
            log::debug!("Texture directory overridden by {TEXTURE_DIR_VAR}: {dir:?}");
            config.texture_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_texture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.texture_dir = dir.into();
        self
    }

    pub fn with_texture_capacity(mut self, capacity: usize) -> Self {
        self.texture_capacity = capacity.min(TEXTURE_SLOT_CAPACITY);
        self
    }

    pub fn with_fallback_color(mut self, rgba: [f32; 4]) -> Self {
        self.fallback_color = rgba;
        self
    }
}
