//! The texture registry: decode, upload, slot assignment and tag lookup.
//!
//! Textures are loaded once while the scene is prepared. The Nth texture
//! that loads successfully occupies slot N, and slot N is bound to texture
//! unit N by [`TextureRegistry::bind_all`]. The registry is bounded: once
//! every slot is taken further loads are rejected, never overwritten.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    data_structures::texture::{DecodedImage, LoadedTexture, Slot, TextureId},
    resources::load_image,
};

/// Minimum number of texture units a GPU is required to expose.
pub const TEXTURE_SLOT_CAPACITY: usize = 16;

/// Why a texture did not make it into the registry.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("could not decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path:?} has {channels} channels; only 3 or 4 are supported")]
    UnsupportedChannels { path: PathBuf, channels: u8 },
    #[error("image for `{tag}` has {actual} bytes of pixel data; its size needs {expected}")]
    Malformed {
        tag: String,
        expected: usize,
        actual: usize,
    },
    #[error("all {capacity} texture slots are in use")]
    SlotsExhausted { capacity: usize },
    #[error("could not upload texture `{tag}`: {message}")]
    Upload { tag: String, message: String },
}

/// The GPU side of texture management.
///
/// Implementations own the actual texture objects; the registry only keeps
/// the opaque [`TextureId`]s they hand out.
pub trait TextureDevice {
    /// Create a 2D texture (repeat wrapping, linear filtering, full mip chain)
    /// from `image`. The CPU copy may be dropped once this returns.
    fn upload(&mut self, image: &DecodedImage, label: &str) -> anyhow::Result<TextureId>;

    /// Make `id` the texture sampled through texture unit `unit`.
    fn bind(&mut self, unit: u32, id: TextureId);

    /// Destroy the texture behind `id`.
    fn release(&mut self, id: TextureId);
}

/// Bounded, ordered table of loaded textures.
#[derive(Debug)]
pub struct TextureRegistry {
    textures: Vec<LoadedTexture>,
    capacity: usize,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::with_capacity(TEXTURE_SLOT_CAPACITY)
    }

    /// Registry with fewer slots than the hardware minimum. Capacities above
    /// [`TEXTURE_SLOT_CAPACITY`] are clamped.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(TEXTURE_SLOT_CAPACITY);
        Self {
            textures: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Decode the image at `path`, upload it and register it under `tag`.
    ///
    /// On success the texture takes the next free slot, which is returned.
    /// On any failure the registry is left unchanged.
    pub fn load<D: TextureDevice + ?Sized>(
        &mut self,
        device: &mut D,
        path: &Path,
        tag: &str,
    ) -> Result<Slot, TextureError> {
        if self.textures.len() >= self.capacity {
            let err = TextureError::SlotsExhausted {
                capacity: self.capacity,
            };
            log::error!("Could not register texture `{tag}`: {err}");
            return Err(err);
        }

        let image = load_image(path).inspect_err(|e| log::error!("{e}"))?;
        log::info!(
            "Loaded image {:?}, width: {}, height: {}, channels: {}",
            path,
            image.width,
            image.height,
            image.format.channels()
        );
        self.register(device, &image, tag)
    }

    /// Upload an already decoded image and register it under `tag`.
    pub fn register<D: TextureDevice + ?Sized>(
        &mut self,
        device: &mut D,
        image: &DecodedImage,
        tag: &str,
    ) -> Result<Slot, TextureError> {
        if self.textures.len() >= self.capacity {
            return Err(TextureError::SlotsExhausted {
                capacity: self.capacity,
            });
        }
        if !image.is_well_formed() {
            let err = TextureError::Malformed {
                tag: tag.to_string(),
                expected: image.expected_len(),
                actual: image.pixels.len(),
            };
            log::error!("{err}");
            return Err(err);
        }
        let id = device.upload(image, tag).map_err(|e| {
            let err = TextureError::Upload {
                tag: tag.to_string(),
                message: format!("{e:#}"),
            };
            log::error!("{err}");
            err
        })?;

        let slot = Slot(self.textures.len() as u32);
        self.textures.push(LoadedTexture {
            tag: tag.to_string(),
            id,
        });
        log::debug!("Texture `{tag}` registered in slot {}", slot.0);
        Ok(slot)
    }

    /// Bind every registered texture to the unit matching its slot.
    ///
    /// Call once after all textures are loaded and before the first draw
    /// that samples one. Binding twice yields the same table.
    pub fn bind_all<D: TextureDevice + ?Sized>(&self, device: &mut D) {
        for (unit, texture) in self.textures.iter().enumerate() {
            device.bind(unit as u32, texture.id);
        }
    }

    /// Release every texture. The registry is empty afterwards.
    pub fn release_all<D: TextureDevice + ?Sized>(&mut self, device: &mut D) {
        for texture in self.textures.drain(..) {
            device.release(texture.id);
        }
    }

    /// Slot of the first texture registered under `tag`.
    pub fn slot_of(&self, tag: &str) -> Option<Slot> {
        self.textures
            .iter()
            .position(|t| t.tag == tag)
            .map(|index| Slot(index as u32))
    }

    /// Device handle of the first texture registered under `tag`.
    pub fn id_of(&self, tag: &str) -> Option<TextureId> {
        self.textures.iter().find(|t| t.tag == tag).map(|t| t.id)
    }

    pub fn get(&self, slot: Slot) -> Option<&LoadedTexture> {
        self.textures.get(slot.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedTexture> {
        self.textures.iter()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
