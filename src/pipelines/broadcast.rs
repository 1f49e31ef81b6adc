//! Writing one draw's state into the shader program.
//!
//! A [`ShaderStateBroadcaster`] borrows the shader program and both
//! registries for the duration of a frame. Every draw must be preceded by a
//! complete broadcast: the shader keeps whatever was written last, so any
//! uniform left untouched would leak from the previous draw.
//! [`ShaderStateBroadcaster::broadcast`] performs that complete write.

use cgmath::{Matrix4, Vector2, Vector4};
use thiserror::Error;

use crate::{
    data_structures::{material::Material, texture::Slot},
    pipelines::{ShaderProgram, names},
    resources::{material::MaterialRegistry, texture::TextureRegistry},
};

/// Flat colour used when a draw's texture cannot be resolved.
pub const FALLBACK_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Object colour written alongside a texture, so no tint from an earlier
/// flat-coloured draw carries over.
pub const TEXTURED_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// What a draw is painted with. A draw is either flat coloured or
/// textured, never both.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawSource {
    Color([f32; 4]),
    Texture(String),
}

impl DrawSource {
    pub fn texture(tag: impl Into<String>) -> Self {
        Self::Texture(tag.into())
    }
}

/// The complete state consumed by one mesh draw call.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub model: Matrix4<f32>,
    pub source: DrawSource,
    pub material: Option<String>,
    pub uv_scale: Vector2<f32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BroadcastError {
    #[error("no texture registered under tag `{0}`")]
    TextureNotFound(String),
    #[error("no material defined under tag `{0}`")]
    MaterialNotFound(String),
}

/// Outcome of [`ShaderStateBroadcaster::set_material`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaterialBinding<'m> {
    /// The registry holds no materials; nothing was written.
    Skipped,
    Applied(&'m Material),
}

/// What [`ShaderStateBroadcaster::broadcast`] actually wrote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Broadcast {
    /// Texture unit sampled, or `None` for a flat-coloured draw.
    pub texture: Option<Slot>,
    /// True when the tagged material was written, false when the neutral
    /// material stood in or the registry was empty.
    pub material_resolved: bool,
}

pub struct ShaderStateBroadcaster<'a, S: ShaderProgram + ?Sized> {
    shader: &'a mut S,
    textures: &'a TextureRegistry,
    materials: &'a MaterialRegistry,
    fallback_color: [f32; 4],
}

impl<'a, S: ShaderProgram + ?Sized> ShaderStateBroadcaster<'a, S> {
    pub fn new(
        shader: &'a mut S,
        textures: &'a TextureRegistry,
        materials: &'a MaterialRegistry,
    ) -> Self {
        Self {
            shader,
            textures,
            materials,
            fallback_color: FALLBACK_COLOR,
        }
    }

    pub fn with_fallback_color(mut self, rgba: [f32; 4]) -> Self {
        self.fallback_color = rgba;
        self
    }

    pub fn set_transform(&mut self, model: Matrix4<f32>) {
        self.shader.set_mat4(names::MODEL, model);
    }

    /// Paint the next draw with a flat colour. Turns texturing off.
    pub fn set_color(&mut self, rgba: [f32; 4]) {
        self.shader.set_bool(names::USE_TEXTURE, false);
        self.shader.set_vec4(names::OBJECT_COLOR, Vector4::from(rgba));
    }

    /// Sample the texture registered under `tag` in the next draw.
    ///
    /// Nothing is written when the tag is unknown.
    pub fn set_texture(&mut self, tag: &str) -> Result<Slot, BroadcastError> {
        let slot = self
            .textures
            .slot_of(tag)
            .ok_or_else(|| BroadcastError::TextureNotFound(tag.to_string()))?;
        self.shader.set_bool(names::USE_TEXTURE, true);
        self.shader.set_sampler(names::OBJECT_TEXTURE, slot.0);
        Ok(slot)
    }

    /// Apply a [`DrawSource`]. Returns the sampled slot for textured draws.
    pub fn set_source(&mut self, source: &DrawSource) -> Result<Option<Slot>, BroadcastError> {
        match source {
            DrawSource::Color(rgba) => {
                self.set_color(*rgba);
                Ok(None)
            }
            DrawSource::Texture(tag) => self.set_texture(tag).map(Some),
        }
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        self.shader.set_vec2(names::UV_SCALE, Vector2::new(u, v));
    }

    /// Write all five fields of the material registered under `tag`.
    ///
    /// An empty registry is a no-op. A non-empty registry without a match
    /// writes nothing and reports [`BroadcastError::MaterialNotFound`].
    pub fn set_material(&mut self, tag: &str) -> Result<MaterialBinding<'a>, BroadcastError> {
        if self.materials.is_empty() {
            return Ok(MaterialBinding::Skipped);
        }
        let materials: &'a MaterialRegistry = self.materials;
        let material = materials
            .find(tag)
            .ok_or_else(|| BroadcastError::MaterialNotFound(tag.to_string()))?;
        self.write_material(material);
        Ok(MaterialBinding::Applied(material))
    }

    /// Overwrite the material uniforms with [`Material::neutral`].
    /// No-op when the registry is empty.
    pub fn reset_material(&mut self) {
        if !self.materials.is_empty() {
            self.write_material(&Material::neutral());
        }
    }

    fn write_material(&mut self, material: &Material) {
        self.shader
            .set_vec3(names::MATERIAL_AMBIENT_COLOR, material.ambient_color);
        self.shader
            .set_float(names::MATERIAL_AMBIENT_STRENGTH, material.ambient_strength);
        self.shader
            .set_vec3(names::MATERIAL_DIFFUSE_COLOR, material.diffuse_color);
        self.shader
            .set_vec3(names::MATERIAL_SPECULAR_COLOR, material.specular_color);
        self.shader
            .set_float(names::MATERIAL_SHININESS, material.shininess);
    }

    /// Write every uniform a draw depends on.
    ///
    /// An unresolved texture falls back to the flat fallback colour and an
    /// absent or unresolved material to the neutral material, so no value
    /// from an earlier draw survives.
    pub fn broadcast(&mut self, state: &DrawState) -> Broadcast {
        self.set_transform(state.model);

        let texture = match self.set_source(&state.source) {
            Ok(Some(slot)) => {
                // textured draws are untinted
                self.shader
                    .set_vec4(names::OBJECT_COLOR, Vector4::from(TEXTURED_COLOR));
                Some(slot)
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("{e}; drawing with the fallback colour");
                self.set_color(self.fallback_color);
                None
            }
        };

        let material_resolved = match &state.material {
            Some(tag) => match self.set_material(tag) {
                Ok(MaterialBinding::Applied(_)) => true,
                Ok(MaterialBinding::Skipped) => false,
                Err(e) => {
                    log::warn!("{e}; drawing with the neutral material");
                    self.reset_material();
                    false
                }
            },
            None => {
                self.reset_material();
                false
            }
        };

        self.set_uv_scale(state.uv_scale.x, state.uv_scale.y);

        Broadcast {
            texture,
            material_resolved,
        }
    }
}
