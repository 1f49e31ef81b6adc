//! Declarative scene scripts.
//!
//! A [`Scene`] lists everything a frame needs: the texture files to load,
//! the materials and lights to define, and an ordered list of
//! [`SceneEntry`] draw requests. A single generic loop in
//! [`crate::render::SceneAssembler`] consumes it.

use cgmath::{Vector2, Vector3};

use crate::{
    data_structures::{light::LightSource, material::Material, shape::Shape, transform::Transform},
    pipelines::broadcast::{DrawSource, DrawState},
};

pub mod garden;

/// A texture file (relative to the configured texture directory) and the
/// tag it is registered under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureAsset {
    pub file: String,
    pub tag: String,
}

impl TextureAsset {
    pub fn new(file: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            tag: tag.into(),
        }
    }
}

/// One draw request.
///
/// Entries carry their full state, so they are independent of one another;
/// their order only affects layering.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEntry {
    pub shape: Shape,
    pub transform: Transform,
    pub source: DrawSource,
    pub material: Option<String>,
    pub uv_scale: Vector2<f32>,
}

impl SceneEntry {
    /// White, untextured, unit-sized `shape` at the origin with no material.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            transform: Transform::new(),
            source: DrawSource::Color([1.0; 4]),
            material: None,
            uv_scale: Vector2::new(1.0, 1.0),
        }
    }

    pub fn scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.scale = Vector3::new(x, y, z);
        self
    }

    /// Rotation in degrees about the X, Y and Z axes.
    pub fn rotate(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation_degrees = Vector3::new(x, y, z);
        self
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    pub fn color(mut self, rgba: [f32; 4]) -> Self {
        self.source = DrawSource::Color(rgba);
        self
    }

    pub fn texture(mut self, tag: &str) -> Self {
        self.source = DrawSource::texture(tag);
        self
    }

    pub fn material(mut self, tag: &str) -> Self {
        self.material = Some(tag.to_string());
        self
    }

    pub fn uv(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Vector2::new(u, v);
        self
    }

    /// Resolve the entry into the state broadcast before its draw call.
    pub fn draw_state(&self) -> DrawState {
        DrawState {
            model: self.transform.to_matrix(),
            source: self.source.clone(),
            material: self.material.clone(),
            uv_scale: self.uv_scale,
        }
    }
}

/// Everything needed to prepare and render a static scene.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub textures: Vec<TextureAsset>,
    pub materials: Vec<Material>,
    pub lights: Vec<LightSource>,
    pub entries: Vec<SceneEntry>,
}

impl Scene {
    pub fn push(&mut self, entry: SceneEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = SceneEntry>) {
        self.entries.extend(entries);
    }

    /// Distinct shapes drawn by the scene, in order of first use.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut shapes = Vec::new();
        for entry in &self.entries {
            if !shapes.contains(&entry.shape) {
                shapes.push(entry.shape);
            }
        }
        shapes
    }
}

/// The bark "root" under a shrub at (`x`, `z`): two cones meeting tip to
/// tip, the upper one turned upside down.
pub fn root(x: f32, z: f32) -> [SceneEntry; 2] {
    let cone = || {
        SceneEntry::new(Shape::Cone)
            .scale(0.5, 2.0, 0.5)
            .texture("bark")
            .material("bark")
    };
    [
        cone().at(x, 0.9, z),
        cone().rotate(0.0, 0.0, 180.0).at(x, 2.9, z),
    ]
}
