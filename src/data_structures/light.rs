//! Static light sources.

use cgmath::Vector3;

/// Number of entries in the shader's `lightSources` array.
pub const MAX_LIGHTS: usize = 4;

/// A point light written once into the shader's light array.
#[derive(Clone, Debug, PartialEq)]
pub struct LightSource {
    pub position: Vector3<f32>,
    pub ambient_color: Vector3<f32>,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub focal_strength: f32,
    pub specular_intensity: f32,
    pub ambient_strength: f32,
}

impl LightSource {
    /// Light at `position` tinted uniformly with `color` on all three terms.
    pub fn tinted(position: [f32; 3], color: [f32; 3], strength: f32, ambient: f32) -> Self {
        Self {
            position: position.into(),
            ambient_color: color.into(),
            diffuse_color: color.into(),
            specular_color: color.into(),
            focal_strength: strength,
            specular_intensity: strength,
            ambient_strength: ambient,
        }
    }
}
