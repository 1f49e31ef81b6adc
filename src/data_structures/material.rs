//! Lighting properties of a surface.

use cgmath::Vector3;

/// A named set of lighting properties.
///
/// Materials are defined once while the scene is prepared and never change
/// afterwards. They are looked up by `tag`, first match wins.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub ambient_strength: f32,
    pub ambient_color: Vector3<f32>,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Material {
    /// Material with every property zeroed except a mid-grey diffuse term.
    ///
    /// Written in place of a material that could not be resolved so the
    /// previous draw's material never bleeds into the next one.
    pub fn neutral() -> Self {
        Self {
            tag: String::new(),
            ambient_strength: 0.0,
            ambient_color: Vector3::new(0.0, 0.0, 0.0),
            diffuse_color: Vector3::new(0.5, 0.5, 0.5),
            specular_color: Vector3::new(0.0, 0.0, 0.0),
            shininess: 1.0,
        }
    }
}
