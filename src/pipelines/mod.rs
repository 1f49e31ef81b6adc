//! The shader-facing side of the renderer.
//!
//! - `uniform` holds [`uniform::UniformState`], a named-uniform register set packed into GPU blocks
//! - `broadcast` pushes a draw's resolved state into a [`ShaderProgram`]
//!
//! The two traits below are the seams to the collaborators this crate does
//! not implement itself: the linked shader program's uniform interface and
//! the primitive mesh library.

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

use crate::data_structures::shape::Shape;

pub mod broadcast;
pub mod uniform;

/// Uniform names understood by the scene shader.
pub mod names {
    pub const MODEL: &str = "model";
    pub const OBJECT_COLOR: &str = "objectColor";
    pub const OBJECT_TEXTURE: &str = "objectTexture";
    pub const USE_TEXTURE: &str = "bUseTexture";
    pub const USE_LIGHTING: &str = "bUseLighting";
    pub const UV_SCALE: &str = "UVscale";

    pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
    pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
    pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
    pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
    pub const MATERIAL_SHININESS: &str = "material.shininess";

    pub const LIGHT_POSITION: &str = "position";
    pub const LIGHT_AMBIENT_COLOR: &str = "ambientColor";
    pub const LIGHT_DIFFUSE_COLOR: &str = "diffuseColor";
    pub const LIGHT_SPECULAR_COLOR: &str = "specularColor";
    pub const LIGHT_FOCAL_STRENGTH: &str = "focalStrength";
    pub const LIGHT_SPECULAR_INTENSITY: &str = "specularIntensity";
    pub const LIGHT_AMBIENT_STRENGTH: &str = "ambientStrength";

    /// `lightSources[index].field`
    pub fn light(index: usize, field: &str) -> String {
        format!("lightSources[{index}].{field}")
    }

    /// Split `lightSources[index].field` into its parts.
    pub fn parse_light(name: &str) -> Option<(usize, &str)> {
        let rest = name.strip_prefix("lightSources[")?;
        let (index, field) = rest.split_once("].")?;
        Some((index.parse().ok()?, field))
    }
}

/// Typed uniform setters of the active shader program, keyed by name.
///
/// Every call overwrites the previous value of that uniform.
pub trait ShaderProgram {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>);
    fn set_vec4(&mut self, name: &str, value: Vector4<f32>);
    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);
    fn set_vec2(&mut self, name: &str, value: Vector2<f32>);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_int(&mut self, name: &str, value: i32);
    /// Point a sampler uniform at texture unit `slot`.
    fn set_sampler(&mut self, name: &str, slot: u32);
}

/// The primitive mesh library.
///
/// `draw_mesh` is the commit point of a draw: it consumes whatever state was
/// last written into the shader program.
pub trait MeshLibrary {
    fn load_mesh(&mut self, shape: Shape);
    fn draw_mesh(&mut self, shape: Shape);
}
