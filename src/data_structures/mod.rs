//! Scene data types: textures, materials, lights, transforms and shapes.
//!
//! - `texture` holds decoded images, texture handles/slots and the GPU texture wrapper
//! - `material` holds named lighting-property sets
//! - `light` holds static light sources
//! - `transform` composes scale/rotation/position into a model matrix
//! - `shape` lists the primitive meshes

pub mod light;
pub mod material;
pub mod shape;
pub mod texture;
pub mod transform;
