//! forward-scene
//!
//! Preparation and per-draw state management for a static scene rendered in
//! a single forward pass. The crate keeps the scene's textures and materials
//! registered under string tags, composes object transforms, and writes the
//! complete uniform state of every draw into the shader program before the
//! mesh library draws it. Shader compilation and mesh generation live
//! outside the crate behind the [`pipelines::ShaderProgram`] and
//! [`pipelines::MeshLibrary`] traits.
//!
//! High-level modules
//! - `config`: texture directory, slot capacity and fallback colour
//! - `context`: wgpu-backed texture device (upload, mip chain, texture units)
//! - `data_structures`: textures, materials, lights, transforms and shapes
//! - `pipelines`: shader/mesh seams, uniform blocks and the state broadcaster
//! - `resources`: image decoding plus the texture and material registries
//! - `render`: the scene assembler (prepare once, render every frame)
//! - `scene`: declarative scene scripts, including the demo garden
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use config::SceneConfig;
pub use render::SceneAssembler;
pub use scene::{Scene, SceneEntry, TextureAsset};
pub use wgpu;
