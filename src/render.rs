//! Scene preparation and the per-frame render loop.
//!
//! [`SceneAssembler`] drives a [`Scene`] through its two phases:
//!
//! - `prepare()` runs once: materials and lights are defined, textures are
//!   loaded and bound to their units, and every mesh the scene uses is built.
//! - `render()` runs every frame: each entry's transform is composed, its
//!   full state is broadcast, then its mesh is drawn.
//!
//! Nothing in either phase is fatal. A texture that fails to load is
//! logged and the scene renders without it.

use crate::{
    config::SceneConfig,
    data_structures::light::MAX_LIGHTS,
    pipelines::{MeshLibrary, ShaderProgram, broadcast::ShaderStateBroadcaster, names},
    resources::{
        asset_path,
        material::MaterialRegistry,
        texture::{TextureDevice, TextureRegistry},
    },
    scene::Scene,
};

/// Owns the scene and both registries, and borrows the three collaborators
/// it drives: the shader program, the mesh library and the texture device.
pub struct SceneAssembler<'a, S, M, D>
where
    S: ShaderProgram + ?Sized,
    M: MeshLibrary + ?Sized,
    D: TextureDevice + ?Sized,
{
    shader: &'a mut S,
    meshes: &'a mut M,
    device: &'a mut D,
    scene: Scene,
    config: SceneConfig,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    prepared: bool,
}

impl<'a, S, M, D> SceneAssembler<'a, S, M, D>
where
    S: ShaderProgram + ?Sized,
    M: MeshLibrary + ?Sized,
    D: TextureDevice + ?Sized,
{
    pub fn new(
        shader: &'a mut S,
        meshes: &'a mut M,
        device: &'a mut D,
        scene: Scene,
        config: SceneConfig,
    ) -> Self {
        let textures = TextureRegistry::with_capacity(config.texture_capacity);
        Self {
            shader,
            meshes,
            device,
            scene,
            config,
            textures,
            materials: MaterialRegistry::new(),
            prepared: false,
        }
    }

    /// One-time setup. Calling it again only logs a warning.
    pub fn prepare(&mut self) {
        if self.prepared {
            log::warn!("Scene is already prepared; ignoring repeated prepare()");
            return;
        }

        for material in &self.scene.materials {
            self.materials.define(material.clone());
        }
        self.define_lights();
        self.load_textures();
        self.textures.bind_all(&mut *self.device);

        for shape in self.scene.shapes() {
            log::debug!("Loading {} mesh", shape.name());
            self.meshes.load_mesh(shape);
        }

        self.prepared = true;
        log::info!(
            "Scene prepared: {} textures, {} materials, {} entries",
            self.textures.len(),
            self.materials.len(),
            self.scene.entries.len()
        );
    }

    fn define_lights(&mut self) {
        let lights = &self.scene.lights;
        if lights.len() > MAX_LIGHTS {
            log::warn!(
                "Scene defines {} lights; only the first {MAX_LIGHTS} are used",
                lights.len()
            );
        }
        for (i, light) in lights.iter().take(MAX_LIGHTS).enumerate() {
            let shader = &mut *self.shader;
            shader.set_vec3(&names::light(i, names::LIGHT_POSITION), light.position);
            shader.set_vec3(&names::light(i, names::LIGHT_AMBIENT_COLOR), light.ambient_color);
            shader.set_vec3(&names::light(i, names::LIGHT_DIFFUSE_COLOR), light.diffuse_color);
            shader.set_vec3(&names::light(i, names::LIGHT_SPECULAR_COLOR), light.specular_color);
            shader.set_float(&names::light(i, names::LIGHT_FOCAL_STRENGTH), light.focal_strength);
            shader.set_float(
                &names::light(i, names::LIGHT_SPECULAR_INTENSITY),
                light.specular_intensity,
            );
            shader.set_float(
                &names::light(i, names::LIGHT_AMBIENT_STRENGTH),
                light.ambient_strength,
            );
        }
        if !lights.is_empty() {
            self.shader.set_bool(names::USE_LIGHTING, true);
        }
    }

    fn load_textures(&mut self) {
        for asset in &self.scene.textures {
            let path = asset_path(&self.config.texture_dir, &asset.file);
            // failures are logged by the registry
            if let Ok(slot) = self.textures.load(&mut *self.device, &path, &asset.tag) {
                log::debug!("Texture `{}` in slot {}", asset.tag, slot.0);
            }
        }
    }

    /// Draw every entry once. Returns the number of draw calls issued.
    pub fn render(&mut self) -> usize {
        if !self.prepared {
            log::warn!("render() called before prepare(); nothing drawn");
            return 0;
        }

        let mut broadcaster =
            ShaderStateBroadcaster::new(&mut *self.shader, &self.textures, &self.materials)
                .with_fallback_color(self.config.fallback_color);
        for entry in &self.scene.entries {
            let state = entry.draw_state();
            let written = broadcaster.broadcast(&state);
            log::trace!("Drawing {} with {:?}", entry.shape.name(), written);
            self.meshes.draw_mesh(entry.shape);
        }
        self.scene.entries.len()
    }

    /// Release every uploaded texture. Runs at most once; also called on drop.
    pub fn teardown(&mut self) {
        if self.textures.is_empty() {
            return;
        }
        log::debug!("Releasing {} textures", self.textures.len());
        self.textures.release_all(&mut *self.device);
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn shader(&self) -> &S {
        &*self.shader
    }

    pub fn meshes(&self) -> &M {
        &*self.meshes
    }

    pub fn device(&self) -> &D {
        &*self.device
    }
}

impl<S, M, D> Drop for SceneAssembler<'_, S, M, D>
where
    S: ShaderProgram + ?Sized,
    M: MeshLibrary + ?Sized,
    D: TextureDevice + ?Sized,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        data_structures::{
            light::LightSource,
            shape::Shape,
            texture::{DecodedImage, TextureId},
        },
        pipelines::uniform::UniformState,
        scene::{SceneEntry, TextureAsset},
    };

    #[derive(Default)]
    struct Tally {
        loads: HashMap<Shape, usize>,
        draws: Vec<Shape>,
    }

    impl MeshLibrary for Tally {
        fn load_mesh(&mut self, shape: Shape) {
            *self.loads.entry(shape).or_default() += 1;
        }
        fn draw_mesh(&mut self, shape: Shape) {
            self.draws.push(shape);
        }
    }

    #[derive(Default)]
    struct NoTextures;

    impl TextureDevice for NoTextures {
        fn upload(&mut self, _: &DecodedImage, _: &str) -> anyhow::Result<TextureId> {
            anyhow::bail!("no uploads in this test")
        }
        fn bind(&mut self, _: u32, _: TextureId) {}
        fn release(&mut self, _: TextureId) {}
    }

    fn scene() -> Scene {
        let mut scene = Scene::default();
        scene.textures.push(TextureAsset::new("missing.png", "brick"));
        scene.lights.push(LightSource::tinted([0.0, 11.0, 0.0], [1.0; 3], 0.5, 0.6));
        scene.push(SceneEntry::new(Shape::Plane).texture("brick"));
        scene.push(SceneEntry::new(Shape::Box));
        scene.push(SceneEntry::new(Shape::Box));
        scene
    }

    fn config() -> SceneConfig {
        SceneConfig::default().with_texture_dir(std::env::temp_dir().join("forward-scene-none"))
    }

    #[test]
    fn render_before_prepare_draws_nothing() {
        let (mut shader, mut meshes, mut device) =
            (UniformState::new(), Tally::default(), NoTextures);
        let mut assembler =
            SceneAssembler::new(&mut shader, &mut meshes, &mut device, scene(), config());
        assert_eq!(assembler.render(), 0);
        assert!(assembler.meshes().draws.is_empty());
    }

    #[test]
    fn prepare_is_one_shot_and_loads_each_shape_once() {
        let (mut shader, mut meshes, mut device) =
            (UniformState::new(), Tally::default(), NoTextures);
        let mut assembler =
            SceneAssembler::new(&mut shader, &mut meshes, &mut device, scene(), config());
        assembler.prepare();
        assembler.prepare();

        let loads = &assembler.meshes().loads;
        assert_eq!(loads.len(), 2);
        assert_eq!(loads[&Shape::Plane], 1);
        assert_eq!(loads[&Shape::Box], 1);
        assert!(assembler.shader().uses_lighting());
    }

    #[test]
    fn missing_texture_does_not_stop_rendering() {
        let (mut shader, mut meshes, mut device) =
            (UniformState::new(), Tally::default(), NoTextures);
        let mut assembler =
            SceneAssembler::new(&mut shader, &mut meshes, &mut device, scene(), config());
        assembler.prepare();

        assert!(assembler.textures().is_empty());
        assert_eq!(assembler.render(), 3);
        assert_eq!(assembler.render(), 3);
        assert_eq!(
            assembler.meshes().draws,
            [Shape::Plane, Shape::Box, Shape::Box].repeat(2)
        );
    }
}
