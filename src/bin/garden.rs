//! Headless run of the demo garden: prepares the scene against a real wgpu
//! device, renders one frame into a tallying mesh library and reports what
//! was drawn.
//!
//! Textures are read from `./assets/textures` unless
//! `FORWARD_SCENE_TEXTURE_DIR` points elsewhere.

use std::collections::BTreeMap;

use instant::Instant;

use forward_scene::{
    SceneAssembler, SceneConfig,
    context::GpuTextures,
    data_structures::shape::Shape,
    pipelines::{
        MeshLibrary,
        uniform::{UniformBuffers, UniformState},
    },
    scene::garden::garden,
};

/// Stands in for a mesh library: remembers which meshes were built and
/// counts draws per shape.
#[derive(Default)]
struct DrawTally {
    loaded: Vec<Shape>,
    draws: BTreeMap<Shape, usize>,
}

impl MeshLibrary for DrawTally {
    fn load_mesh(&mut self, shape: Shape) {
        self.loaded.push(shape);
    }

    fn draw_mesh(&mut self, shape: Shape) {
        *self.draws.entry(shape).or_default() += 1;
    }
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let mut gpu = futures::executor::block_on(GpuTextures::headless())?;
    let mut shader = UniformState::new();
    let mut meshes = DrawTally::default();
    let config = SceneConfig::from_env();
    log::info!("Loading textures from {:?}", config.texture_dir);

    let drawn = {
        let mut assembler =
            SceneAssembler::new(&mut shader, &mut meshes, &mut gpu, garden(), config);
        let start = Instant::now();
        assembler.prepare();
        log::info!("Prepared in {:?}", start.elapsed());

        let start = Instant::now();
        let drawn = assembler.render();
        log::info!("Rendered {drawn} draws in {:?}", start.elapsed());
        drawn
    };

    // The last draw's state, as it would be uploaded before its draw call.
    let uniforms = UniformBuffers::new(&gpu.device, &shader);
    uniforms.write(&gpu.queue, &shader);
    gpu.queue.submit(std::iter::empty());

    log::info!("Meshes built: {:?}", meshes.loaded);
    for (shape, count) in &meshes.draws {
        log::info!("{:>9}: {count} draws", shape.name());
    }
    println!("garden: {drawn} draws across {} shapes", meshes.draws.len());
    Ok(())
}
