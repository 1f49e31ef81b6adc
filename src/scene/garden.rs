//! The walled garden demo scene: a paved floor split into four planted
//! quadrants by hedge walls.

use cgmath::Vector3;

use crate::{
    data_structures::{light::LightSource, material::Material, shape::Shape},
    scene::{Scene, SceneEntry, TextureAsset, root},
};

pub fn garden() -> Scene {
    let mut scene = Scene {
        textures: textures(),
        materials: materials(),
        lights: lights(),
        entries: Vec::new(),
    };
    scene.extend(floor());
    scene.extend(walls());
    scene.extend(quadrant_walls());
    scene.extend(quadrant_one());
    scene.extend(quadrant_two());
    scene.extend(quadrant_three());
    scene.extend(quadrant_four());
    scene
}

pub fn textures() -> Vec<TextureAsset> {
    vec![
        TextureAsset::new("BushDenseBerries.jpg", "DenseBerries"),
        TextureAsset::new("bushDense.jpg", "Hedge"),
        TextureAsset::new("BarkTexture.jpg", "bark"),
        TextureAsset::new("pavers.jpg", "brick"),
        TextureAsset::new("tilesf2.jpg", "tile"),
        TextureAsset::new("rocks.jpg", "rocks"),
    ]
}

fn material(tag: &str, ambient: [f32; 3], strength: f32, diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> Material {
    Material {
        tag: tag.to_string(),
        ambient_strength: strength,
        ambient_color: Vector3::from(ambient),
        diffuse_color: Vector3::from(diffuse),
        specular_color: Vector3::from(specular),
        shininess,
    }
}

pub fn materials() -> Vec<Material> {
    vec![
        // dark, matte
        material("cement", [0.6, 0.6, 0.6], 0.0, [0.1, 0.1, 0.1], [0.1, 0.1, 0.1], 0.1),
        material("blueTile", [0.1, 0.1, 0.6], 0.1, [0.1, 0.1, 0.3], [0.1, 0.1, 0.3], 0.6),
        material("bush", [0.1, 0.8, 0.1], 0.1, [0.1, 0.8, 0.1], [0.1, 0.8, 0.1], 0.1),
        material("bark", [0.5, 0.5, 0.1], 0.1, [0.5, 0.5, 0.1], [0.5, 0.5, 0.1], 0.1),
    ]
}

pub fn lights() -> Vec<LightSource> {
    vec![
        // overhead fill, ambient only
        LightSource {
            position: Vector3::new(0.0, 11.0, 0.0),
            ambient_color: Vector3::new(1.0, 1.0, 1.0),
            diffuse_color: Vector3::new(0.0, 0.0, 0.0),
            specular_color: Vector3::new(0.0, 0.0, 0.0),
            focal_strength: 0.0,
            specular_intensity: 0.0,
            ambient_strength: 0.6,
        },
        LightSource::tinted([-50.0, 11.0, -50.0], [0.8, 0.1, 0.1], 0.5, 0.6),
        LightSource::tinted([50.0, 11.0, 50.0], [0.1, 0.1, 0.8], 0.6, 0.6),
        LightSource {
            specular_color: Vector3::new(0.0, 0.7, 0.0),
            ..LightSource::tinted([50.0, 11.0, -50.0], [0.1, 0.7, 0.0], 1.0, 1.0)
        },
    ]
}

fn floor() -> Vec<SceneEntry> {
    vec![
        SceneEntry::new(Shape::Plane)
            .scale(100.0, 1.0, 100.0)
            .at(0.0, 0.0, -20.0)
            .texture("brick")
            .material("cement")
            .uv(20.0, 20.0),
    ]
}

fn hedge(length: f32) -> SceneEntry {
    SceneEntry::new(Shape::Box)
        .scale(5.0, 20.0, length)
        .texture("DenseBerries")
        .material("bush")
        .uv(10.0, 5.0)
}

fn walls() -> Vec<SceneEntry> {
    vec![
        hedge(200.0).rotate(0.0, 90.0, 0.0).at(0.0, 10.0, -117.5),
        hedge(200.0).at(-97.5, 10.0, -20.0),
        hedge(200.0).at(97.5, 10.0, -20.0),
        hedge(200.0).rotate(0.0, 90.0, 0.0).at(0.0, 10.0, 77.5),
    ]
}

fn quadrant_walls() -> Vec<SceneEntry> {
    vec![
        hedge(50.0).at(0.0, 10.0, 50.0),
        hedge(50.0).at(0.0, 10.0, -90.0),
        hedge(50.0).rotate(0.0, 90.0, 0.0).at(-70.0, 10.0, 0.0),
        hedge(50.0).rotate(0.0, 90.0, 0.0).at(70.0, 10.0, 0.0),
    ]
}

/// Tiled bed with a slightly smaller bed of rocks laid into it.
fn bed(x: f32, z: f32) -> [SceneEntry; 2] {
    [
        SceneEntry::new(Shape::Box)
            .scale(20.0, 0.5, 20.0)
            .at(x, 0.5, z)
            .texture("tile")
            .material("blueTile")
            .uv(10.0, 10.0),
        SceneEntry::new(Shape::Box)
            .scale(19.0, 0.5, 19.0)
            .at(x, 0.6, z)
            .texture("rocks")
            .material("cement")
            .uv(10.0, 10.0),
    ]
}

fn foliage(shape: Shape) -> SceneEntry {
    SceneEntry::new(shape).texture("Hedge").material("bush")
}

fn quadrant_one() -> Vec<SceneEntry> {
    let mut entries = Vec::from(bed(55.0, 35.0));
    entries.extend(root(50.0, 35.0));
    entries.extend(root(60.0, 35.0));
    for (x, y) in [(60.0, 8.8), (50.0, 8.8), (55.0, 18.5)] {
        entries.push(
            foliage(Shape::Torus)
                .scale(5.0, 5.0, 3.0)
                .at(x, y, 35.0)
                .uv(3.0, 2.0),
        );
    }
    entries
}

fn quadrant_two() -> Vec<SceneEntry> {
    const SHRUB_SIZE: f32 = 1.3;
    const SHRUB_HEIGHT: f32 = 3.3;
    const SHRUBS: [(f32, f32); 16] = [
        (-48.0, 35.0),
        (-62.0, 35.0),
        (-55.0, 42.0),
        (-55.0, 28.0),
        (-50.0, 40.0),
        (-60.0, 30.0),
        (-60.0, 40.0),
        (-50.0, 30.0),
        (-52.3, 28.3),
        (-57.7, 41.7),
        (-57.7, 28.3),
        (-52.3, 41.7),
        (-61.7, 37.7),
        (-48.3, 32.3),
        (-61.7, 32.3),
        (-48.3, 37.7),
    ];

    let mut entries = Vec::from(bed(-55.0, 35.0));
    for (x, z) in SHRUBS {
        entries.push(
            foliage(Shape::Sphere)
                .scale(SHRUB_SIZE, SHRUB_SIZE, SHRUB_SIZE)
                .at(x, SHRUB_HEIGHT, z)
                .uv(10.0, 10.0),
        );
        entries.extend(root(x, z));
    }
    entries
}

fn quadrant_three() -> Vec<SceneEntry> {
    let mut entries = Vec::from(bed(55.0, -75.0));
    entries.extend(root(55.0, -75.0));
    entries.push(foliage(Shape::Box).scale(4.0, 4.0, 4.0).at(55.0, 4.9, -75.0));
    entries.push(foliage(Shape::Sphere).scale(2.5, 2.5, 2.5).at(55.0, 9.3, -75.0));
    entries.push(
        foliage(Shape::Pyramid4)
            .scale(4.0, 4.0, 4.0)
            .rotate(0.0, 0.0, 180.0)
            .at(55.0, 13.5, -75.0),
    );
    entries
}

fn quadrant_four() -> Vec<SceneEntry> {
    const CROWN_SIZE: f32 = 8.5;
    const CROWN_HEIGHT: f32 = 6.7;

    let mut entries = Vec::from(bed(-55.0, -75.0));
    for (x, z) in [(-50.0, -70.0), (-60.0, -80.0), (-60.0, -70.0), (-50.0, -80.0)] {
        let trunk = || {
            SceneEntry::new(Shape::Cone)
                .texture("bark")
                .material("bark")
        };
        entries.push(trunk().scale(0.5, 2.0, 0.5).at(x, 0.6, z));
        entries.push(
            trunk()
                .scale(0.5, 2.5, 0.5)
                .rotate(0.0, 0.0, 180.0)
                .at(x, 2.6, z),
        );
        entries.push(
            foliage(Shape::Pyramid4)
                .scale(CROWN_SIZE, CROWN_SIZE, CROWN_SIZE)
                .at(x, CROWN_HEIGHT, z),
        );
    }
    entries.push(foliage(Shape::Pyramid4).scale(11.0, 11.0, 11.0).at(-55.0, 16.0, -75.0));
    entries
}
