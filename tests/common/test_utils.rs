#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::HashMap,
    path::{Path, PathBuf},
    rc::Rc,
    sync::atomic::{AtomicU32, Ordering},
};

use cgmath::{Matrix4, Vector2, Vector3, Vector4};
use forward_scene::{
    data_structures::{
        shape::Shape,
        texture::{DecodedImage, PixelFormat, TextureId},
    },
    pipelines::{MeshLibrary, ShaderProgram},
    resources::texture::TextureDevice,
};
use image::{GrayAlphaImage, GrayImage, LumaA, Luma, Rgb, RgbImage, Rgba, RgbaImage};

pub const EPSILON: f32 = 1e-4;

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

pub fn assert_mat_eq(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    let (a, e): ([[f32; 4]; 4], [[f32; 4]; 4]) = (actual.into(), expected.into());
    for col in 0..4 {
        for row in 0..4 {
            assert!(
                approx_eq(a[col][row], e[col][row]),
                "column {col} row {row}: {} != {}\nactual:   {a:?}\nexpected: {e:?}",
                a[col][row],
                e[col][row]
            );
        }
    }
}

/// A single uniform write, as seen by the shader program.
#[derive(Clone, Debug, PartialEq)]
pub enum UniformValue {
    Mat4(Matrix4<f32>),
    Vec4(Vector4<f32>),
    Vec3(Vector3<f32>),
    Vec2(Vector2<f32>),
    Float(f32),
    Bool(bool),
    Int(i32),
    Sampler(u32),
}

/// Everything the shader and mesh fakes observed, in call order.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Uniform(String, UniformValue),
    Load(Shape),
    Draw(Shape),
}

/// Call log shared between a [`RecordingShader`] and [`RecordingMeshes`] so
/// tests can check what was written before each draw.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn uniforms(&self) -> Vec<(String, UniformValue)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Uniform(name, value) => Some((name, value)),
                _ => None,
            })
            .collect()
    }

    pub fn draws(&self) -> Vec<Shape> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Draw(shape) => Some(shape),
                _ => None,
            })
            .collect()
    }

    pub fn loads(&self) -> Vec<Shape> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Load(shape) => Some(shape),
                _ => None,
            })
            .collect()
    }

    /// Uniform writes issued between the previous draw and draw number
    /// `index` (zero based).
    pub fn writes_before_draw(&self, index: usize) -> Vec<(String, UniformValue)> {
        let mut draws = 0;
        let mut writes = Vec::new();
        for event in self.events() {
            match event {
                Event::Draw(_) if draws == index => return writes,
                Event::Draw(_) => {
                    draws += 1;
                    writes.clear();
                }
                Event::Uniform(name, value) => writes.push((name, value)),
                Event::Load(_) => {}
            }
        }
        panic!("only {draws} draws were recorded, wanted draw {index}");
    }

    /// Last value written to `name` anywhere in the log.
    pub fn last(&self, name: &str) -> Option<UniformValue> {
        self.uniforms()
            .into_iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }
}

pub fn last_in(writes: &[(String, UniformValue)], name: &str) -> Option<UniformValue> {
    writes
        .iter()
        .rev()
        .find(|(n, _)| n == name)
        .map(|(_, value)| value.clone())
}

pub struct RecordingShader(pub Journal);

impl RecordingShader {
    fn record(&mut self, name: &str, value: UniformValue) {
        self.0.push(Event::Uniform(name.to_string(), value));
    }
}

impl ShaderProgram for RecordingShader {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.record(name, UniformValue::Mat4(value));
    }
    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.record(name, UniformValue::Vec4(value));
    }
    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.record(name, UniformValue::Vec3(value));
    }
    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.record(name, UniformValue::Vec2(value));
    }
    fn set_float(&mut self, name: &str, value: f32) {
        self.record(name, UniformValue::Float(value));
    }
    fn set_bool(&mut self, name: &str, value: bool) {
        self.record(name, UniformValue::Bool(value));
    }
    fn set_int(&mut self, name: &str, value: i32) {
        self.record(name, UniformValue::Int(value));
    }
    fn set_sampler(&mut self, name: &str, slot: u32) {
        self.record(name, UniformValue::Sampler(slot));
    }
}

pub struct RecordingMeshes(pub Journal);

impl MeshLibrary for RecordingMeshes {
    fn load_mesh(&mut self, shape: Shape) {
        self.0.push(Event::Load(shape));
    }
    fn draw_mesh(&mut self, shape: Shape) {
        self.0.push(Event::Draw(shape));
    }
}

/// Shader, mesh library and journal wired together.
pub fn recorders() -> (Journal, RecordingShader, RecordingMeshes) {
    let journal = Journal::new();
    (
        journal.clone(),
        RecordingShader(journal.clone()),
        RecordingMeshes(journal),
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct Upload {
    pub id: TextureId,
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

/// In-memory texture device that records uploads, unit bindings and releases.
#[derive(Default)]
pub struct FakeTextureDevice {
    pub uploads: Vec<Upload>,
    pub units: HashMap<u32, TextureId>,
    pub bind_calls: usize,
    pub released: Vec<TextureId>,
    pub reject_uploads: bool,
    next: u32,
}

impl FakeTextureDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> usize {
        self.uploads.len() - self.released.len()
    }
}

impl TextureDevice for FakeTextureDevice {
    fn upload(&mut self, image: &DecodedImage, label: &str) -> anyhow::Result<TextureId> {
        if self.reject_uploads {
            anyhow::bail!("upload rejected");
        }
        self.next += 1;
        let id = TextureId(self.next);
        self.uploads.push(Upload {
            id,
            label: label.to_string(),
            width: image.width,
            height: image.height,
            format: image.format,
        });
        Ok(id)
    }

    fn bind(&mut self, unit: u32, id: TextureId) {
        self.bind_calls += 1;
        self.units.insert(unit, id);
    }

    fn release(&mut self, id: TextureId) {
        self.released.push(id);
        self.units.retain(|_, bound| *bound != id);
    }
}

/// Fresh, empty directory for one test's image fixtures.
pub fn fixture_dir(test: &str) -> PathBuf {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let dir = std::env::temp_dir().join(format!(
        "forward-scene-{test}-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_rgb(dir: &Path, file: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(file);
    RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]))
        .save(&path)
        .unwrap();
    path
}

pub fn write_rgba(dir: &Path, file: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(file);
    RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 64, 200]))
        .save(&path)
        .unwrap();
    path
}

pub fn write_gray(dir: &Path, file: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(file);
    GrayImage::from_fn(width, height, |x, _| Luma([x as u8]))
        .save(&path)
        .unwrap();
    path
}

pub fn write_gray_alpha(dir: &Path, file: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(file);
    GrayAlphaImage::from_fn(width, height, |x, _| LumaA([x as u8, 255]))
        .save(&path)
        .unwrap();
    path
}
