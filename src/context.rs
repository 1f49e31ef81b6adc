use std::collections::HashMap;

use anyhow::Context as _;

use crate::{
    data_structures::texture::{DecodedImage, Texture, TextureId},
    resources::texture::{TEXTURE_SLOT_CAPACITY, TextureDevice},
};

/// WGPU-backed texture device.
///
/// Owns the device/queue pair, every uploaded [`Texture`] and a table of
/// [`TEXTURE_SLOT_CAPACITY`] texture units. A render pipeline builds its
/// texture bind group from [`GpuTextures::unit`].
#[derive(Debug)]
pub struct GpuTextures {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    textures: HashMap<TextureId, Texture>,
    units: [Option<TextureId>; TEXTURE_SLOT_CAPACITY],
    next_id: u32,
}

impl GpuTextures {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            textures: HashMap::new(),
            units: [None; TEXTURE_SLOT_CAPACITY],
            next_id: 1,
        }
    }

    /// Create a device without a surface, for offline preparation and tests.
    pub async fn headless() -> anyhow::Result<Self> {
        // The instance is a handle to our GPU
        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("forward-scene device"),
                ..Default::default()
            })
            .await
            .context("could not open the GPU device")?;

        Ok(Self::new(device, queue))
    }

    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(&id)
    }

    /// The texture currently bound to `unit`.
    pub fn unit(&self, unit: u32) -> Option<&Texture> {
        let id = (*self.units.get(unit as usize)?)?;
        self.textures.get(&id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureDevice for GpuTextures {
    fn upload(&mut self, image: &DecodedImage, label: &str) -> anyhow::Result<TextureId> {
        let max = self.device.limits().max_texture_dimension_2d;
        if image.width == 0 || image.height == 0 || image.width > max || image.height > max {
            anyhow::bail!(
                "{}x{} is outside the supported texture size (1..={max})",
                image.width,
                image.height
            );
        }
        if !image.is_well_formed() {
            anyhow::bail!(
                "pixel buffer holds {} bytes; a {}x{} {:?} image needs {}",
                image.pixels.len(),
                image.width,
                image.height,
                image.format,
                image.expected_len()
            );
        }
        let texture = Texture::from_decoded(&self.device, &self.queue, image, Some(label))?;
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.textures.insert(id, texture);
        Ok(id)
    }

    fn bind(&mut self, unit: u32, id: TextureId) {
        match self.units.get_mut(unit as usize) {
            Some(slot) => *slot = Some(id),
            None => log::error!(
                "Texture unit {unit} does not exist; only {TEXTURE_SLOT_CAPACITY} units are available"
            ),
        }
    }

    fn release(&mut self, id: TextureId) {
        if let Some(texture) = self.textures.remove(&id) {
            texture.texture.destroy();
        }
        for unit in self.units.iter_mut().filter(|unit| **unit == Some(id)) {
            *unit = None;
        }
    }
}
