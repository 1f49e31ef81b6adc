//! Decoded images, texture handles and the GPU texture wrapper.
//!
//! This module provides the CPU-side [`DecodedImage`] produced by the image
//! decoder, the opaque [`TextureId`] handed out by a texture device, the
//! [`Slot`] a texture occupies in the texture-unit table, and [`Texture`], a
//! wrapper around the WGPU texture, view and sampler of an uploaded image.

use image::{RgbaImage, imageops::FilterType};

/// Pixel layout of a decoded image, selected by its channel count.
///
/// Only 3- and 4-channel images are accepted; the layout doubles as the
/// internal format requested on upload (3 → RGB8, 4 → RGBA8).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(Self::Rgb8),
            4 => Some(Self::Rgba8),
            _ => None,
        }
    }

    pub fn channels(self) -> u8 {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// An image decoded into tightly packed 8-bit rows, already flipped so that
/// row 0 is the bottom of the picture (texture-space origin).
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Byte length `pixels` must have for the stated size and format.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.channels() as usize
    }

    /// True when the pixel buffer exactly covers `width` x `height` texels.
    pub fn is_well_formed(&self) -> bool {
        self.pixels.len() == self.expected_len()
    }

    /// Expand to four channels. RGBA input is returned as is.
    ///
    /// Returns `None` when the pixel buffer is too short or too long for
    /// the stated size.
    pub fn to_rgba8(&self) -> Option<RgbaImage> {
        if !self.is_well_formed() {
            return None;
        }
        let data = match self.format {
            PixelFormat::Rgba8 => self.pixels.clone(),
            PixelFormat::Rgb8 => self
                .pixels
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
        };
        RgbaImage::from_raw(self.width, self.height, data)
    }
}

/// Opaque handle of an uploaded texture, issued by a texture device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Index into the texture-unit table. A texture's slot equals its
/// registration order and is also the unit it gets bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(pub u32);

impl Slot {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A registered texture: the lookup tag and the device handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedTexture {
    pub tag: String,
    pub id: TextureId,
}

/// Number of mip levels down to 1x1 for the given extent.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Build the full mip chain, level 0 first. Each level halves both axes
/// (never below one texel) using a linear filter.
pub fn mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height());
    let mut chain = Vec::with_capacity(levels as usize);
    chain.push(base);
    for _ in 1..levels {
        let prev = &chain[chain.len() - 1];
        let width = (prev.width() / 2).max(1);
        let height = (prev.height() / 2).max(1);
        let next = image::imageops::resize(prev, width, height, FilterType::Triangle);
        chain.push(next);
    }
    chain
}

/// A GPU texture with a view and sampler.
///
/// Sampling repeats on both axes and filters linearly for minification,
/// magnification and between mip levels.
#[derive(Clone, Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub format: PixelFormat,
}

impl Texture {
    /// Upload a decoded image with its full mip chain.
    ///
    /// WGPU has no three-channel format, so RGB images are expanded to
    /// RGBA8 before the copy. `format` still records the source layout.
    pub fn from_decoded(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &DecodedImage,
        label: Option<&str>,
    ) -> anyhow::Result<Self> {
        let base = img.to_rgba8().ok_or_else(|| {
            anyhow::anyhow!(
                "{}x{} {:?} image needs {} bytes but has {}",
                img.width,
                img.height,
                img.format,
                img.expected_len(),
                img.pixels.len()
            )
        })?;
        let chain = mip_chain(base);
        let size = wgpu::Extent3d {
            width: img.width.max(1),
            height: img.height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: chain.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in chain.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                },
                mip.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * mip.width()),
                    rows_per_image: Some(mip.height()),
                },
                wgpu::Extent3d {
                    width: mip.width(),
                    height: mip.height(),
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_repeat_sampler(device);
        Ok(Self {
            texture,
            view,
            sampler,
            format: img.format,
        })
    }
}

pub fn create_repeat_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        ..Default::default()
    })
}
