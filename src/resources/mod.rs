use std::path::{Path, PathBuf};

use crate::{
    data_structures::texture::{DecodedImage, PixelFormat},
    resources::texture::TextureError,
};

/**
 * This module contains all logic for loading textures from external files and
 * keeping the scene's textures and materials registered under their tags.
 */
pub mod material;
pub mod texture;

/// Resolve `file_name` under the asset directory.
pub fn asset_path(root: &Path, file_name: &str) -> PathBuf {
    root.join(file_name)
}

/// Decode an image file into 8-bit rows, flipped vertically so row 0 is the
/// bottom of the picture.
///
/// Only 3- and 4-channel images are accepted; anything else is reported as
/// [`TextureError::UnsupportedChannels`].
pub fn load_image(path: &Path) -> Result<DecodedImage, TextureError> {
    let img = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let channels = img.color().channel_count();
    let format =
        PixelFormat::from_channels(channels).ok_or_else(|| TextureError::UnsupportedChannels {
            path: path.to_path_buf(),
            channels,
        })?;
    let img = img.flipv();
    let (width, height) = (img.width(), img.height());
    let pixels = match format {
        PixelFormat::Rgb8 => img.into_rgb8().into_raw(),
        PixelFormat::Rgba8 => img.into_rgba8().into_raw(),
    };

    Ok(DecodedImage {
        width,
        height,
        format,
        pixels,
    })
}
