use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::SvgaResult;

#[derive(Clone, Debug, PartialEq)]
/// Decoded raster in premultiplied RGBA8 form. Cloning shares the pixel buffer.
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Build from premultiplied bytes; the length must match `width * height * 4`.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> Option<Self> {
        if rgba8_premul.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Solid-colour raster, mostly for overrides and tests.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let px = premul_px(rgba);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(px.repeat(width as usize * height as usize)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Raster decoding collaborator.
pub trait RasterDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> SvgaResult<RasterImage>;
}

/// Decoder backed by the `image` crate (PNG, JPEG, WebP, ...).
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageRasterDecoder;

impl RasterDecoder for ImageRasterDecoder {
    fn decode(&self, bytes: &[u8]) -> SvgaResult<RasterImage> {
        decode_image(bytes)
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> SvgaResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(RasterImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premul_px(rgba: [u8; 4]) -> [u8; 4] {
    let mut px = rgba;
    premultiply_rgba8_in_place(&mut px);
    px
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decode/raster.rs"]
mod tests;
