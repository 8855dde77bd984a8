use std::path::Path;

use anyhow::Context as _;

use crate::error::{StencilError, StencilResult};

pub type Rgba8 = [u8; 4];

/// A straight-alpha RGBA8 pixel grid, row-major, 4 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl ImageRGBA {
    /// Fully transparent grid of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
        }
    }

    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> StencilResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(StencilError::validation(
                "rgba8 buffer length does not match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode a PNG (or any format `image` understands) into straight-alpha RGBA8.
    pub fn load(path: &Path) -> StencilResult<Self> {
        let dyn_img = image::ImageReader::open(path)
            .with_context(|| format!("open image '{}'", path.display()))?
            .decode()
            .with_context(|| format!("decode image '{}'", path.display()))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            data: rgba.into_raw(),
        })
    }

    pub fn save_png(&self, path: &Path) -> StencilResult<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * 4
    }
}

/// Straight-alpha source-over: `src` composited onto `dst`.
///
/// A fully transparent source leaves `dst` untouched; a fully opaque source
/// replaces it.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da_scaled = mul_div255(u16::from(dst[3]), 255 - sa);
    let out_a = sa + u16::from(da_scaled);
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    out[3] = out_a as u8;
    for i in 0..3 {
        let num =
            u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(da_scaled);
        out[i] = ((num + u32::from(out_a) / 2) / u32::from(out_a)) as u8;
    }
    out
}

/// Composite `src` over `dst` across two equal-length RGBA8 buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> StencilResult<()> {
    if dst.len() != src.len() || dst.len() % 4 != 0 {
        return Err(StencilError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
