//! Owned RGBA pixel buffer.
//!
//! Every pipeline stage consumes a complete buffer and allocates a fresh
//! output; buffers are never mutated in place once handed to a transform.
//! Interop with `image::RgbaImage` exists only at the host boundary.

use image::RgbaImage;

use crate::error::{BrixError, Result};

use super::Colour;

/// An interleaved RGBA pixel buffer, row-major.
///
/// Invariant: `bytes.len() == width * height * 4`, checked at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw interleaved RGBA bytes.
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(BrixError::MalformedBuffer {
                width,
                height,
                len: bytes.len(),
                expected,
            });
        }
        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    /// Create a buffer filled with a single colour.
    pub fn filled(width: u32, height: u32, colour: Colour) -> Self {
        let mut bytes = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            bytes.extend_from_slice(&colour.to_rgba());
        }
        Self {
            width,
            height,
            bytes,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The raw interleaved bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The colour at (x, y). Coordinates must be in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Colour {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Colour::from_rgba([
            self.bytes[i],
            self.bytes[i + 1],
            self.bytes[i + 2],
            self.bytes[i + 3],
        ])
    }

    /// The colour at (x, y), clamping out-of-range coordinates to the
    /// nearest edge (never wrapping).
    pub fn pixel_clamped(&self, x: i64, y: i64) -> Colour {
        if self.width == 0 || self.height == 0 {
            return Colour::new(0, 0, 0, 0);
        }
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.pixel(cx, cy)
    }

    /// Overwrite the colour at (x, y). Coordinates must be in bounds.
    ///
    /// Used by transforms while assembling their own fresh output buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Colour) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.bytes[i..i + 4].copy_from_slice(&colour.to_rgba());
    }

    /// Apply a per-pixel colour mapping, producing a new buffer.
    pub fn map_pixels(&self, mut f: impl FnMut(Colour) -> Colour) -> PixelBuffer {
        let mut bytes = Vec::with_capacity(self.bytes.len());
        for chunk in self.bytes.chunks_exact(4) {
            let c = f(Colour::from_rgba([chunk[0], chunk[1], chunk[2], chunk[3]]));
            bytes.extend_from_slice(&c.to_rgba());
        }
        Self {
            width: self.width,
            height: self.height,
            bytes,
        }
    }

    /// Iterate over all pixels in raster order.
    pub fn pixels(&self) -> impl Iterator<Item = Colour> + '_ {
        self.bytes
            .chunks_exact(4)
            .map(|c| Colour::from_rgba([c[0], c[1], c[2], c[3]]))
    }

    /// Convert a decoded host image into a pixel buffer.
    pub fn from_image(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            bytes: image.as_raw().clone(),
        }
    }

    /// Convert back to a host image (e.g. for preview encoding).
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.bytes.clone())
            .expect("buffer length invariant")
    }
}
