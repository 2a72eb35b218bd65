//! Colour quantization and dithering strategies.
//!
//! Every strategy consumes an RGBA buffer plus the palette and returns a
//! new buffer of identical dimensions containing only palette colours, with
//! each pixel's source alpha carried through.

mod blue_noise;
mod error_diffusion;
mod ordered;

pub use blue_noise::blue_noise;
pub use error_diffusion::floyd_steinberg;
pub use ordered::{ordered, MatrixSize};

use std::fmt;

use crate::types::{BrickPalette, PixelBuffer};

/// Dithering method for colour quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherMethod {
    /// No dithering; direct nearest-colour mapping.
    None,
    /// Floyd-Steinberg error diffusion.
    FloydSteinberg,
    /// Ordered dithering with the Bayer 4x4 threshold matrix.
    Ordered,
    /// Seeded tileable noise-field dithering.
    BlueNoise,
}

impl DitherMethod {
    /// Parse a dither method from a string.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "floyd-steinberg" | "fs" => DitherMethod::FloydSteinberg,
            "ordered" | "bayer" => DitherMethod::Ordered,
            "blue-noise" => DitherMethod::BlueNoise,
            _ => DitherMethod::None,
        }
    }
}

impl fmt::Display for DitherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherMethod::None => write!(f, "none"),
            DitherMethod::FloydSteinberg => write!(f, "floyd-steinberg"),
            DitherMethod::Ordered => write!(f, "ordered"),
            DitherMethod::BlueNoise => write!(f, "blue-noise"),
        }
    }
}

/// Direct quantization without dithering: each pixel maps to the nearest
/// palette colour.
pub fn quantize_direct(buffer: &PixelBuffer, palette: &BrickPalette) -> PixelBuffer {
    buffer.map_pixels(|c| palette.nearest(c).colour.with_alpha(c.a))
}

/// Quantize with the given method, using each strategy's default tuning.
pub fn quantize(buffer: &PixelBuffer, palette: &BrickPalette, method: DitherMethod) -> PixelBuffer {
    match method {
        DitherMethod::None => quantize_direct(buffer, palette),
        DitherMethod::FloydSteinberg => floyd_steinberg(buffer, palette, false),
        DitherMethod::Ordered => ordered(buffer, palette, MatrixSize::Four),
        DitherMethod::BlueNoise => blue_noise(buffer, palette, 7, 48.0),
    }
}

/// Check that every pixel of a buffer is a palette colour (ignoring alpha).
#[cfg(test)]
pub(crate) fn is_palette_pure(buffer: &PixelBuffer, palette: &BrickPalette) -> bool {
    buffer
        .pixels()
        .all(|c| palette.entries().iter().any(|e| e.colour.r == c.r && e.colour.g == c.g && e.colour.b == c.b))
}
