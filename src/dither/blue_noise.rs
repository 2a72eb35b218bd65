//! Seeded noise-field dithering.
//!
//! A deterministic tileable noise field is generated from the shared LCG
//! and tiled over the image. Each pixel is offset by `noise * gain` on all
//! three channels before nearest-colour quantization, so a given seed
//! reproduces output bit-for-bit.

use crate::rng::Lcg;
use crate::types::{BrickPalette, Colour, PixelBuffer};

/// Side length of the tiled noise field.
const TILE: usize = 64;

/// Generate the TILE x TILE noise field, values in [-0.5, 0.5).
fn noise_field(seed: u32) -> Vec<f32> {
    let mut lcg = Lcg::new(seed);
    (0..TILE * TILE).map(|_| lcg.next_f32() - 0.5).collect()
}

/// Quantize a buffer with seeded noise-field dithering.
pub fn blue_noise(buffer: &PixelBuffer, palette: &BrickPalette, seed: u32, gain: f32) -> PixelBuffer {
    let field = noise_field(seed);
    let mut out = buffer.clone();

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let c = buffer.pixel(x, y);
            let noise = field[(y as usize % TILE) * TILE + (x as usize % TILE)];
            let offset = noise * gain;

            let perturbed = Colour::rgb(
                (c.r as f32 + offset).clamp(0.0, 255.0) as u8,
                (c.g as f32 + offset).clamp(0.0, 255.0) as u8,
                (c.b as f32 + offset).clamp(0.0, 255.0) as u8,
            );

            out.set_pixel(x, y, palette.nearest(perturbed).colour.with_alpha(c.a));
        }
    }

    out
}
