//! Floyd-Steinberg error diffusion dithering.
//!
//! Processes pixels in raster order, left-to-right, top-to-bottom. After
//! quantizing each (possibly already-perturbed) pixel, the error is
//! distributed to the unvisited neighbours:
//!
//! ```text
//!        *   7/16
//!  3/16 5/16 1/16
//! ```
//!
//! Perturbed channels are clamped to [0, 255]; writes that would land
//! outside the image are dropped rather than wrapped. The scan is
//! intrinsically sequential: each pixel depends on error accumulated from
//! already-visited neighbours.

use crate::types::{BrickPalette, Colour, PixelBuffer};

/// Error weights for the four unvisited neighbours (dx, dy, weight).
const KERNEL: [(i32, i32, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Quantize a buffer with Floyd-Steinberg error diffusion.
///
/// With `perceptual` set, the nearest-colour lookup runs in Lab space;
/// error is always diffused in RGB.
pub fn floyd_steinberg(
    buffer: &PixelBuffer,
    palette: &BrickPalette,
    perceptual: bool,
) -> PixelBuffer {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;

    // f32 working copy of the RGB channels for error accumulation
    let mut work: Vec<[f32; 3]> = buffer
        .pixels()
        .map(|c| [c.r as f32, c.g as f32, c.b as f32])
        .collect();

    let mut out = buffer.clone();

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let perturbed = Colour::rgb(work[i][0] as u8, work[i][1] as u8, work[i][2] as u8);

            let chosen = if perceptual {
                palette.nearest_lab(perturbed)
            } else {
                palette.nearest(perturbed)
            };

            let alpha = buffer.pixel(x as u32, y as u32).a;
            out.set_pixel(x as u32, y as u32, chosen.colour.with_alpha(alpha));

            let err = [
                work[i][0] - chosen.colour.r as f32,
                work[i][1] - chosen.colour.g as f32,
                work[i][2] - chosen.colour.b as f32,
            ];

            for (dx, dy, weight) in KERNEL {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || nx >= width as i32 || ny >= height as i32 {
                    continue;
                }
                let ni = ny as usize * width + nx as usize;
                for ch in 0..3 {
                    work[ni][ch] = (work[ni][ch] + err[ch] * weight).clamp(0.0, 255.0);
                }
            }
        }
    }

    out
}
