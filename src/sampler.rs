//! Mosaic sampling.
//!
//! Downsamples a filtered full-resolution buffer into the final grid of
//! brick colours. Each grid cell samples the single source pixel nearest
//! its block centre (never an average, which would invent colours absent
//! from the filtered image and soften boundaries), then maps it through
//! the palette's nearest-colour lookup.

use crate::error::{BrixError, Result};
use crate::types::{BrickPalette, Mosaic, PixelBuffer};

/// Grid dimensions snap to multiples of this many studs.
pub const GRID_STEP: u32 = 16;

/// No mosaic side may exceed this many studs.
pub const MAX_SIDE: u32 = 512;

/// Derive mosaic grid dimensions from a source image and a requested stud
/// width.
///
/// Height follows the source aspect ratio. Both dimensions round
/// independently to the nearest multiple of 16 (minimum 16); if the longer
/// side would exceed 512 studs, both rescale uniformly and re-round.
pub fn grid_dimensions(source_width: u32, source_height: u32, target_width: u32) -> (u32, u32) {
    let aspect = if source_height == 0 {
        1.0
    } else {
        source_width as f32 / source_height as f32
    };

    let width = target_width as f32;
    let height = if aspect > 0.0 { width / aspect } else { width };

    let mut w = round_to_step(width);
    let mut h = round_to_step(height);

    let longest = w.max(h);
    if longest > MAX_SIDE {
        let scale = MAX_SIDE as f32 / longest as f32;
        w = round_to_step(w as f32 * scale).min(MAX_SIDE);
        h = round_to_step(h as f32 * scale).min(MAX_SIDE);
    }

    (w, h)
}

fn round_to_step(v: f32) -> u32 {
    let snapped = (v / GRID_STEP as f32).round() as u32 * GRID_STEP;
    snapped.max(GRID_STEP)
}

/// Sample a buffer onto a `grid_width` x `grid_height` mosaic.
///
/// Fails with `InvalidDimensions` when either grid dimension is zero.
pub fn sample_mosaic(
    buffer: &PixelBuffer,
    grid_width: u32,
    grid_height: u32,
    palette: &BrickPalette,
) -> Result<Mosaic> {
    if grid_width == 0 || grid_height == 0 || buffer.width() == 0 || buffer.height() == 0 {
        return Err(BrixError::InvalidDimensions {
            width: grid_width,
            height: grid_height,
        });
    }

    // Per-cell block size, not necessarily integral
    let cell_w = buffer.width() as f32 / grid_width as f32;
    let cell_h = buffer.height() as f32 / grid_height as f32;

    let mut cells = Vec::with_capacity(grid_width as usize * grid_height as usize);
    for gy in 0..grid_height {
        for gx in 0..grid_width {
            let sx = (((gx as f32 + 0.5) * cell_w) as u32).min(buffer.width() - 1);
            let sy = (((gy as f32 + 0.5) * cell_h) as u32).min(buffer.height() - 1);
            cells.push(palette.nearest(buffer.pixel(sx, sy)));
        }
    }

    Mosaic::new(grid_width, grid_height, cells)
}
