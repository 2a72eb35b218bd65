//! Sobel edge detection.
//!
//! The 3x3 kernels
//!
//! ```text
//! Gx = [-1 0 1]   Gy = [-1 -2 -1]
//!      [-2 0 2]        [ 0  0  0]
//!      [-1 0 1]        [ 1  2  1]
//! ```
//!
//! are applied to the BT.601 luminance field with edge-clamped sampling,
//! producing per-pixel gradient magnitude and direction.

use crate::types::PixelBuffer;

/// Per-pixel gradient magnitude and direction.
#[derive(Debug, Clone)]
pub struct EdgeMap {
    width: u32,
    height: u32,
    magnitude: Vec<f32>,
    direction: Vec<f32>,
}

impl EdgeMap {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Gradient magnitude at (x, y).
    pub fn magnitude(&self, x: u32, y: u32) -> f32 {
        self.magnitude[(y * self.width + x) as usize]
    }

    /// Gradient direction at (x, y), in radians from `atan2(gy, gx)`.
    pub fn direction(&self, x: u32, y: u32) -> f32 {
        self.direction[(y * self.width + x) as usize]
    }

    /// The largest magnitude in the map (0.0 for an empty image).
    pub fn max_magnitude(&self) -> f32 {
        self.magnitude.iter().copied().fold(0.0, f32::max)
    }
}

/// Run the Sobel operator over a buffer's luminance field.
pub fn sobel(buffer: &PixelBuffer) -> EdgeMap {
    let width = buffer.width();
    let height = buffer.height();

    let lum: Vec<f32> = buffer.pixels().map(|c| c.luminance()).collect();

    // Edge-clamped luminance sample
    let sample = |x: i64, y: i64| -> f32 {
        if width == 0 || height == 0 {
            return 0.0;
        }
        let cx = x.clamp(0, width as i64 - 1) as usize;
        let cy = y.clamp(0, height as i64 - 1) as usize;
        lum[cy * width as usize + cx]
    };

    let mut magnitude = Vec::with_capacity(lum.len());
    let mut direction = Vec::with_capacity(lum.len());

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let tl = sample(x - 1, y - 1);
            let t = sample(x, y - 1);
            let tr = sample(x + 1, y - 1);
            let l = sample(x - 1, y);
            let r = sample(x + 1, y);
            let bl = sample(x - 1, y + 1);
            let b = sample(x, y + 1);
            let br = sample(x + 1, y + 1);

            let gx = -tl + tr - 2.0 * l + 2.0 * r - bl + br;
            let gy = -tl - 2.0 * t - tr + bl + 2.0 * b + br;

            magnitude.push((gx * gx + gy * gy).sqrt());
            direction.push(gy.atan2(gx));
        }
    }

    EdgeMap {
        width,
        height,
        magnitude,
        direction,
    }
}
