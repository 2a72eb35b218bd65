//! Bilateral filtering.
//!
//! An edge-preserving blur: each output pixel is a weighted average of its
//! neighbours within a radius, where the weight is the product of a spatial
//! Gaussian over pixel distance and a range Gaussian over RGB distance.
//! Flat regions smooth out while strong colour boundaries survive.

use crate::types::{Colour, PixelBuffer};

/// Apply a bilateral blur. Alpha passes through unchanged.
pub fn bilateral(
    buffer: &PixelBuffer,
    radius: u32,
    sigma_spatial: f32,
    sigma_range: f32,
) -> PixelBuffer {
    let sigma_spatial = sigma_spatial.max(0.1);
    let sigma_range = sigma_range.max(0.1);

    let spatial_div = 2.0 * sigma_spatial * sigma_spatial;
    let range_div = 2.0 * sigma_range * sigma_range;

    let r = radius as i64;
    let mut out = buffer.clone();

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let centre = buffer.pixel(x, y);

            let mut sum = [0.0f32; 3];
            let mut total_weight = 0.0f32;

            for dy in -r..=r {
                for dx in -r..=r {
                    let neighbour = buffer.pixel_clamped(x as i64 + dx, y as i64 + dy);

                    let spatial = (dx * dx + dy * dy) as f32;
                    let range = centre.distance_sq(neighbour) as f32;
                    let weight = (-spatial / spatial_div - range / range_div).exp();

                    sum[0] += neighbour.r as f32 * weight;
                    sum[1] += neighbour.g as f32 * weight;
                    sum[2] += neighbour.b as f32 * weight;
                    total_weight += weight;
                }
            }

            let blurred = Colour::new(
                (sum[0] / total_weight).round().clamp(0.0, 255.0) as u8,
                (sum[1] / total_weight).round().clamp(0.0, 255.0) as u8,
                (sum[2] / total_weight).round().clamp(0.0, 255.0) as u8,
                centre.a,
            );
            out.set_pixel(x, y, blurred);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_image_unchanged() {
        let buf = PixelBuffer::filled(8, 8, Colour::rgb(90, 120, 150));
        let out = bilateral(&buf, 2, 2.0, 30.0);
        assert_eq!(out, buf);
    }

    #[test]
    fn test_speckle_smoothed_into_background() {
        let mut buf = PixelBuffer::filled(9, 9, Colour::rgb(100, 100, 100));
        buf.set_pixel(4, 4, Colour::rgb(120, 120, 120));

        let out = bilateral(&buf, 2, 2.0, 40.0);
        let centre = out.pixel(4, 4);
        // The outlier moves toward its neighbourhood
        assert!(centre.r < 120);
        assert!(centre.r >= 100);
    }

    #[test]
    fn test_strong_boundary_preserved() {
        // Black/white step: range weighting keeps the sides apart
        let mut buf = PixelBuffer::filled(10, 10, Colour::BLACK);
        for y in 0..10 {
            for x in 5..10 {
                buf.set_pixel(x, y, Colour::WHITE);
            }
        }

        let out = bilateral(&buf, 2, 2.0, 20.0);
        // Pixels adjacent to the boundary stay close to their own side
        assert!(out.pixel(4, 5).r < 30, "dark side bled: {:?}", out.pixel(4, 5));
        assert!(out.pixel(5, 5).r > 225, "light side bled: {:?}", out.pixel(5, 5));
    }

    #[test]
    fn test_alpha_passes_through() {
        let mut buf = PixelBuffer::filled(5, 5, Colour::new(100, 100, 100, 42));
        buf.set_pixel(2, 2, Colour::new(140, 100, 100, 200));
        let out = bilateral(&buf, 1, 1.0, 50.0);
        assert_eq!(out.pixel(2, 2).a, 200);
        assert_eq!(out.pixel(0, 0).a, 42);
    }

    #[test]
    fn test_radius_zero_is_identity() {
        let mut buf = PixelBuffer::filled(4, 4, Colour::rgb(10, 20, 30));
        buf.set_pixel(1, 1, Colour::rgb(200, 10, 60));
        let out = bilateral(&buf, 0, 2.0, 30.0);
        assert_eq!(out, buf);
    }
}
