//! Spatial segmentation.
//!
//! Three region strategies: fixed-grid block averaging, seeded Voronoi
//! colouring, and variance-driven quadtree subdivision. Each produces a new
//! buffer of flat-coloured regions with per-pixel alpha carried through.

use crate::rng::Lcg;
use crate::types::{Colour, PixelBuffer};

/// Average the RGB channels over a rectangular region.
fn region_mean(buffer: &PixelBuffer, x0: u32, y0: u32, w: u32, h: u32) -> [f32; 3] {
    let mut sum = [0.0f32; 3];
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let c = buffer.pixel(x, y);
            sum[0] += c.r as f32;
            sum[1] += c.g as f32;
            sum[2] += c.b as f32;
        }
    }
    let n = (w * h).max(1) as f32;
    [sum[0] / n, sum[1] / n, sum[2] / n]
}

/// Mean of the per-channel colour variances over a rectangular region.
fn region_variance(buffer: &PixelBuffer, x0: u32, y0: u32, w: u32, h: u32, mean: [f32; 3]) -> f32 {
    let mut sum = 0.0f32;
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let c = buffer.pixel(x, y);
            let dr = c.r as f32 - mean[0];
            let dg = c.g as f32 - mean[1];
            let db = c.b as f32 - mean[2];
            sum += dr * dr + dg * dg + db * db;
        }
    }
    sum / (3.0 * (w * h).max(1) as f32)
}

fn fill_region(out: &mut PixelBuffer, source: &PixelBuffer, x0: u32, y0: u32, w: u32, h: u32, mean: [f32; 3]) {
    let colour = Colour::rgb(
        mean[0].round().clamp(0.0, 255.0) as u8,
        mean[1].round().clamp(0.0, 255.0) as u8,
        mean[2].round().clamp(0.0, 255.0) as u8,
    );
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            out.set_pixel(x, y, colour.with_alpha(source.pixel(x, y).a));
        }
    }
}

/// Fixed-grid block averaging: every `block`-sized cell becomes its mean
/// colour. Partial cells at the right/bottom edges shrink to fit.
pub fn block_average(buffer: &PixelBuffer, block: u32) -> PixelBuffer {
    let block = block.max(1);
    let mut out = buffer.clone();

    let mut y = 0;
    while y < buffer.height() {
        let h = block.min(buffer.height() - y);
        let mut x = 0;
        while x < buffer.width() {
            let w = block.min(buffer.width() - x);
            let mean = region_mean(buffer, x, y, w, h);
            fill_region(&mut out, buffer, x, y, w, h, mean);
            x += block;
        }
        y += block;
    }

    out
}

/// Seeded Voronoi colouring: `sites` random cell centres are sampled through
/// the shared LCG, and every pixel takes the source colour at its nearest
/// site.
pub fn voronoi(buffer: &PixelBuffer, sites: usize, seed: u32) -> PixelBuffer {
    if buffer.width() == 0 || buffer.height() == 0 {
        return buffer.clone();
    }

    let sites = sites.max(1);
    let mut lcg = Lcg::new(seed);

    let centres: Vec<(u32, u32)> = (0..sites)
        .map(|_| {
            (
                lcg.next_below(buffer.width()),
                lcg.next_below(buffer.height()),
            )
        })
        .collect();
    let colours: Vec<Colour> = centres.iter().map(|&(x, y)| buffer.pixel(x, y)).collect();

    let mut out = buffer.clone();
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let mut best = 0;
            let mut best_dist = u64::MAX;
            for (i, &(sx, sy)) in centres.iter().enumerate() {
                let dx = x as i64 - sx as i64;
                let dy = y as i64 - sy as i64;
                let d = (dx * dx + dy * dy) as u64;
                if d < best_dist {
                    best_dist = d;
                    best = i;
                }
            }
            let alpha = buffer.pixel(x, y).a;
            out.set_pixel(x, y, colours[best].with_alpha(alpha));
        }
    }

    out
}

/// Quadtree segmentation: blocks whose colour variance exceeds `threshold`
/// split into four (possibly uneven) quadrants until they flatten out or
/// reach the `min_size` floor.
///
/// Driven by an explicit work-stack of sub-rectangles rather than
/// recursion, so depth is bounded on large images.
pub fn quadtree(buffer: &PixelBuffer, threshold: f32, min_size: u32) -> PixelBuffer {
    let min_size = min_size.max(1);
    let mut out = buffer.clone();

    let mut stack: Vec<(u32, u32, u32, u32)> = Vec::new();
    if buffer.width() > 0 && buffer.height() > 0 {
        stack.push((0, 0, buffer.width(), buffer.height()));
    }

    while let Some((x0, y0, w, h)) = stack.pop() {
        let mean = region_mean(buffer, x0, y0, w, h);
        let variance = region_variance(buffer, x0, y0, w, h, mean);

        if variance <= threshold || (w <= min_size && h <= min_size) {
            fill_region(&mut out, buffer, x0, y0, w, h, mean);
            continue;
        }

        // Split into quadrants; odd sizes leave the right/bottom halves
        // one pixel larger
        let wl = (w / 2).max(1);
        let ht = (h / 2).max(1);
        let wr = w - wl;
        let hb = h - ht;

        stack.push((x0, y0, wl, ht));
        if wr > 0 {
            stack.push((x0 + wl, y0, wr, ht));
        }
        if hb > 0 {
            stack.push((x0, y0 + ht, wl, hb));
        }
        if wr > 0 && hb > 0 {
            stack.push((x0 + wl, y0 + ht, wr, hb));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_average_uniform_cells() {
        // 4x4 image of distinct quadrant colours, block 2: each quadrant
        // is already flat so averaging is identity
        let mut buf = PixelBuffer::filled(4, 4, Colour::rgb(10, 10, 10));
        for y in 0..2 {
            for x in 2..4 {
                buf.set_pixel(x, y, Colour::rgb(200, 0, 0));
            }
        }
        let out = block_average(&buf, 2);
        assert_eq!(out.pixel(0, 0), Colour::rgb(10, 10, 10));
        assert_eq!(out.pixel(3, 0), Colour::rgb(200, 0, 0));
    }

    #[test]
    fn test_block_average_mixes_within_cell() {
        let mut buf = PixelBuffer::filled(2, 2, Colour::rgb(0, 0, 0));
        buf.set_pixel(0, 0, Colour::rgb(200, 100, 40));
        let out = block_average(&buf, 2);
        // Mean of one (200, 100, 40) and three blacks
        assert_eq!(out.pixel(0, 0), Colour::rgb(50, 25, 10));
        assert_eq!(out.pixel(1, 1), Colour::rgb(50, 25, 10));
    }

    #[test]
    fn test_block_average_partial_edge_cells() {
        // 5 wide with block 2 leaves a 1-wide edge column
        let mut buf = PixelBuffer::filled(5, 2, Colour::rgb(10, 10, 10));
        buf.set_pixel(4, 0, Colour::rgb(210, 210, 210));
        buf.set_pixel(4, 1, Colour::rgb(10, 10, 10));
        let out = block_average(&buf, 2);
        assert_eq!(out.pixel(4, 0), Colour::rgb(110, 110, 110));
        // Full cells untouched by the edge column
        assert_eq!(out.pixel(0, 0), Colour::rgb(10, 10, 10));
    }

    #[test]
    fn test_voronoi_reproducible_and_flat() {
        let mut buf = PixelBuffer::filled(16, 16, Colour::rgb(30, 60, 90));
        for y in 0..16 {
            for x in 8..16 {
                buf.set_pixel(x, y, Colour::rgb(220, 120, 20));
            }
        }

        let a = voronoi(&buf, 8, 11);
        let b = voronoi(&buf, 8, 11);
        assert_eq!(a, b);

        // Output colours are drawn from the source
        for c in a.pixels() {
            assert!(
                c == Colour::rgb(30, 60, 90) || c == Colour::rgb(220, 120, 20),
                "unexpected colour {:?}",
                c
            );
        }
    }

    #[test]
    fn test_voronoi_seeds_differ() {
        let mut buf = PixelBuffer::filled(16, 16, Colour::rgb(10, 10, 10));
        for y in 0..16 {
            for x in 0..16 {
                if (x + y) % 3 == 0 {
                    buf.set_pixel(x, y, Colour::rgb(240, 240, 240));
                }
            }
        }
        let a = voronoi(&buf, 6, 1);
        let b = voronoi(&buf, 6, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_quadtree_flat_image_single_region() {
        let buf = PixelBuffer::filled(16, 16, Colour::rgb(77, 88, 99));
        let out = quadtree(&buf, 10.0, 2);
        assert_eq!(out, buf);
    }

    #[test]
    fn test_quadtree_splits_detail() {
        // Sharp quadrant boundary forces splits; far corners stay flat
        let mut buf = PixelBuffer::filled(16, 16, Colour::rgb(0, 0, 0));
        for y in 0..8 {
            for x in 8..16 {
                buf.set_pixel(x, y, Colour::rgb(255, 255, 255));
            }
        }

        let out = quadtree(&buf, 10.0, 2);
        // The two flat quadrants keep their exact colours
        assert_eq!(out.pixel(2, 2), Colour::rgb(0, 0, 0));
        assert_eq!(out.pixel(12, 2), Colour::rgb(255, 255, 255));
    }

    #[test]
    fn test_quadtree_respects_min_size() {
        // Noisy image with a huge threshold floor: regions never shrink
        // below min_size even though variance stays high
        let mut buf = PixelBuffer::filled(8, 8, Colour::rgb(0, 0, 0));
        for y in 0..8 {
            for x in 0..8 {
                if (x + y) % 2 == 0 {
                    buf.set_pixel(x, y, Colour::rgb(255, 255, 255));
                }
            }
        }

        let out = quadtree(&buf, 0.0, 4);
        // Every 4x4 region of the checkerboard averages to mid-grey
        for c in out.pixels() {
            assert_eq!((c.r, c.g, c.b), (128, 128, 128));
        }
    }

    #[test]
    fn test_uneven_split_covers_whole_image() {
        // Odd dimensions: quadrants are uneven but the union must cover
        // every pixel (no stripe of untouched source)
        let mut buf = PixelBuffer::filled(7, 5, Colour::rgb(10, 10, 10));
        buf.set_pixel(6, 4, Colour::rgb(250, 250, 250));

        let out = quadtree(&buf, 1.0, 1);
        // All pixels rewritten to region means; the bright pixel's 1x1
        // region keeps its value
        assert_eq!(out.pixel(6, 4), Colour::rgb(250, 250, 250));
        assert_eq!(out.pixel(0, 0), Colour::rgb(10, 10, 10));
    }
}
