//! Geometry and tiling filters.

use crate::analysis::{block_average, quadtree, voronoi};
use crate::dither::quantize_direct;
use crate::error::Result;
use crate::types::{BrickPalette, Colour, ParamSpec, PixelBuffer, ResolvedParams};

use super::{Filter, FilterCategory};

pub(crate) fn filters() -> Vec<Filter> {
    vec![
        Filter::new(
            "pixelate",
            "Pixelate",
            FilterCategory::Tiling,
            vec![ParamSpec::numeric("block", 2.0, 64.0, 8.0)],
            pixelate,
        ),
        Filter::new(
            "mosaic-tiles",
            "Mosaic Tiles",
            FilterCategory::Tiling,
            vec![
                ParamSpec::numeric("block", 4.0, 64.0, 10.0),
                ParamSpec::boolean("grout", true),
            ],
            mosaic_tiles,
        ),
        Filter::new(
            "voronoi",
            "Voronoi Cells",
            FilterCategory::Tiling,
            vec![
                ParamSpec::numeric("sites", 16.0, 4096.0, 256.0),
                ParamSpec::numeric("seed", 0.0, 1_000_000.0, 7.0),
            ],
            voronoi_filter,
        ),
        Filter::new(
            "quadtree",
            "Quadtree Blocks",
            FilterCategory::Tiling,
            vec![
                ParamSpec::numeric("detail", 0.0, 5000.0, 400.0),
                ParamSpec::numeric("min-size", 2.0, 64.0, 8.0),
            ],
            quadtree_filter,
        ),
        Filter::new(
            "brick-courses",
            "Brick Courses",
            FilterCategory::Tiling,
            vec![
                ParamSpec::numeric("height", 4.0, 32.0, 8.0),
                ParamSpec::boolean("mortar", true),
            ],
            brick_courses,
        ),
    ]
}

/// Fixed-grid block averaging followed by quantization.
fn pixelate(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let block = params.get_usize("block").max(1) as u32;
    let averaged = block_average(buffer, block);
    Ok(quantize_direct(&averaged, BrickPalette::standard()))
}

/// Pixelate with dark grout lines between the tiles.
fn mosaic_tiles(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let block = params.get_usize("block").max(2) as u32;

    let averaged = block_average(buffer, block);
    let mut out = quantize_direct(&averaged, palette);

    if params.get_bool("grout") {
        let grout = palette.nearest(Colour::BLACK).colour;
        for y in 0..out.height() {
            for x in 0..out.width() {
                if x % block == 0 || y % block == 0 {
                    let alpha = buffer.pixel(x, y).a;
                    out.set_pixel(x, y, grout.with_alpha(alpha));
                }
            }
        }
    }

    Ok(out)
}

/// Seeded Voronoi cells, quantized.
fn voronoi_filter(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let cells = voronoi(buffer, params.get_usize("sites"), params.get_seed("seed"));
    Ok(quantize_direct(&cells, BrickPalette::standard()))
}

/// Variance-driven quadtree blocks, quantized.
fn quadtree_filter(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let blocks = quadtree(
        buffer,
        params.get_number("detail"),
        params.get_usize("min-size").max(1) as u32,
    );
    Ok(quantize_direct(&blocks, BrickPalette::standard()))
}

/// Running-bond brickwork: rows of 2:1 bricks, alternate rows offset by
/// half a brick, each brick painted with its region's quantized mean.
fn brick_courses(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let course = params.get_usize("height").max(2) as u32;
    let brick_w = course * 2;
    let mortar_on = params.get_bool("mortar");
    let mortar = palette.nearest(Colour::rgb(99, 95, 97)).colour;

    let mut out = buffer.clone();

    let mut row = 0;
    let mut y0 = 0;
    while y0 < buffer.height() {
        let h = course.min(buffer.height() - y0);
        let offset = if row % 2 == 1 { course } else { 0 };

        // Brick segment boundaries for this course
        let mut x0 = 0;
        while x0 < buffer.width() {
            let next = ((x0 + offset) / brick_w + 1) * brick_w - offset;
            let x1 = next.min(buffer.width());
            let w = x1 - x0;

            // Mean colour over the brick face
            let mut sum = [0.0f32; 3];
            for y in y0..y0 + h {
                for x in x0..x1 {
                    let c = buffer.pixel(x, y);
                    sum[0] += c.r as f32;
                    sum[1] += c.g as f32;
                    sum[2] += c.b as f32;
                }
            }
            let n = (w * h) as f32;
            let face = palette
                .nearest(Colour::rgb(
                    (sum[0] / n).round() as u8,
                    (sum[1] / n).round() as u8,
                    (sum[2] / n).round() as u8,
                ))
                .colour;

            for y in y0..y0 + h {
                for x in x0..x1 {
                    let on_mortar = mortar_on
                        && (y == y0 || (x + offset) % brick_w == 0);
                    let colour = if on_mortar { mortar } else { face };
                    out.set_pixel(x, y, colour.with_alpha(buffer.pixel(x, y).a));
                }
            }

            x0 = x1;
        }

        row += 1;
        y0 += course;
    }

    Ok(out)
}
