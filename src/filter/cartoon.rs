//! Edge and cartoon filters.

use crate::analysis::{bilateral, kmeans, sobel};
use crate::dither::quantize_direct;
use crate::error::Result;
use crate::types::{BrickPalette, Colour, ParamSpec, PixelBuffer, ResolvedParams};

use super::remap::nearest_neutral;
use super::{Filter, FilterCategory};

pub(crate) fn filters() -> Vec<Filter> {
    vec![
        Filter::new(
            "edge-outline",
            "Edge Outline",
            FilterCategory::Cartoon,
            vec![
                ParamSpec::numeric("threshold", 0.0, 512.0, 128.0),
                ParamSpec::choice("background", vec!["colour", "white"], "colour"),
            ],
            edge_outline,
        ),
        Filter::new(
            "cartoon",
            "Cartoon",
            FilterCategory::Cartoon,
            vec![
                ParamSpec::numeric("smoothing", 1.0, 5.0, 2.0),
                ParamSpec::numeric("edge-threshold", 0.0, 512.0, 160.0),
            ],
            cartoon,
        ),
        Filter::new(
            "comic",
            "Comic",
            FilterCategory::Cartoon,
            vec![
                ParamSpec::numeric("levels", 2.0, 6.0, 3.0),
                ParamSpec::numeric("edge-threshold", 0.0, 512.0, 200.0),
                ParamSpec::numeric("seed", 0.0, 1_000_000.0, 7.0),
            ],
            comic,
        ),
        Filter::new(
            "sketch",
            "Sketch",
            FilterCategory::Cartoon,
            vec![ParamSpec::boolean("invert", false)],
            sketch,
        ),
    ]
}

/// Sobel edges inked over a quantized (or blank) ground.
fn edge_outline(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let threshold = params.get_number("threshold");
    let ink = palette.nearest(Colour::BLACK).colour;

    let base = match params.get_str("background") {
        "white" => {
            let ground = palette.nearest(Colour::WHITE).colour;
            buffer.map_pixels(|c| ground.with_alpha(c.a))
        }
        _ => quantize_direct(buffer, palette),
    };

    let edges = sobel(buffer);
    let mut out = base;
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            if edges.magnitude(x, y) > threshold {
                let alpha = buffer.pixel(x, y).a;
                out.set_pixel(x, y, ink.with_alpha(alpha));
            }
        }
    }

    Ok(out)
}

/// Bilateral smoothing, quantization, then inked edges: flat regions with
/// dark outlines.
fn cartoon(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let radius = params.get_usize("smoothing").max(1) as u32;
    let threshold = params.get_number("edge-threshold");
    let ink = palette.nearest(Colour::BLACK).colour;

    let smoothed = bilateral(buffer, radius, radius as f32, 35.0);
    let mut out = quantize_direct(&smoothed, palette);

    let edges = sobel(&smoothed);
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            if edges.magnitude(x, y) > threshold {
                let alpha = buffer.pixel(x, y).a;
                out.set_pixel(x, y, ink.with_alpha(alpha));
            }
        }
    }

    Ok(out)
}

/// Dominant-colour flattening (seeded k-means) with inked edges.
fn comic(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let levels = params.get_usize("levels").max(2);
    let threshold = params.get_number("edge-threshold");
    let ink = palette.nearest(Colour::BLACK).colour;

    let clustering = kmeans(buffer, levels, params.get_seed("seed"));
    let flattened = clustering.recolour(buffer);

    let mut out = quantize_direct(&flattened, palette);
    let edges = sobel(buffer);
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            if edges.magnitude(x, y) > threshold {
                let alpha = buffer.pixel(x, y).a;
                out.set_pixel(x, y, ink.with_alpha(alpha));
            }
        }
    }

    Ok(out)
}

/// Pencil-sketch look: edge magnitude mapped onto the neutral ramp.
fn sketch(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let ramp = BrickPalette::standard().neutral_ramp();
    let invert = params.get_bool("invert");

    // Largest possible Sobel response on a [0, 255] luminance field
    let full_scale = 1020.0 * std::f32::consts::SQRT_2;

    let edges = sobel(buffer);
    let mut out = buffer.clone();
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let strength = (edges.magnitude(x, y) / full_scale * 4.0).min(1.0);
            let tone = if invert {
                strength * 255.0
            } else {
                (1.0 - strength) * 255.0
            };
            let alpha = buffer.pixel(x, y).a;
            out.set_pixel(x, y, nearest_neutral(&ramp, tone).colour.with_alpha(alpha));
        }
    }

    Ok(out)
}
