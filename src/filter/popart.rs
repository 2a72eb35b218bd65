//! Pattern and pop-art filters.

use crate::error::Result;
use crate::types::space::{hsv_to_rgb, rgb_to_hsv};
use crate::types::{BrickPalette, Colour, ParamSpec, PixelBuffer, ResolvedParams};

use super::{Filter, FilterCategory};

pub(crate) fn filters() -> Vec<Filter> {
    let palette_names: Vec<&'static str> = BrickPalette::standard().names().collect();

    vec![
        Filter::new(
            "duotone",
            "Duotone",
            FilterCategory::PopArt,
            vec![
                ParamSpec::choice("colour-a", palette_names.clone(), "black"),
                ParamSpec::choice("colour-b", palette_names, "white"),
                ParamSpec::numeric("threshold", 0.0, 255.0, 128.0),
                ParamSpec::boolean("halftone", false),
            ],
            duotone,
        ),
        Filter::new(
            "pop-dots",
            "Pop Dots",
            FilterCategory::PopArt,
            vec![ParamSpec::numeric("cell", 4.0, 32.0, 10.0)],
            pop_dots,
        ),
        Filter::new(
            "warhol",
            "Warhol Grid",
            FilterCategory::PopArt,
            vec![ParamSpec::numeric("hue-shift", 0.0, 360.0, 90.0)],
            warhol,
        ),
        Filter::new(
            "posterize",
            "Posterize",
            FilterCategory::PopArt,
            vec![ParamSpec::numeric("levels", 2.0, 8.0, 4.0)],
            posterize,
        ),
    ]
}

/// 4x4 Bayer thresholds reused for the duotone halftone screen.
const SCREEN_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Two-colour split at a luminance threshold, with an optional halftone
/// screen softening the boundary.
fn duotone(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let dark = named_or_nearest(palette, params.get_str("colour-a"), Colour::BLACK);
    let light = named_or_nearest(palette, params.get_str("colour-b"), Colour::WHITE);
    let threshold = params.get_number("threshold");
    let halftone = params.get_bool("halftone");

    let mut out = buffer.clone();
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let c = buffer.pixel(x, y);
            let cutoff = if halftone {
                let screen = SCREEN_4X4[y as usize % 4][x as usize % 4];
                threshold + (screen as f32 / 16.0 - 0.5) * 128.0
            } else {
                threshold
            };
            let chosen = if c.luminance() >= cutoff { light } else { dark };
            out.set_pixel(x, y, chosen.with_alpha(c.a));
        }
    }

    Ok(out)
}

fn named_or_nearest(palette: &BrickPalette, name: &str, fallback: Colour) -> Colour {
    palette
        .by_name(name)
        .map(|e| e.colour)
        .unwrap_or_else(|| palette.nearest(fallback).colour)
}

/// Ben-Day style dots: saturated cell-mean dots on a light ground.
fn pop_dots(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let cell = params.get_usize("cell").max(2) as u32;
    let ground = palette.nearest(Colour::WHITE).colour;
    let radius = cell as f32 * 0.42;

    let mut out = buffer.clone();

    let mut y0 = 0;
    while y0 < buffer.height() {
        let h = cell.min(buffer.height() - y0);
        let mut x0 = 0;
        while x0 < buffer.width() {
            let w = cell.min(buffer.width() - x0);

            let mut sum = [0.0f32; 3];
            for y in y0..y0 + h {
                for x in x0..x0 + w {
                    let c = buffer.pixel(x, y);
                    sum[0] += c.r as f32;
                    sum[1] += c.g as f32;
                    sum[2] += c.b as f32;
                }
            }
            let n = (w * h) as f32;
            let mean = Colour::rgb(
                (sum[0] / n).round() as u8,
                (sum[1] / n).round() as u8,
                (sum[2] / n).round() as u8,
            );

            // Punch up the cell colour before quantizing
            let (hue, s, v) = rgb_to_hsv(mean.r, mean.g, mean.b);
            let (r, g, b) = hsv_to_rgb(hue, (s * 1.6).min(1.0), v);
            let dot = palette.nearest(Colour::rgb(r, g, b)).colour;

            let cx = x0 as f32 + w as f32 / 2.0;
            let cy = y0 as f32 + h as f32 / 2.0;
            for y in y0..y0 + h {
                for x in x0..x0 + w {
                    let dx = x as f32 + 0.5 - cx;
                    let dy = y as f32 + 0.5 - cy;
                    let inside = dx * dx + dy * dy <= radius * radius;
                    let alpha = buffer.pixel(x, y).a;
                    let colour = if inside { dot } else { ground };
                    out.set_pixel(x, y, colour.with_alpha(alpha));
                }
            }

            x0 += cell;
        }
        y0 += cell;
    }

    Ok(out)
}

/// Four quadrants, each hue-rotated by a successive multiple of the shift,
/// then quantized. Dimensions are unchanged; only the recolouring varies
/// per quadrant.
fn warhol(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let shift = params.get_number("hue-shift");

    let half_w = buffer.width() / 2;
    let half_h = buffer.height() / 2;

    let mut out = buffer.clone();
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let c = buffer.pixel(x, y);
            let quadrant = match (x >= half_w, y >= half_h) {
                (false, false) => 0.0,
                (true, false) => 1.0,
                (false, true) => 2.0,
                (true, true) => 3.0,
            };

            let (hue, s, v) = rgb_to_hsv(c.r, c.g, c.b);
            let rotated = (hue + quadrant * shift).rem_euclid(360.0);
            let (r, g, b) = hsv_to_rgb(rotated, s, v);

            let quantized = palette.nearest(Colour::rgb(r, g, b)).colour;
            out.set_pixel(x, y, quantized.with_alpha(c.a));
        }
    }

    Ok(out)
}

/// Per-channel level reduction, then quantization.
fn posterize(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let steps = (params.get_usize("levels").max(2) - 1) as f32;

    Ok(buffer.map_pixels(|c| {
        let post = |v: u8| ((v as f32 / 255.0 * steps).round() / steps * 255.0).round() as u8;
        let reduced = Colour::rgb(post(c.r), post(c.g), post(c.b));
        palette.nearest(reduced).colour.with_alpha(c.a)
    }))
}
