//! Dither and texture filters.

use crate::dither::{blue_noise, floyd_steinberg, ordered, MatrixSize};
use crate::error::Result;
use crate::types::{BrickPalette, Colour, ParamSpec, PixelBuffer, ResolvedParams};

use super::{Filter, FilterCategory};

pub(crate) fn filters() -> Vec<Filter> {
    vec![
        Filter::new(
            "floyd-steinberg",
            "Floyd-Steinberg",
            FilterCategory::Texture,
            vec![ParamSpec::boolean("perceptual", false)],
            floyd_steinberg_filter,
        ),
        Filter::new(
            "ordered-dither",
            "Ordered Dither",
            FilterCategory::Texture,
            vec![ParamSpec::choice("matrix", vec!["2", "4", "8"], "4")],
            ordered_filter,
        ),
        Filter::new(
            "blue-noise",
            "Blue Noise",
            FilterCategory::Texture,
            vec![
                ParamSpec::numeric("seed", 0.0, 1_000_000.0, 7.0),
                ParamSpec::numeric("gain", 0.0, 128.0, 48.0),
            ],
            blue_noise_filter,
        ),
        Filter::new(
            "halftone",
            "Halftone",
            FilterCategory::Texture,
            vec![ParamSpec::numeric("cell", 4.0, 32.0, 8.0)],
            halftone,
        ),
        Filter::new(
            "crosshatch",
            "Crosshatch",
            FilterCategory::Texture,
            vec![ParamSpec::numeric("spacing", 2.0, 16.0, 4.0)],
            crosshatch,
        ),
    ]
}

fn floyd_steinberg_filter(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    Ok(floyd_steinberg(
        buffer,
        BrickPalette::standard(),
        params.get_bool("perceptual"),
    ))
}

fn ordered_filter(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let size = MatrixSize::from_str_lossy(params.get_str("matrix"));
    Ok(ordered(buffer, BrickPalette::standard(), size))
}

fn blue_noise_filter(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    Ok(blue_noise(
        buffer,
        BrickPalette::standard(),
        params.get_seed("seed"),
        params.get_number("gain"),
    ))
}

/// Round dots on a light ground, sized by each cell's darkness and
/// coloured by its quantized mean.
fn halftone(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let cell = params.get_usize("cell").max(1) as u32;
    let ground = palette.nearest(Colour::WHITE).colour;

    let mut out = buffer.clone();

    let mut y0 = 0;
    while y0 < buffer.height() {
        let h = cell.min(buffer.height() - y0);
        let mut x0 = 0;
        while x0 < buffer.width() {
            let w = cell.min(buffer.width() - x0);

            // Cell mean colour and darkness
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
            let darkness = 1.0 - mean.luminance() / 255.0;
            let dot = palette.nearest(mean).colour;

            // Dot radius grows with darkness; a fully dark cell is covered
            let radius = cell as f32 * std::f32::consts::FRAC_1_SQRT_2 * darkness.sqrt();
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

/// Diagonal hatching that densifies through four luminance bands.
fn crosshatch(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let spacing = params.get_usize("spacing").max(2) as i64;
    let ink = palette.nearest(Colour::BLACK).colour;
    let ground = palette.nearest(Colour::WHITE).colour;

    let mut out = buffer.clone();

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let c = buffer.pixel(x, y);
            let lum = c.luminance();
            let xi = x as i64;
            let yi = y as i64;

            let mut hatched = false;
            if lum < 224.0 && (xi + yi).rem_euclid(spacing) == 0 {
                hatched = true;
            }
            if lum < 160.0 && (xi - yi).rem_euclid(spacing) == 0 {
                hatched = true;
            }
            if lum < 96.0 && xi.rem_euclid(spacing) == 0 {
                hatched = true;
            }
            if lum < 48.0 && yi.rem_euclid(spacing) == 0 {
                hatched = true;
            }

            let colour = if hatched { ink } else { ground };
            out.set_pixel(x, y, colour.with_alpha(c.a));
        }
    }

    Ok(out)
}
