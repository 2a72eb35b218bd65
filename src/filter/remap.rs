//! Palette remap filters: direct quantization variants.

use crate::analysis::bilateral;
use crate::dither::{quantize, DitherMethod};
use crate::error::Result;
use crate::types::{BrickColour, BrickPalette, Colour, ParamSpec, PixelBuffer, ResolvedParams};

use super::{Filter, FilterCategory};

pub(crate) fn filters() -> Vec<Filter> {
    vec![
        Filter::new(
            "clean-quantize",
            "Clean Quantize",
            FilterCategory::PaletteRemap,
            vec![ParamSpec::choice(
                "dithering",
                vec!["none", "floyd-steinberg", "ordered", "blue-noise"],
                "none",
            )],
            clean_quantize,
        ),
        Filter::new(
            "perceptual-quantize",
            "Perceptual Quantize",
            FilterCategory::PaletteRemap,
            vec![ParamSpec::boolean("smoothing", false)],
            perceptual_quantize,
        ),
        Filter::new(
            "grayscale",
            "Grayscale",
            FilterCategory::PaletteRemap,
            vec![ParamSpec::numeric("contrast", -1.0, 1.0, 0.0)],
            grayscale,
        ),
        Filter::new(
            "sepia",
            "Sepia",
            FilterCategory::PaletteRemap,
            vec![ParamSpec::numeric("intensity", 0.0, 1.0, 1.0)],
            sepia,
        ),
    ]
}

/// Nearest-colour remap with optional dithering.
fn clean_quantize(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let method = DitherMethod::from_str_lossy(params.get_str("dithering"));
    Ok(quantize(buffer, BrickPalette::standard(), method))
}

/// Nearest-colour remap in Lab space, with an optional edge-preserving
/// pre-blur to suppress speckle.
fn perceptual_quantize(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let source = if params.get_bool("smoothing") {
        bilateral(buffer, 2, 2.0, 30.0)
    } else {
        buffer.clone()
    };
    Ok(source.map_pixels(|c| palette.nearest_lab(c).colour.with_alpha(c.a)))
}

/// The neutral ramp entry whose luminance is closest to `lum`.
pub(super) fn nearest_neutral(ramp: &[BrickColour], lum: f32) -> BrickColour {
    let mut best = ramp[0];
    let mut best_diff = f32::MAX;
    for e in ramp {
        let diff = (e.colour.luminance() - lum).abs();
        if diff < best_diff {
            best_diff = diff;
            best = *e;
        }
    }
    best
}

/// Luminance mapped onto the palette's neutral ramp.
fn grayscale(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let ramp = BrickPalette::standard().neutral_ramp();
    let boost = params.get_number("contrast");

    Ok(buffer.map_pixels(|c| {
        let mut lum = c.luminance();
        if boost != 0.0 {
            lum = ((lum - 128.0) * (1.0 + boost) + 128.0).clamp(0.0, 255.0);
        }
        nearest_neutral(&ramp, lum).colour.with_alpha(c.a)
    }))
}

/// Classic sepia tone, blended by intensity, then quantized.
fn sepia(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let intensity = params.get_number("intensity");
    let keep = 1.0 - intensity;

    Ok(buffer.map_pixels(|c| {
        let (r, g, b) = (c.r as f32, c.g as f32, c.b as f32);
        let tr = (0.393 * r + 0.769 * g + 0.189 * b).min(255.0);
        let tg = (0.349 * r + 0.686 * g + 0.168 * b).min(255.0);
        let tb = (0.272 * r + 0.534 * g + 0.131 * b).min(255.0);

        let toned = Colour::rgb(
            (r * keep + tr * intensity).round() as u8,
            (g * keep + tg * intensity).round() as u8,
            (b * keep + tb * intensity).round() as u8,
        );
        palette.nearest(toned).colour.with_alpha(c.a)
    }))
}
