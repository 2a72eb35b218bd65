//! Content-aware heuristic filters.
//!
//! These approximate subject/background separation with cheap heuristics
//! (centre weighting, skin-tone hue windows, luminance histograms). There
//! is no real face or object detection here.

use crate::analysis::block_average;
use crate::dither::{floyd_steinberg, quantize_direct};
use crate::error::Result;
use crate::types::space::rgb_to_hsv;
use crate::types::{BrickPalette, Colour, ParamSpec, PixelBuffer, ResolvedParams};

use super::{Filter, FilterCategory};

pub(crate) fn filters() -> Vec<Filter> {
    vec![
        Filter::new(
            "portrait-pop",
            "Portrait Pop",
            FilterCategory::ContentAware,
            vec![ParamSpec::numeric("sensitivity", 0.0, 1.0, 0.5)],
            portrait_pop,
        ),
        Filter::new(
            "focus-center",
            "Focus Center",
            FilterCategory::ContentAware,
            vec![ParamSpec::numeric("radius", 0.1, 1.0, 0.6)],
            focus_center,
        ),
        Filter::new(
            "auto-contrast",
            "Auto Contrast",
            FilterCategory::ContentAware,
            vec![ParamSpec::numeric("clip", 0.0, 10.0, 2.0)],
            auto_contrast,
        ),
    ]
}

/// Crude skin-tone test: warm hue with moderate saturation.
fn skin_like(c: Colour) -> bool {
    let (h, s, v) = rgb_to_hsv(c.r, c.g, c.b);
    (h < 50.0 || h > 340.0) && (0.15..=0.75).contains(&s) && v > 0.2
}

/// Keep dithered detail on the centre-weighted skin-tone region, flatten
/// everything else into averaged blocks.
fn portrait_pop(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let sensitivity = params.get_number("sensitivity");

    let detail = floyd_steinberg(buffer, palette, false);
    let flat = quantize_direct(&block_average(buffer, 8), palette);

    let cx = buffer.width() as f32 / 2.0;
    let cy = buffer.height() as f32 / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);
    // Higher sensitivity widens the accepted subject region
    let reach = 0.35 + 0.45 * sensitivity;

    let mut out = buffer.clone();
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let c = buffer.pixel(x, y);
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let centred = (dx * dx + dy * dy).sqrt() / max_dist <= reach;

            let subject = centred && skin_like(c);
            let chosen = if subject {
                detail.pixel(x, y)
            } else {
                flat.pixel(x, y)
            };
            out.set_pixel(x, y, chosen);
        }
    }

    Ok(out)
}

/// Sharp quantization inside a centre radius, averaged blocks outside.
fn focus_center(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let radius = params.get_number("radius");

    let sharp = quantize_direct(buffer, palette);
    let soft = quantize_direct(&block_average(buffer, 8), palette);

    let cx = buffer.width() as f32 / 2.0;
    let cy = buffer.height() as f32 / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);

    let mut out = buffer.clone();
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let inside = (dx * dx + dy * dy).sqrt() / max_dist <= radius;
            let chosen = if inside {
                sharp.pixel(x, y)
            } else {
                soft.pixel(x, y)
            };
            out.set_pixel(x, y, chosen);
        }
    }

    Ok(out)
}

/// Stretch the luminance range (with percentile clipping) before
/// quantization.
fn auto_contrast(buffer: &PixelBuffer, params: &ResolvedParams) -> Result<PixelBuffer> {
    let palette = BrickPalette::standard();
    let clip = params.get_number("clip") / 100.0;

    let mut histogram = [0usize; 256];
    let mut total = 0usize;
    for c in buffer.pixels() {
        histogram[c.luminance().round().clamp(0.0, 255.0) as usize] += 1;
        total += 1;
    }

    if total == 0 {
        return Ok(buffer.clone());
    }

    let clip_count = (total as f32 * clip) as usize;
    let mut low = 0usize;
    let mut seen = 0usize;
    for (i, &count) in histogram.iter().enumerate() {
        seen += count;
        if seen > clip_count {
            low = i;
            break;
        }
    }
    let mut high = 255usize;
    seen = 0;
    for (i, &count) in histogram.iter().enumerate().rev() {
        seen += count;
        if seen > clip_count {
            high = i;
            break;
        }
    }

    if high <= low {
        return Ok(quantize_direct(buffer, palette));
    }

    let scale = 255.0 / (high - low) as f32;
    Ok(buffer.map_pixels(|c| {
        let stretch = |v: u8| ((v as f32 - low as f32) * scale).round().clamp(0.0, 255.0) as u8;
        let stretched = Colour::rgb(stretch(c.r), stretch(c.g), stretch(c.b));
        palette.nearest(stretched).colour.with_alpha(c.a)
    }))
}
