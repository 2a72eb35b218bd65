//! Brightness, contrast, and saturation pre-adjustment.
//!
//! These run before filtering, on the full-resolution buffer. Each is a
//! pure transform producing a fresh buffer; alpha passes through unchanged.

use palette::{Hsl, IntoColor, Srgb};

use crate::types::{Colour, PixelBuffer};

/// Adjust brightness. `amount` is in [-1, 1]; 0 is no change.
pub fn brightness(buffer: &PixelBuffer, amount: f32) -> PixelBuffer {
    let offset = amount.clamp(-1.0, 1.0) * 255.0;
    buffer.map_pixels(|c| {
        Colour::new(
            (c.r as f32 + offset).round().clamp(0.0, 255.0) as u8,
            (c.g as f32 + offset).round().clamp(0.0, 255.0) as u8,
            (c.b as f32 + offset).round().clamp(0.0, 255.0) as u8,
            c.a,
        )
    })
}

/// Adjust contrast by scaling channels around the midpoint. `amount` is in
/// [-1, 1]; 0 is no change, -1 collapses to flat grey.
pub fn contrast(buffer: &PixelBuffer, amount: f32) -> PixelBuffer {
    let factor = 1.0 + amount.clamp(-1.0, 1.0);
    buffer.map_pixels(|c| {
        let scale = |v: u8| ((v as f32 - 128.0) * factor + 128.0).round().clamp(0.0, 255.0) as u8;
        Colour::new(scale(c.r), scale(c.g), scale(c.b), c.a)
    })
}

/// Adjust saturation in HSL space. `amount` is in [-1, 1]: positive moves
/// saturation toward 1.0 relative to the remaining range, negative toward
/// 0.0.
pub fn saturation(buffer: &PixelBuffer, amount: f32) -> PixelBuffer {
    let delta = amount.clamp(-1.0, 1.0);
    buffer.map_pixels(|c| adjust_saturation(c, delta))
}

fn adjust_saturation(colour: Colour, delta: f32) -> Colour {
    let rgb: Srgb<f32> = Srgb::new(
        colour.r as f32 / 255.0,
        colour.g as f32 / 255.0,
        colour.b as f32 / 255.0,
    );

    let mut hsl: Hsl = rgb.into_color();

    if delta > 0.0 {
        // Saturate: move toward 1.0
        hsl.saturation += (1.0 - hsl.saturation) * delta;
    } else {
        // Desaturate: move toward 0.0
        hsl.saturation += hsl.saturation * delta;
    }
    hsl.saturation = hsl.saturation.clamp(0.0, 1.0);

    let rgb_out: Srgb<f32> = hsl.into_color();
    Colour::new(
        (rgb_out.red * 255.0).round() as u8,
        (rgb_out.green * 255.0).round() as u8,
        (rgb_out.blue * 255.0).round() as u8,
        colour.a,
    )
}
