//! Ordered (Bayer) dithering.
//!
//! Each pixel is offset by a threshold from a small tiled matrix before
//! nearest-colour quantization. The perturbation for a matrix of side `n`
//! is `(matrix[y % n][x % n] / n² - 0.5) * 128`, applied to every channel.

use crate::types::{BrickPalette, Colour, PixelBuffer};

const BAYER_2X2: [[u8; 2]; 2] = [
    [0, 2],
    [3, 1],
];

const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Threshold matrix side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixSize {
    Two,
    Four,
    Eight,
}

impl MatrixSize {
    /// Parse a matrix size from a string; unknown values fall back to 4x4.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim() {
            "2" => MatrixSize::Two,
            "8" => MatrixSize::Eight,
            _ => MatrixSize::Four,
        }
    }

    /// Side length of the matrix.
    pub fn n(self) -> usize {
        match self {
            MatrixSize::Two => 2,
            MatrixSize::Four => 4,
            MatrixSize::Eight => 8,
        }
    }

    /// Channel perturbation for a pixel position, in [-64, 64).
    fn perturbation(self, x: u32, y: u32) -> f32 {
        let n = self.n();
        let cell = match self {
            MatrixSize::Two => BAYER_2X2[y as usize % 2][x as usize % 2],
            MatrixSize::Four => BAYER_4X4[y as usize % 4][x as usize % 4],
            MatrixSize::Eight => BAYER_8X8[y as usize % 8][x as usize % 8],
        };
        (cell as f32 / (n * n) as f32 - 0.5) * 128.0
    }
}

/// Quantize a buffer with ordered dithering.
pub fn ordered(buffer: &PixelBuffer, palette: &BrickPalette, size: MatrixSize) -> PixelBuffer {
    let mut out = buffer.clone();

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let c = buffer.pixel(x, y);
            let offset = size.perturbation(x, y);

            let perturbed = Colour::rgb(
                (c.r as f32 + offset).clamp(0.0, 255.0) as u8,
                (c.g as f32 + offset).clamp(0.0, 255.0) as u8,
                (c.b as f32 + offset).clamp(0.0, 255.0) as u8,
            );

            out.set_pixel(x, y, palette.nearest(perturbed).colour.with_alpha(c.a));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::is_palette_pure;
    use crate::types::BrickPalette;

    #[test]
    fn test_matrix_values_cover_range() {
        // Each matrix is a permutation of 0..n²
        let mut seen2: Vec<u8> = BAYER_2X2.iter().flatten().copied().collect();
        seen2.sort_unstable();
        assert_eq!(seen2, (0..4).collect::<Vec<u8>>());

        let mut seen4: Vec<u8> = BAYER_4X4.iter().flatten().copied().collect();
        seen4.sort_unstable();
        assert_eq!(seen4, (0..16).collect::<Vec<u8>>());

        let mut seen8: Vec<u8> = BAYER_8X8.iter().flatten().copied().collect();
        seen8.sort_unstable();
        assert_eq!(seen8, (0..64).collect::<Vec<u8>>());
    }

    #[test]
    fn test_matrix_size_parse() {
        assert_eq!(MatrixSize::from_str_lossy("2"), MatrixSize::Two);
        assert_eq!(MatrixSize::from_str_lossy("4"), MatrixSize::Four);
        assert_eq!(MatrixSize::from_str_lossy("8"), MatrixSize::Eight);
        assert_eq!(MatrixSize::from_str_lossy("16"), MatrixSize::Four);
    }

    #[test]
    fn test_perturbation_bounds() {
        for size in [MatrixSize::Two, MatrixSize::Four, MatrixSize::Eight] {
            for y in 0..8 {
                for x in 0..8 {
                    let p = size.perturbation(x, y);
                    assert!((-64.0..64.0).contains(&p), "{:?} at ({}, {}): {}", size, x, y, p);
                }
            }
        }
    }

    #[test]
    fn test_output_closed_over_palette() {
        let palette = BrickPalette::standard();
        let buf = PixelBuffer::filled(9, 9, Colour::rgb(128, 100, 80));
        for size in [MatrixSize::Two, MatrixSize::Four, MatrixSize::Eight] {
            let out = ordered(&buf, palette, size);
            assert_eq!(out.size(), buf.size());
            assert!(is_palette_pure(&out, palette));
        }
    }

    #[test]
    fn test_tiling_repeats() {
        let palette = BrickPalette::standard();
        let buf = PixelBuffer::filled(8, 8, Colour::rgb(128, 128, 128));
        let out = ordered(&buf, palette, MatrixSize::Four);

        // A uniform input dithered with a 4x4 matrix tiles with period 4
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.pixel(x, y), out.pixel(x + 4, y));
                assert_eq!(out.pixel(x, y), out.pixel(x, y + 4));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let palette = BrickPalette::standard();
        let buf = PixelBuffer::filled(8, 8, Colour::rgb(90, 140, 60));
        assert_eq!(
            ordered(&buf, palette, MatrixSize::Eight),
            ordered(&buf, palette, MatrixSize::Eight)
        );
    }
}
