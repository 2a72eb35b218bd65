//! Core domain types for brix.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - RGBA colour values
//! - `space` - colourspace conversions (HSL, HSV, CIE Lab, luminance)
//! - `BrickPalette` - the fixed set of buildable colours
//! - `PixelBuffer` - owned interleaved RGBA buffers
//! - `ParamSpec` / `ResolvedParams` - typed filter parameter schemas
//! - `Mosaic` - the final W×H grid of brick colours

mod buffer;
mod colour;
mod mosaic;
mod palette;
mod params;
pub mod space;

pub use buffer::PixelBuffer;
pub use colour::{Colour, ParseColourError};
pub use mosaic::Mosaic;
pub use palette::{BrickColour, BrickPalette};
pub use params::{resolve, ParamKind, ParamSpec, ParamValue, ResolvedParams, UserParams};
pub use space::Lab;
