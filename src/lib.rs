//! brix - photograph to brick-mosaic pipeline
//!
//! A library for reducing continuous-tone images to a small fixed palette
//! of buildable brick colours while preserving perceptual structure. The
//! pipeline is a linear chain of pure stages: an optional pre-adjustment,
//! a full-resolution artistic filter from the catalog, and centre-point
//! sampling into the final mosaic grid.
//!
//! ```
//! use brix::{sample_mosaic, BrickPalette, FilterRegistry, PixelBuffer, UserParams};
//! use brix::types::Colour;
//!
//! let registry = FilterRegistry::builtin();
//! let photo = PixelBuffer::filled(64, 64, Colour::rgb(210, 60, 40));
//!
//! let filtered = registry.apply("clean-quantize", &photo, &UserParams::new())?;
//! let mosaic = sample_mosaic(&filtered, 16, 16, BrickPalette::standard())?;
//! assert_eq!(mosaic.width(), 16);
//! # Ok::<(), brix::BrixError>(())
//! ```

pub mod adjust;
pub mod analysis;
pub mod dither;
pub mod error;
pub mod filter;
mod rng;
pub mod sampler;
pub mod types;
pub mod validation;

pub use error::{BrixError, Result};
pub use filter::{Filter, FilterCategory, FilterRegistry};
pub use sampler::{grid_dimensions, sample_mosaic};
pub use types::{
    BrickColour, BrickPalette, Colour, Mosaic, ParamKind, ParamSpec, ParamValue, PixelBuffer,
    ResolvedParams, UserParams,
};
pub use validation::{validate_catalog, Diagnostic, Severity, ValidationResult};
