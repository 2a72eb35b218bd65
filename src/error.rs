use miette::Diagnostic;
use thiserror::Error;

/// Main error type for brix operations
#[derive(Error, Diagnostic, Debug)]
pub enum BrixError {
    #[error("invalid grid dimensions: {width}x{height}")]
    #[diagnostic(
        code(brix::mosaic::dimensions),
        help("grid width and height must both be at least 1")
    )]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unknown filter: {id}")]
    #[diagnostic(
        code(brix::filter::unknown),
        help("use FilterRegistry::ids() to list the registered filters")
    )]
    UnknownFilter { id: String },

    #[error("malformed pixel buffer: {len} bytes for {width}x{height} (expected {expected})")]
    #[diagnostic(
        code(brix::buffer::malformed),
        help("buffers are interleaved RGBA, row-major: width * height * 4 bytes")
    )]
    MalformedBuffer {
        width: u32,
        height: u32,
        len: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, BrixError>;
