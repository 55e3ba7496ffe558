use thiserror::Error;

use crate::frame_pipeline::layout::PixelFormat;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unsupported pixel format: {0}")]
    UnsupportedFormat(PixelFormat),

    #[error("Unknown pixel format name: {0}")]
    UnknownFormat(String),

    #[error("Invalid value for option '{name}': {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Color cube table has not been populated")]
    ColorCubeNotReady,

    #[error("Invalid color cube table: {0}")]
    InvalidColorCube(String),

    #[error("Stage '{0}' used before output format negotiation")]
    NotConfigured(&'static str),

    #[error("Frame format {actual} does not match negotiated format {expected}")]
    FormatMismatch {
        expected: PixelFormat,
        actual: PixelFormat,
    },

    #[error("Invalid frame geometry: width={width}, height={height}, stride={stride}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        stride: usize,
    },

    #[error("Failed to allocate {0} bytes for output frame")]
    OutOfMemory(usize),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode TIFF image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FilterError {
    /// Errors that only cost the current frame. Everything else is a setup
    /// failure that the stage cannot recover from on the next frame.
    pub fn is_per_frame(&self) -> bool {
        matches!(self, FilterError::OutOfMemory(_))
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
