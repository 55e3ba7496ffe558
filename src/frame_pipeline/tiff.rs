//! TIFF still-frame module
//!
//! Decodes 8-bit RGB/RGBA TIFF images into frames and encodes filtered frames
//! back to TIFF with various compression options.

mod reader;
mod standard_tiff_reader;
mod standard_tiff_writer;
pub mod types;
mod writer;

pub use reader::FrameReader;
pub use standard_tiff_reader::StandardTiffReader;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{PipelineConfig, PipelineConfigBuilder, TiffCompression};
pub use writer::FrameWriter;
