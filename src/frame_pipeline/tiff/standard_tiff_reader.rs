use std::io::Cursor;

use tracing::debug;

use crate::frame_pipeline::common::error::{FilterError, Result};
use crate::frame_pipeline::frame::Frame;
use crate::frame_pipeline::layout::PixelFormat;
use crate::frame_pipeline::tiff::reader::FrameReader;

/// Decodes 8-bit RGB and RGBA TIFF images.
///
/// RGB images become [`PixelFormat::Rgb24`] frames and RGBA images become
/// [`PixelFormat::Rgba`] frames. Other color types are rejected.
pub struct StandardTiffReader;

impl FrameReader for StandardTiffReader {
    fn read_frame(&self, data: &[u8]) -> Result<Frame> {
        debug!("Decoding TIFF image, {} bytes", data.len());

        let mut decoder = tiff::decoder::Decoder::new(Cursor::new(data))
            .map_err(|e| FilterError::DecodeError(e.to_string()))?;

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| FilterError::DecodeError(e.to_string()))?;
        let color_type = decoder
            .colortype()
            .map_err(|e| FilterError::DecodeError(e.to_string()))?;

        let format = match color_type {
            tiff::ColorType::RGB(8) => PixelFormat::Rgb24,
            tiff::ColorType::RGBA(8) => PixelFormat::Rgba,
            other => {
                return Err(FilterError::DecodeError(format!(
                    "unsupported color type {other:?}"
                )));
            }
        };

        let pixels = match decoder
            .read_image()
            .map_err(|e| FilterError::DecodeError(e.to_string()))?
        {
            tiff::decoder::DecodingResult::U8(pixels) => pixels,
            _ => {
                return Err(FilterError::DecodeError(
                    "expected 8-bit samples".to_string(),
                ));
            }
        };

        debug!("Decoded image: {}x{} {}", width, height, format);
        Frame::packed(width as usize, height as usize, format, pixels)
    }
}
