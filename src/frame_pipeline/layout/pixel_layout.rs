use tracing::debug;

use crate::frame_pipeline::common::error::{FilterError, Result};
use crate::frame_pipeline::layout::PixelFormat;

/// Byte offsets of each channel inside one packed pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    pub r: usize,
    pub g: usize,
    pub b: usize,
    /// Alpha or padding byte. Present exactly when `step == 4`.
    pub a: Option<usize>,
    /// Bytes per pixel
    pub step: usize,
}

impl PixelLayout {
    const fn packed3(r: usize, g: usize, b: usize) -> Self {
        Self { r, g, b, a: None, step: 3 }
    }

    const fn packed4(r: usize, g: usize, b: usize, a: usize) -> Self {
        Self { r, g, b, a: Some(a), step: 4 }
    }

    /// Resolves the channel offsets for `format`.
    ///
    /// Zero-padded formats report their padding byte as `a`, so the
    /// transform engine preserves it the same way it preserves alpha.
    pub fn resolve(format: PixelFormat) -> Result<Self> {
        let layout = match format {
            PixelFormat::Rgb24 => Self::packed3(0, 1, 2),
            PixelFormat::Bgr24 => Self::packed3(2, 1, 0),
            PixelFormat::Rgba | PixelFormat::Rgbz => Self::packed4(0, 1, 2, 3),
            PixelFormat::Bgra | PixelFormat::Bgrz => Self::packed4(2, 1, 0, 3),
            PixelFormat::Argb | PixelFormat::Zrgb => Self::packed4(1, 2, 3, 0),
            PixelFormat::Abgr | PixelFormat::Zbgr => Self::packed4(3, 2, 1, 0),
            PixelFormat::Gray8 | PixelFormat::Rgb48 | PixelFormat::Yuv420p => {
                return Err(FilterError::UnsupportedFormat(format));
            }
        };

        debug!(%format, ?layout, "Resolved pixel layout");
        Ok(layout)
    }

    /// Number of bytes covered by `width` pixels.
    pub fn row_bytes(&self, width: usize) -> usize {
        width * self.step
    }
}
