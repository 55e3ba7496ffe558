//! Frame data types

use std::sync::Arc;

use crate::frame_pipeline::common::error::{FilterError, Result};
use crate::frame_pipeline::layout::PixelFormat;

/// Everything about a frame except its pixel bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameProps {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    /// Bytes from the start of one row to the start of the next
    pub stride: usize,
    pub format: PixelFormat,
    /// Presentation timestamp, carried through untouched
    pub pts: Option<i64>,
}

impl FrameProps {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A packed-pixel frame with a reference-counted buffer.
///
/// A frame whose buffer has no other owner may be modified in place; a
/// shared one must be copied into a fresh buffer first.
#[derive(Debug, Clone)]
pub struct Frame {
    props: FrameProps,
    data: Arc<Vec<u8>>,
}

impl Frame {
    /// Wraps `data` as a frame, checking that every row fits in the buffer.
    pub fn new(
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self> {
        let props = FrameProps {
            width,
            height,
            stride,
            format,
            pts: None,
        };
        Self::validate(&props, data.len())?;
        Ok(Self {
            props,
            data: Arc::new(data),
        })
    }

    /// A frame with rows packed back to back.
    pub fn packed(width: usize, height: usize, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let step = format
            .bytes_per_pixel()
            .ok_or(FilterError::UnsupportedFormat(format))?;
        Self::new(width, height, width * step, format, data)
    }

    pub(crate) fn from_parts(props: FrameProps, data: Vec<u8>) -> Self {
        Self {
            props,
            data: Arc::new(data),
        }
    }

    pub(crate) fn from_shared(props: FrameProps, data: Arc<Vec<u8>>) -> Self {
        Self { props, data }
    }

    pub(crate) fn into_parts(self) -> (FrameProps, Arc<Vec<u8>>) {
        (self.props, self.data)
    }

    fn validate(props: &FrameProps, len: usize) -> Result<()> {
        let invalid = || FilterError::InvalidDimensions {
            width: props.width,
            height: props.height,
            stride: props.stride,
        };

        let step = props
            .format
            .bytes_per_pixel()
            .ok_or(FilterError::UnsupportedFormat(props.format))?;
        if props.is_empty() {
            return Ok(());
        }

        let row_bytes = props.width.checked_mul(step).ok_or_else(invalid)?;
        if props.stride < row_bytes {
            return Err(invalid());
        }
        let required = props
            .stride
            .checked_mul(props.height - 1)
            .and_then(|rows| rows.checked_add(row_bytes))
            .ok_or_else(invalid)?;
        if len < required {
            return Err(invalid());
        }
        Ok(())
    }

    pub fn with_pts(mut self, pts: i64) -> Self {
        self.props.pts = Some(pts);
        self
    }

    pub fn props(&self) -> &FrameProps {
        &self.props
    }

    pub fn width(&self) -> usize {
        self.props.width
    }

    pub fn height(&self) -> usize {
        self.props.height
    }

    pub fn stride(&self) -> usize {
        self.props.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.props.format
    }

    pub fn pts(&self) -> Option<i64> {
        self.props.pts
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// True when no other handle shares this frame's buffer.
    pub fn is_writable(&self) -> bool {
        Arc::strong_count(&self.data) == 1 && Arc::weak_count(&self.data) == 0
    }

    /// Bytes of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.props.width || y >= self.props.height {
            return None;
        }
        let step = self.props.format.bytes_per_pixel()?;
        let start = y * self.props.stride + x * step;
        self.data.get(start..start + step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_stride() {
        let frame = Frame::packed(2, 2, PixelFormat::Rgba, vec![0u8; 16]).unwrap();
        assert_eq!(frame.stride(), 8);
        assert_eq!(frame.pixel(1, 1).unwrap().len(), 4);
        assert!(frame.pixel(2, 0).is_none());
    }

    #[test]
    fn rejects_short_buffers() {
        assert!(matches!(
            Frame::new(4, 2, 12, PixelFormat::Rgb24, vec![0u8; 23]),
            Err(FilterError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Frame::new(4, 2, 11, PixelFormat::Rgb24, vec![0u8; 64]),
            Err(FilterError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn last_row_may_omit_padding() {
        // stride 16 but the final row only needs 12 bytes
        assert!(Frame::new(4, 2, 16, PixelFormat::Rgb24, vec![0u8; 28]).is_ok());
    }

    #[test]
    fn planar_formats_cannot_be_wrapped() {
        assert!(matches!(
            Frame::packed(2, 2, PixelFormat::Yuv420p, vec![0u8; 6]),
            Err(FilterError::UnsupportedFormat(PixelFormat::Yuv420p))
        ));
    }

    #[test]
    fn sharing_revokes_writability() {
        let frame = Frame::packed(1, 1, PixelFormat::Rgb24, vec![1, 2, 3]).unwrap();
        assert!(frame.is_writable());
        let shared = frame.clone();
        assert!(!frame.is_writable());
        drop(shared);
        assert!(frame.is_writable());
    }
}
