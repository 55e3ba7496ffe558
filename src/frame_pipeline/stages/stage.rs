use tracing::info;

use crate::frame_pipeline::common::error::{FilterError, Result};
use crate::frame_pipeline::frame::Frame;
use crate::frame_pipeline::layout::{PixelFormat, PixelLayout, SUPPORTED_FORMATS};

/// One per-frame transform in a filter chain.
pub trait FilterStage {
    fn name(&self) -> &'static str;

    /// Formats this stage accepts during negotiation.
    fn supported_formats(&self) -> &'static [PixelFormat] {
        SUPPORTED_FORMATS
    }

    /// Fixes the output format. Must succeed before any frame is filtered.
    fn config_output(&mut self, format: PixelFormat) -> Result<()>;

    /// Transforms one frame, producing a frame of the same geometry and format.
    fn filter_frame(&mut self, frame: Frame) -> Result<Frame>;
}

/// Format and layout a stage agreed on during negotiation.
#[derive(Debug, Default)]
pub(crate) struct Negotiation {
    current: Option<(PixelFormat, PixelLayout)>,
}

impl Negotiation {
    pub(crate) fn configure(&mut self, stage: &'static str, format: PixelFormat) -> Result<PixelLayout> {
        let layout = PixelLayout::resolve(format)?;
        self.current = Some((format, layout));
        info!(stage, %format, step = layout.step, "Output format negotiated");
        Ok(layout)
    }

    /// Layout to use for `frame`, checking it carries the negotiated format.
    pub(crate) fn layout_for(&self, stage: &'static str, frame: &Frame) -> Result<PixelLayout> {
        let (expected, layout) = self.current.ok_or(FilterError::NotConfigured(stage))?;
        if frame.format() != expected {
            return Err(FilterError::FormatMismatch {
                expected,
                actual: frame.format(),
            });
        }
        Ok(layout)
    }
}
