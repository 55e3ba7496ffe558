use std::io::Write;

use crate::frame_pipeline::common::error::Result;
use crate::frame_pipeline::frame::Frame;
use crate::frame_pipeline::tiff::types::PipelineConfig;

pub trait FrameWriter {
    fn write_frame(&self, frame: &Frame, output: &mut dyn Write, config: &PipelineConfig) -> Result<()>;
}
