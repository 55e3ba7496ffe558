use crate::frame_pipeline::common::error::Result;
use crate::frame_pipeline::frame::Frame;

pub trait FrameReader {
    fn read_frame(&self, data: &[u8]) -> Result<Frame>;
}
