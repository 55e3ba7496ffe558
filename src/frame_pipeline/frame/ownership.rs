use tracing::debug;

use crate::frame_pipeline::common::error::{FilterError, Result};
use crate::frame_pipeline::frame::{Frame, FrameProps};

/// Where a stage writes its output.
#[derive(Debug)]
pub enum FrameTarget {
    /// The stage owned the only handle to the buffer and may rewrite it.
    InPlace { props: FrameProps, data: Vec<u8> },
    /// The buffer is shared: read from `source`, write into `output`.
    Fresh { source: Frame, output: Vec<u8> },
}

impl FrameTarget {
    pub fn is_in_place(&self) -> bool {
        matches!(self, FrameTarget::InPlace { .. })
    }
}

/// Takes the frame's buffer when it is exclusively owned, otherwise
/// allocates a zeroed buffer with the same stride and height.
///
/// Allocation is fallible so that exhaustion drops the frame instead of
/// aborting the process.
pub fn arbitrate(frame: Frame) -> Result<FrameTarget> {
    let (props, data) = frame.into_parts();
    match std::sync::Arc::try_unwrap(data) {
        Ok(data) => Ok(FrameTarget::InPlace { props, data }),
        Err(shared) => {
            let len = shared.len();
            let mut output = Vec::new();
            output
                .try_reserve_exact(len)
                .map_err(|_| FilterError::OutOfMemory(len))?;
            output.resize(len, 0);

            debug!(bytes = len, "Input frame is shared, allocated output buffer");
            Ok(FrameTarget::Fresh {
                source: Frame::from_shared(props, shared),
                output,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_pipeline::layout::PixelFormat;

    #[test]
    fn exclusive_frame_is_reused() {
        let frame = Frame::packed(1, 1, PixelFormat::Rgb24, vec![1, 2, 3]).unwrap();
        let target = arbitrate(frame).unwrap();
        assert!(target.is_in_place());
        match target {
            FrameTarget::InPlace { data, .. } => assert_eq!(data, vec![1, 2, 3]),
            FrameTarget::Fresh { .. } => unreachable!(),
        }
    }

    #[test]
    fn shared_frame_gets_fresh_output() {
        let frame = Frame::new(1, 2, 8, PixelFormat::Rgb24, vec![7u8; 11]).unwrap();
        let keep = frame.clone();
        let target = arbitrate(frame).unwrap();
        match target {
            FrameTarget::Fresh { source, output } => {
                assert_eq!(output.len(), 11);
                assert!(output.iter().all(|&b| b == 0));
                assert_eq!(source.data(), keep.data());
                assert_eq!(source.stride(), 8);
            }
            FrameTarget::InPlace { .. } => panic!("shared frame must not be mutated"),
        }
    }
}
