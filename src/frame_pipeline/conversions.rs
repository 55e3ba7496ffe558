//! Pipeline conversions module
//!
//! Orchestrates decoding a still frame, running it through a filter chain and
//! encoding the result.

mod still_frame;
mod timing;


pub use still_frame::FramePipeline;
pub use timing::{StageTimings, StepKind, StepTiming, Timer};
