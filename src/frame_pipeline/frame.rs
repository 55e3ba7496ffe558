//! Frame module
//!
//! Frame buffers, the in-place versus fresh-output decision, and the shared
//! pixel traversal every filter stage runs through.

mod engine;
mod ownership;
pub mod types;

pub use engine::{ChannelTransform, apply_copy, apply_in_place, run};
pub use ownership::{FrameTarget, arbitrate};
pub use types::{Frame, FrameProps};
