//! Pixel layout module
//!
//! Maps packed RGB(A) pixel formats to per-channel byte offsets.

mod pixel_format;
mod pixel_layout;

pub use pixel_format::{PixelFormat, SUPPORTED_FORMATS};
pub use pixel_layout::PixelLayout;
