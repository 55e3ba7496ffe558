//! Lookup table module
//!
//! Builders for the per-channel darken and gamma tables, and the dense
//! color-cube table used by energy-efficient color mapping.

mod channel_lut;
mod color_cube;
pub mod darken;
pub mod gamma;
mod shared_cube;

pub use channel_lut::ChannelLut;
pub use color_cube::{CUBE_BYTES, CUBE_ENTRIES, ColorCubeLut, packed_key};
pub use darken::{DarkenConfig, DarkenConfigBuilder, DarkenMode, build_darken_lut};
pub use gamma::{build_gamma_lut, gamma_from_brightness};
pub use shared_cube::{ColorCubeGuard, SharedColorCube};
