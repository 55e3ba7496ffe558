//! Adaptive gamma table construction

use tracing::debug;

use crate::frame_pipeline::lut::ChannelLut;

/// Maps a frame's average perceived brightness to a gamma exponent.
///
/// Black frames get `1.0`; brighter frames get a stronger darkening curve.
pub fn gamma_from_brightness(brightness: f64) -> f64 {
    0.072 * brightness * 13.0 / 255.0 + 1.0
}

/// Builds `round(255 * (i / 255) ^ gamma)` for every intensity.
pub fn build_gamma_lut(gamma: f64) -> ChannelLut {
    let lut = ChannelLut::from_fn(|i| {
        let normalized = f64::from(i) / 255.0;
        (255.0 * normalized.powf(gamma)).round().clamp(0.0, 255.0) as u8
    });

    debug!(gamma, "Built gamma LUT");
    lut
}
