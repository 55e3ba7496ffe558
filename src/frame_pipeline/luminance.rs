//! Coarse luminance sampling for the adaptive gamma stage
//!
//! The top-left pixel of every 20x20 block is measured with a weighted
//! Euclidean norm, `sqrt(0.241 R² + 0.691 G² + 0.068 B²)`, and the samples
//! are averaged.

use crate::frame_pipeline::frame::Frame;
use crate::frame_pipeline::layout::PixelLayout;

/// Distance in pixels between samples, both horizontally and vertically.
pub const SAMPLE_SPACING: usize = 20;

const R_WEIGHT: f64 = 0.241;
const G_WEIGHT: f64 = 0.691;
const B_WEIGHT: f64 = 0.068;

/// Perceived brightness of one pixel, in `[0, 255]`.
pub fn perceived_brightness(r: u8, g: u8, b: u8) -> f64 {
    let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
    (R_WEIGHT * r * r + G_WEIGHT * g * g + B_WEIGHT * b * b).sqrt()
}

/// Average perceived brightness over the sampling grid.
///
/// Returns `None` when the frame has no pixels to sample.
pub fn sample_brightness(frame: &Frame, layout: &PixelLayout) -> Option<f64> {
    if frame.props().is_empty() {
        return None;
    }

    let data = frame.data();
    let stride = frame.stride();
    let mut total = 0.0;
    let mut samples = 0usize;

    for y in (0..frame.height()).step_by(SAMPLE_SPACING) {
        let row = &data[y * stride..];
        for x in (0..frame.width()).step_by(SAMPLE_SPACING) {
            let px = &row[x * layout.step..];
            total += perceived_brightness(px[layout.r], px[layout.g], px[layout.b]);
            samples += 1;
        }
    }

    (samples > 0).then(|| total / samples as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_pipeline::layout::PixelFormat;

    #[test]
    fn weights() {
        assert_eq!(perceived_brightness(0, 0, 0), 0.0);
        assert!((perceived_brightness(255, 255, 255) - 255.0).abs() < 1e-9);
        assert!((perceived_brightness(100, 0, 0) - 100.0 * 0.241f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn samples_only_grid_points() {
        // 21x21 RGB frame, black except the four grid samples (0,0), (20,0),
        // (0,20), (20,20), set to white
        let (width, height) = (21, 21);
        let mut data = vec![0u8; width * height * 3];
        for (x, y) in [(0, 0), (20, 0), (0, 20), (20, 20)] {
            let base = (y * width + x) * 3;
            data[base..base + 3].copy_from_slice(&[255, 255, 255]);
        }
        // off-grid pixel must not be counted
        data[(5 * width + 5) * 3] = 255;

        let frame = Frame::packed(width, height, PixelFormat::Rgb24, data).unwrap();
        let layout = PixelLayout::resolve(PixelFormat::Rgb24).unwrap();
        let average = sample_brightness(&frame, &layout).unwrap();
        assert!((average - 255.0).abs() < 1e-9);
    }

    #[test]
    fn respects_layout_offsets() {
        // ARGB: alpha is the first byte and must not be read as red
        let frame = Frame::packed(1, 1, PixelFormat::Argb, vec![255, 0, 0, 0]).unwrap();
        let layout = PixelLayout::resolve(PixelFormat::Argb).unwrap();
        assert_eq!(sample_brightness(&frame, &layout), Some(0.0));
    }

    #[test]
    fn empty_frame_has_no_average() {
        let frame = Frame::new(0, 0, 0, PixelFormat::Rgb24, Vec::new()).unwrap();
        let layout = PixelLayout::resolve(PixelFormat::Rgb24).unwrap();
        assert_eq!(sample_brightness(&frame, &layout), None);
    }
}
