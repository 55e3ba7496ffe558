//! Per-pixel traversal shared by every filter stage
//!
//! Rows are walked up to `width * step` bytes; padding past that is never
//! read or written. Only the R, G and B bytes are rewritten. When writing
//! into a separate buffer the alpha (or padding) byte of 4-byte layouts is
//! copied from the source.

use crate::frame_pipeline::frame::{Frame, FrameProps, FrameTarget};
use crate::frame_pipeline::layout::PixelLayout;

/// A mapping from one RGB triple to another.
pub trait ChannelTransform {
    fn map_rgb(&self, rgb: [u8; 3]) -> [u8; 3];
}

/// Rewrites every pixel of `data` through `transform`.
pub fn apply_in_place<T: ChannelTransform + ?Sized>(
    data: &mut [u8],
    props: &FrameProps,
    layout: &PixelLayout,
    transform: &T,
) {
    if props.is_empty() {
        return;
    }
    let row_bytes = layout.row_bytes(props.width);
    let PixelLayout { r, g, b, step, .. } = *layout;

    for row in data.chunks_mut(props.stride).take(props.height) {
        for px in row[..row_bytes].chunks_exact_mut(step) {
            let [nr, ng, nb] = transform.map_rgb([px[r], px[g], px[b]]);
            px[r] = nr;
            px[g] = ng;
            px[b] = nb;
        }
    }
}

/// Reads pixels from `src` and writes the transformed pixels to `dst`.
///
/// Both buffers share the geometry in `props`.
pub fn apply_copy<T: ChannelTransform + ?Sized>(
    src: &[u8],
    dst: &mut [u8],
    props: &FrameProps,
    layout: &PixelLayout,
    transform: &T,
) {
    if props.is_empty() {
        return;
    }
    let row_bytes = layout.row_bytes(props.width);
    let PixelLayout { r, g, b, a, step } = *layout;

    let rows = src.chunks(props.stride).zip(dst.chunks_mut(props.stride));
    for (src_row, dst_row) in rows.take(props.height) {
        let pixels = src_row[..row_bytes]
            .chunks_exact(step)
            .zip(dst_row[..row_bytes].chunks_exact_mut(step));
        for (s, d) in pixels {
            let [nr, ng, nb] = transform.map_rgb([s[r], s[g], s[b]]);
            d[r] = nr;
            d[g] = ng;
            d[b] = nb;
            if let Some(a) = a {
                d[a] = s[a];
            }
        }
    }
}

/// Applies `transform` to an arbitrated target and returns the output frame.
///
/// A shared source is released once its pixels have been copied out.
pub fn run<T: ChannelTransform + ?Sized>(
    target: FrameTarget,
    layout: &PixelLayout,
    transform: &T,
) -> Frame {
    match target {
        FrameTarget::InPlace { props, mut data } => {
            apply_in_place(&mut data, &props, layout, transform);
            Frame::from_parts(props, data)
        }
        FrameTarget::Fresh { source, mut output } => {
            let props = *source.props();
            apply_copy(source.data(), &mut output, &props, layout, transform);
            Frame::from_parts(props, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_pipeline::frame::arbitrate;
    use crate::frame_pipeline::layout::{PixelFormat, SUPPORTED_FORMATS};

    /// Inverts every channel
    struct Invert;

    impl ChannelTransform for Invert {
        fn map_rgb(&self, [r, g, b]: [u8; 3]) -> [u8; 3] {
            [255 - r, 255 - g, 255 - b]
        }
    }

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 37 % 251) as u8).collect()
    }

    #[test]
    fn leaves_row_padding_alone() {
        // 2 pixels wide, 3 bytes of padding per row
        let mut data = vec![10, 20, 30, 40, 50, 60, 1, 2, 3, 70, 80, 90, 100, 110, 120];
        let props = FrameProps {
            width: 2,
            height: 2,
            stride: 9,
            format: PixelFormat::Rgb24,
            pts: None,
        };
        let layout = PixelLayout::resolve(PixelFormat::Rgb24).unwrap();
        apply_in_place(&mut data, &props, &layout, &Invert);

        assert_eq!(
            data,
            vec![245, 235, 225, 215, 205, 195, 1, 2, 3, 185, 175, 165, 155, 145, 135]
        );
    }

    #[test]
    fn fresh_output_keeps_padding_zeroed() {
        struct Identity;
        impl ChannelTransform for Identity {
            fn map_rgb(&self, rgb: [u8; 3]) -> [u8; 3] {
                rgb
            }
        }

        let layout = PixelLayout::resolve(PixelFormat::Rgb24).unwrap();
        let frame = Frame::new(1, 2, 5, PixelFormat::Rgb24, vec![1, 2, 3, 9, 9, 4, 5, 6]).unwrap();
        let keep = frame.clone();

        let out = run(arbitrate(frame).unwrap(), &layout, &Identity);
        assert_eq!(out.data(), &[1, 2, 3, 0, 0, 4, 5, 6]);
        assert_eq!(keep.data(), &[1, 2, 3, 9, 9, 4, 5, 6]);
    }

    #[test]
    fn alpha_survives_in_place_and_copy() {
        for &format in SUPPORTED_FORMATS {
            let layout = PixelLayout::resolve(format).unwrap();
            let Some(a) = layout.a else { continue };
            let (width, height, stride) = (3, 2, 3 * 4 + 2);
            let original = patterned(stride * height);

            let frame = Frame::new(width, height, stride, format, original.clone()).unwrap();
            let shared = frame.clone();
            let copied = run(arbitrate(frame).unwrap(), &layout, &Invert);
            drop(shared);

            let frame = Frame::new(width, height, stride, format, original.clone()).unwrap();
            let in_place = run(arbitrate(frame).unwrap(), &layout, &Invert);

            for out in [&copied, &in_place] {
                for y in 0..height {
                    for x in 0..width {
                        let base = y * stride + x * 4;
                        let px = out.pixel(x, y).unwrap();
                        assert_eq!(px[a], original[base + a], "{format} alpha at {x},{y}");
                        assert_eq!(px[layout.r], 255 - original[base + layout.r]);
                        assert_eq!(px[layout.g], 255 - original[base + layout.g]);
                        assert_eq!(px[layout.b], 255 - original[base + layout.b]);
                    }
                }
            }
        }
    }

    #[test]
    fn copy_reads_from_source_and_keeps_it_intact() {
        let layout = PixelLayout::resolve(PixelFormat::Bgr24).unwrap();
        let frame = Frame::packed(2, 1, PixelFormat::Bgr24, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let keep = frame.clone();

        let target = arbitrate(frame).unwrap();
        assert!(!target.is_in_place());
        let out = run(target, &layout, &Invert);

        assert_eq!(out.data(), &[254, 253, 252, 251, 250, 249]);
        assert_eq!(keep.data(), &[1, 2, 3, 4, 5, 6]);
        assert!(keep.is_writable());
    }

    #[test]
    fn zero_area_is_a_no_op() {
        let layout = PixelLayout::resolve(PixelFormat::Rgba).unwrap();
        let frame = Frame::new(0, 4, 0, PixelFormat::Rgba, Vec::new()).unwrap();
        let out = run(arbitrate(frame).unwrap(), &layout, &Invert);
        assert_eq!(out.width(), 0);
        assert!(out.data().is_empty());
    }
}
