use std::io::Write;

use tracing::debug;

use crate::frame_pipeline::common::error::{FilterError, Result};
use crate::frame_pipeline::frame::Frame;
use crate::frame_pipeline::layout::PixelLayout;
use crate::frame_pipeline::tiff::types::{PipelineConfig, TiffCompression};
use crate::frame_pipeline::tiff::writer::FrameWriter;

pub struct StandardTiffWriter;

/// Repacks a frame of any supported layout into tightly packed RGB or RGBA.
///
/// Padding bytes of zero-padded formats are dropped.
fn pack_rgb(frame: &Frame) -> Result<(Vec<u8>, bool)> {
    let layout = PixelLayout::resolve(frame.format())?;
    let alpha = layout.a.filter(|_| frame.format().has_alpha());
    let channels = if alpha.is_some() { 4 } else { 3 };
    let row_bytes = layout.row_bytes(frame.width());

    let mut packed = Vec::with_capacity(frame.width() * frame.height() * channels);
    if frame.props().is_empty() {
        return Ok((packed, alpha.is_some()));
    }
    for row in frame.data().chunks(frame.stride()).take(frame.height()) {
        for px in row[..row_bytes].chunks_exact(layout.step) {
            packed.extend_from_slice(&[px[layout.r], px[layout.g], px[layout.b]]);
            if let Some(a) = alpha {
                packed.push(px[a]);
            }
        }
    }
    Ok((packed, alpha.is_some()))
}

impl FrameWriter for StandardTiffWriter {
    fn write_frame(&self, frame: &Frame, output: &mut dyn Write, config: &PipelineConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{} {}", frame.width(), frame.height(), frame.format());

        let (pixels, has_alpha) = pack_rgb(frame)?;
        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| FilterError::EncodeError(e.to_string()))?
            .with_compression(compression);

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => tiff::tags::Predictor::Horizontal,
                _ => tiff::tags::Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        let (width, height) = (frame.width() as u32, frame.height() as u32);
        if has_alpha {
            encoder.write_image::<tiff::encoder::colortype::RGBA8>(width, height, &pixels)
        } else {
            encoder.write_image::<tiff::encoder::colortype::RGB8>(width, height, &pixels)
        }
        .map_err(|e| FilterError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_pipeline::layout::PixelFormat;
    use crate::frame_pipeline::tiff::{FrameReader, StandardTiffReader};

    #[test]
    fn packs_bgra_as_rgba() {
        let frame = Frame::packed(1, 1, PixelFormat::Bgra, vec![3, 2, 1, 9]).unwrap();
        assert_eq!(pack_rgb(&frame).unwrap(), (vec![1, 2, 3, 9], true));
    }

    #[test]
    fn drops_padding_byte() {
        let frame = Frame::new(1, 2, 6, PixelFormat::Zrgb, vec![0, 1, 2, 3, 77, 77, 0, 4, 5, 6]).unwrap();
        assert_eq!(pack_rgb(&frame).unwrap(), (vec![1, 2, 3, 4, 5, 6], false));
    }

    #[test]
    fn written_tiff_decodes_back() {
        let frame = Frame::packed(2, 1, PixelFormat::Abgr, vec![10, 3, 2, 1, 20, 6, 5, 4]).unwrap();
        let config = PipelineConfig::builder()
            .compression(TiffCompression::Lzw)
            .build();

        let mut encoded = Vec::new();
        StandardTiffWriter.write_frame(&frame, &mut encoded, &config).unwrap();

        let decoded = StandardTiffReader.read_frame(&encoded).unwrap();
        assert_eq!(decoded.format(), PixelFormat::Rgba);
        assert_eq!(decoded.data(), &[1, 2, 3, 10, 4, 5, 6, 20]);
    }
}
