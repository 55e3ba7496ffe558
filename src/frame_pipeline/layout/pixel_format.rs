//! Pixel format identifiers

use std::fmt;
use std::str::FromStr;

use crate::frame_pipeline::common::error::FilterError;

/// Pixel formats a host pipeline may offer during negotiation.
///
/// Only the packed 8-bit RGB orderings are accepted by the filter stages;
/// the remaining variants exist so that a negotiation with them can be
/// refused explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgb24,
    Bgr24,
    Rgba,
    Bgra,
    Abgr,
    Argb,
    /// `0BGR`: padding byte followed by blue, green, red
    Zbgr,
    /// `0RGB`: padding byte followed by red, green, blue
    Zrgb,
    /// `RGB0`: red, green, blue followed by a padding byte
    Rgbz,
    /// `BGR0`: blue, green, red followed by a padding byte
    Bgrz,
    Gray8,
    Rgb48,
    Yuv420p,
}

/// Formats every filter stage can negotiate.
pub const SUPPORTED_FORMATS: &[PixelFormat] = &[
    PixelFormat::Rgb24,
    PixelFormat::Bgr24,
    PixelFormat::Rgba,
    PixelFormat::Bgra,
    PixelFormat::Abgr,
    PixelFormat::Argb,
    PixelFormat::Zbgr,
    PixelFormat::Zrgb,
    PixelFormat::Rgbz,
    PixelFormat::Bgrz,
];

impl PixelFormat {
    /// Conventional lowercase name, as used by media frameworks.
    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Rgb24 => "rgb24",
            PixelFormat::Bgr24 => "bgr24",
            PixelFormat::Rgba => "rgba",
            PixelFormat::Bgra => "bgra",
            PixelFormat::Abgr => "abgr",
            PixelFormat::Argb => "argb",
            PixelFormat::Zbgr => "0bgr",
            PixelFormat::Zrgb => "0rgb",
            PixelFormat::Rgbz => "rgb0",
            PixelFormat::Bgrz => "bgr0",
            PixelFormat::Gray8 => "gray",
            PixelFormat::Rgb48 => "rgb48le",
            PixelFormat::Yuv420p => "yuv420p",
        }
    }

    pub fn is_supported(self) -> bool {
        SUPPORTED_FORMATS.contains(&self)
    }

    /// Bytes per pixel for packed formats, `None` for planar ones.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            PixelFormat::Rgb24 | PixelFormat::Bgr24 => Some(3),
            PixelFormat::Rgba
            | PixelFormat::Bgra
            | PixelFormat::Abgr
            | PixelFormat::Argb
            | PixelFormat::Zbgr
            | PixelFormat::Zrgb
            | PixelFormat::Rgbz
            | PixelFormat::Bgrz => Some(4),
            PixelFormat::Gray8 => Some(1),
            PixelFormat::Rgb48 => Some(6),
            PixelFormat::Yuv420p => None,
        }
    }

    /// True for formats whose fourth byte carries real alpha rather than padding.
    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            PixelFormat::Rgba | PixelFormat::Bgra | PixelFormat::Abgr | PixelFormat::Argb
        )
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        [
            PixelFormat::Rgb24,
            PixelFormat::Bgr24,
            PixelFormat::Rgba,
            PixelFormat::Bgra,
            PixelFormat::Abgr,
            PixelFormat::Argb,
            PixelFormat::Zbgr,
            PixelFormat::Zrgb,
            PixelFormat::Rgbz,
            PixelFormat::Bgrz,
            PixelFormat::Gray8,
            PixelFormat::Rgb48,
            PixelFormat::Yuv420p,
        ]
        .into_iter()
        .find(|format| format.name() == lowered)
        .ok_or_else(|| FilterError::UnknownFormat(s.to_string()))
    }
}
