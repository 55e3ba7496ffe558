//! Dense RGB color-cube table
//!
//! One 3-byte entry for each of the 2^24 possible 8-bit RGB triples, stored
//! in `r * 65536 + g * 256 + b` order. The table is produced ahead of time by
//! a calibration tool and is only read while frames are processed.

use std::path::Path;

use tracing::{debug, info};

use crate::frame_pipeline::common::error::{FilterError, Result};
use crate::frame_pipeline::frame::ChannelTransform;

/// Number of entries, one per 24-bit color
pub const CUBE_ENTRIES: usize = 1 << 24;

/// Size of the serialized table in bytes
pub const CUBE_BYTES: usize = CUBE_ENTRIES * 3;

/// Packs an RGB triple into the table key.
#[inline]
pub fn packed_key(r: u8, g: u8, b: u8) -> usize {
    let key = ((r as usize) << 16) | ((g as usize) << 8) | b as usize;
    debug_assert!(key < CUBE_ENTRIES);
    key
}

pub struct ColorCubeLut {
    data: Vec<u8>,
}

impl std::fmt::Debug for ColorCubeLut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorCubeLut")
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl ColorCubeLut {
    /// An all-black table, to be filled with [`ColorCubeLut::set`].
    pub fn zeroed() -> Self {
        Self {
            data: vec![0u8; CUBE_BYTES],
        }
    }

    pub fn identity() -> Self {
        Self::from_fn(|r, g, b| [r, g, b])
    }

    /// Populates every entry from a mapping function.
    pub fn from_fn(mut f: impl FnMut(u8, u8, u8) -> [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(CUBE_BYTES);
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                for b in 0..=255u8 {
                    data.extend_from_slice(&f(r, g, b));
                }
            }
        }
        Self { data }
    }

    /// Wraps a serialized table. The length must be exactly [`CUBE_BYTES`].
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.len() != CUBE_BYTES {
            return Err(FilterError::InvalidColorCube(format!(
                "expected {} bytes, got {}",
                CUBE_BYTES,
                data.len()
            )));
        }
        Ok(Self { data })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading color cube");

        let data = std::fs::read(path).map_err(|e| {
            FilterError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_bytes(data)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.data).map_err(|e| {
            FilterError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Saved color cube");
        Ok(())
    }

    #[inline]
    pub fn lookup(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        let offset = packed_key(r, g, b) * 3;
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }

    pub fn set(&mut self, r: u8, g: u8, b: u8, mapped: [u8; 3]) {
        let offset = packed_key(r, g, b) * 3;
        self.data[offset..offset + 3].copy_from_slice(&mapped);
    }

    /// True when every entry is black, i.e. the table was never filled.
    pub fn is_unpopulated(&self) -> bool {
        self.data.iter().all(|&byte| byte == 0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl ChannelTransform for ColorCubeLut {
    #[inline]
    fn map_rgb(&self, [r, g, b]: [u8; 3]) -> [u8; 3] {
        self.lookup(r, g, b)
    }
}
