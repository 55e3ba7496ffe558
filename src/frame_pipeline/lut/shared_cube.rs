//! Shared, lifecycle-managed handle to the color-cube table
//!
//! Frame transforms hold a read guard for the whole frame, while installing or
//! clearing a table takes the write lock. A reader therefore never observes a
//! table that is being replaced.

use std::sync::Arc;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use tracing::{info, warn};

use crate::frame_pipeline::common::error::{FilterError, Result};
use crate::frame_pipeline::lut::ColorCubeLut;

/// Read access to a populated table
pub type ColorCubeGuard<'a> = MappedRwLockReadGuard<'a, ColorCubeLut>;

#[derive(Clone, Default)]
pub struct SharedColorCube {
    table: Arc<RwLock<Option<ColorCubeLut>>>,
}

impl std::fmt::Debug for SharedColorCube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedColorCube")
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl SharedColorCube {
    /// A handle with no table installed yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: ColorCubeLut) -> Result<Self> {
        let shared = Self::new();
        shared.install(table)?;
        Ok(shared)
    }

    /// Installs `table`, returning the one it replaces.
    ///
    /// An all-black table is refused: it is what an unfilled table looks like.
    pub fn install(&self, table: ColorCubeLut) -> Result<Option<ColorCubeLut>> {
        if table.is_unpopulated() {
            return Err(FilterError::InvalidColorCube(
                "table is entirely black; it was never populated".to_string(),
            ));
        }

        let previous = self.table.write().replace(table);
        info!(replaced = previous.is_some(), "Installed color cube");
        Ok(previous)
    }

    pub fn clear(&self) -> Option<ColorCubeLut> {
        let previous = self.table.write().take();
        if previous.is_some() {
            warn!("Color cube cleared; EECM frames will be rejected");
        }
        previous
    }

    pub fn is_ready(&self) -> bool {
        self.table.read().is_some()
    }

    /// Locks the table for reading. Fails if no table is installed.
    pub fn read(&self) -> Result<ColorCubeGuard<'_>> {
        RwLockReadGuard::try_map(self.table.read(), Option::as_ref)
            .map_err(|_| FilterError::ColorCubeNotReady)
    }

    pub fn lookup(&self, r: u8, g: u8, b: u8) -> Result<[u8; 3]> {
        Ok(self.read()?.lookup(r, g, b))
    }
}
