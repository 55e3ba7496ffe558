use tracing::{debug, info, instrument};

use crate::frame_pipeline::common::error::{FilterError, Result};
use crate::frame_pipeline::frame::{self, Frame};
use crate::frame_pipeline::layout::PixelFormat;
use crate::frame_pipeline::lut::SharedColorCube;
use crate::frame_pipeline::stages::stage::{FilterStage, Negotiation};

/// Energy-efficient color mapping: replaces every RGB triple with its
/// color-cube entry.
///
/// The table is owned by a [`SharedColorCube`] handle and is held under a
/// read lock for the duration of each frame.
pub struct EecmStage {
    cube: SharedColorCube,
    negotiation: Negotiation,
}

impl EecmStage {
    pub const NAME: &'static str = "eecm";

    /// Fails with [`FilterError::ColorCubeNotReady`] if no table is installed.
    pub fn new(cube: SharedColorCube) -> Result<Self> {
        if !cube.is_ready() {
            return Err(FilterError::ColorCubeNotReady);
        }
        info!("EECM stage initialized");
        Ok(Self {
            cube,
            negotiation: Negotiation::default(),
        })
    }

    pub fn cube(&self) -> &SharedColorCube {
        &self.cube
    }
}

impl FilterStage for EecmStage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn config_output(&mut self, format: PixelFormat) -> Result<()> {
        if !self.cube.is_ready() {
            return Err(FilterError::ColorCubeNotReady);
        }
        self.negotiation.configure(Self::NAME, format).map(|_| ())
    }

    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    fn filter_frame(&mut self, frame: Frame) -> Result<Frame> {
        let layout = self.negotiation.layout_for(Self::NAME, &frame)?;
        let table = self.cube.read()?;
        let target = frame::arbitrate(frame)?;
        debug!(in_place = target.is_in_place(), "Mapping frame colors");
        Ok(frame::run(target, &layout, &*table))
    }
}
