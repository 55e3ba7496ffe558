use tracing::{debug, info, instrument};

use crate::frame_pipeline::common::error::Result;
use crate::frame_pipeline::frame::{self, Frame};
use crate::frame_pipeline::layout::PixelFormat;
use crate::frame_pipeline::luminance::sample_brightness;
use crate::frame_pipeline::lut::{build_gamma_lut, gamma_from_brightness};
use crate::frame_pipeline::stages::stage::{FilterStage, Negotiation};

/// Gamma correction whose exponent follows each frame's sampled brightness.
///
/// The table is rebuilt for every frame.
#[derive(Default)]
pub struct GammaAdaptiveStage {
    last_gamma: Option<f64>,
    negotiation: Negotiation,
}

impl GammaAdaptiveStage {
    pub const NAME: &'static str = "gammaadt";

    pub fn new() -> Self {
        info!("Adaptive gamma stage initialized");
        Self::default()
    }

    /// Gamma applied to the most recent non-empty frame.
    pub fn last_gamma(&self) -> Option<f64> {
        self.last_gamma
    }
}

impl FilterStage for GammaAdaptiveStage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn config_output(&mut self, format: PixelFormat) -> Result<()> {
        self.negotiation.configure(Self::NAME, format).map(|_| ())
    }

    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    fn filter_frame(&mut self, frame: Frame) -> Result<Frame> {
        let layout = self.negotiation.layout_for(Self::NAME, &frame)?;

        let Some(brightness) = sample_brightness(&frame, &layout) else {
            debug!("Empty frame, passing through");
            return Ok(frame);
        };

        let gamma = gamma_from_brightness(brightness);
        let lut = build_gamma_lut(gamma);
        self.last_gamma = Some(gamma);
        debug!(brightness, gamma, "Applying adaptive gamma");

        let target = frame::arbitrate(frame)?;
        Ok(frame::run(target, &layout, &lut))
    }
}
