use tracing::{debug, info, instrument};

use crate::frame_pipeline::common::error::Result;
use crate::frame_pipeline::frame::{self, Frame};
use crate::frame_pipeline::layout::PixelFormat;
use crate::frame_pipeline::lut::{ChannelLut, DarkenConfig, build_darken_lut};
use crate::frame_pipeline::stages::stage::{FilterStage, Negotiation};

/// Darkens every color channel through a table built once at construction.
pub struct DarkenStage {
    config: DarkenConfig,
    lut: ChannelLut,
    negotiation: Negotiation,
}

impl DarkenStage {
    pub const NAME: &'static str = "darken";

    pub fn new(config: DarkenConfig) -> Result<Self> {
        config.validate()?;
        let lut = build_darken_lut(&config);
        info!(
            mode = ?config.mode,
            adaptive = config.adaptive,
            value = config.value,
            "Darken stage initialized"
        );
        Ok(Self {
            config,
            lut,
            negotiation: Negotiation::default(),
        })
    }

    /// Swaps in a new configuration between frames. A rejected config
    /// leaves the current table in use.
    pub fn set_config(&mut self, config: DarkenConfig) -> Result<()> {
        config.validate()?;
        self.lut = build_darken_lut(&config);
        info!(
            mode = ?config.mode,
            adaptive = config.adaptive,
            value = config.value,
            "Darken table rebuilt"
        );
        self.config = config;
        Ok(())
    }

    /// Changes only the darken amount.
    pub fn set_value(&mut self, value: f32) -> Result<()> {
        self.set_config(DarkenConfig {
            value,
            ..self.config.clone()
        })
    }

    pub fn config(&self) -> &DarkenConfig {
        &self.config
    }

    pub fn lut(&self) -> &ChannelLut {
        &self.lut
    }
}

impl FilterStage for DarkenStage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn config_output(&mut self, format: PixelFormat) -> Result<()> {
        self.negotiation.configure(Self::NAME, format).map(|_| ())
    }

    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    fn filter_frame(&mut self, frame: Frame) -> Result<Frame> {
        let layout = self.negotiation.layout_for(Self::NAME, &frame)?;
        let target = frame::arbitrate(frame)?;
        debug!(in_place = target.is_in_place(), "Darkening frame");
        Ok(frame::run(target, &layout, &self.lut))
    }
}
