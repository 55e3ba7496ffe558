use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::frame_pipeline::common::error::{FilterError, Result};
use crate::frame_pipeline::conversions::{StageTimings, StepKind};
use crate::frame_pipeline::frame::Frame;
use crate::frame_pipeline::layout::PixelFormat;
use crate::frame_pipeline::stages::FilterStage;

/// Outcome of running a batch of frames through a chain.
#[derive(Debug, Default)]
pub struct ChainReport {
    pub frames: Vec<Frame>,
    /// Frames discarded because of a per-frame failure
    pub dropped: usize,
}

struct ChainEntry {
    stage: Box<dyn FilterStage>,
    enabled: bool,
}

/// Stages applied one after another to each frame.
///
/// A disabled stage stays negotiated but forwards frames untouched, so it
/// can be switched back on between frames.
#[derive(Default)]
pub struct FilterChain {
    stages: Vec<ChainEntry>,
    format: Option<PixelFormat>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S: FilterStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(ChainEntry {
            stage: Box::new(stage),
            enabled: true,
        });
        self.format = None;
        self
    }

    pub fn with_stage<S: FilterStage + 'static>(mut self, stage: S) -> Self {
        self.push(stage);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|entry| entry.stage.name()).collect()
    }

    pub fn negotiated_format(&self) -> Option<PixelFormat> {
        self.format
    }

    /// Switches every stage called `name` on or off.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        let mut found = false;
        for entry in self.stages.iter_mut().filter(|e| e.stage.name() == name) {
            entry.enabled = enabled;
            found = true;
        }
        if !found {
            return Err(FilterError::InvalidParameter {
                name: "stage",
                value: name.to_string(),
            });
        }
        info!(stage = name, enabled, "Stage toggled");
        Ok(())
    }

    /// `None` when no stage has that name.
    pub fn is_enabled(&self, name: &str) -> Option<bool> {
        self.stages
            .iter()
            .find(|entry| entry.stage.name() == name)
            .map(|entry| entry.enabled)
    }

    /// Configures every stage for `format`, enabled or not. The first refusal
    /// aborts.
    pub fn negotiate(&mut self, format: PixelFormat) -> Result<()> {
        self.format = None;
        for entry in &mut self.stages {
            if !entry.stage.supported_formats().contains(&format) {
                return Err(FilterError::UnsupportedFormat(format));
            }
            entry.stage.config_output(format)?;
        }
        self.format = Some(format);
        info!(%format, stages = self.stages.len(), "Filter chain negotiated");
        Ok(())
    }

    /// Runs `frame` through every enabled stage in order.
    pub fn process(&mut self, frame: Frame) -> Result<Frame> {
        self.run(frame, |_, _| {})
    }

    /// Same as [`process`](Self::process), recording each enabled stage's
    /// time as a filter step named after the stage.
    pub fn process_timed(&mut self, frame: Frame, timings: &mut StageTimings) -> Result<Frame> {
        self.run(frame, |name, elapsed| {
            timings.add_step(name, StepKind::Filter, elapsed)
        })
    }

    fn run<F>(&mut self, mut frame: Frame, mut on_stage: F) -> Result<Frame>
    where
        F: FnMut(&'static str, std::time::Duration),
    {
        for entry in &mut self.stages {
            let name = entry.stage.name();
            if !entry.enabled {
                debug!(stage = name, "Stage disabled, passing frame through");
                continue;
            }
            let start = Instant::now();
            frame = entry.stage.filter_frame(frame)?;
            on_stage(name, start.elapsed());
        }
        Ok(frame)
    }

    /// Runs a batch of frames. Frames hitting a per-frame failure are dropped
    /// and counted; any other failure aborts the batch.
    #[instrument(skip_all)]
    pub fn process_all<I>(&mut self, frames: I) -> Result<ChainReport>
    where
        I: IntoIterator<Item = Frame>,
    {
        let mut report = ChainReport::default();
        for frame in frames {
            let pts = frame.pts();
            match self.process(frame) {
                Ok(out) => report.frames.push(out),
                Err(e) if e.is_per_frame() => {
                    warn!(?pts, error = %e, "Dropping frame");
                    report.dropped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        info!(
            processed = report.frames.len(),
            dropped = report.dropped,
            "Batch complete"
        );
        Ok(report)
    }
}
