use std::io::Write;
use std::path::Path;

use tracing::{info, instrument};

use crate::frame_pipeline::{
    common::error::{FilterError, Result},
    conversions::{StageTimings, Timer},
    stages::FilterChain,
    tiff::{FrameReader, FrameWriter, PipelineConfig, StandardTiffReader, StandardTiffWriter},
};

/// Decodes one still frame, filters it, and encodes the result.
pub struct FramePipeline<R: FrameReader, W: FrameWriter> {
    reader: R,
    writer: W,
    config: PipelineConfig,
    chain: FilterChain,
}

impl FramePipeline<StandardTiffReader, StandardTiffWriter> {
    pub fn new(config: PipelineConfig, chain: FilterChain) -> Self {
        Self {
            reader: StandardTiffReader,
            writer: StandardTiffWriter,
            config,
            chain,
        }
    }
}

impl<R: FrameReader, W: FrameWriter> FramePipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: PipelineConfig, chain: FilterChain) -> Self {
        Self {
            reader,
            writer,
            config,
            chain,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(FilterError::InvalidDimensions {
                width,
                height,
                stride: 0,
            });
        }

        Ok(())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&mut self, input_data: &[u8], output: &mut dyn Write) -> Result<StageTimings> {
        info!(stages = ?self.chain.stage_names(), "Starting still-frame filtering");
        let mut timings = StageTimings::new();

        let frame = {
            let _span = tracing::info_span!("decode").entered();
            let timer = Timer::codec("decode");
            let frame = self.reader.read_frame(input_data)?;
            timings.record(timer);
            frame
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = frame.width(),
                height = frame.height()
            ).entered();
            self.validate_dimensions(frame.width(), frame.height())?;
        }

        if self.chain.negotiated_format() != Some(frame.format()) {
            let _span = tracing::info_span!("negotiate", format = %frame.format()).entered();
            self.chain.negotiate(frame.format())?;
        }

        let (width, height) = (frame.width(), frame.height());
        let filtered = {
            let _span = tracing::info_span!("filter").entered();
            self.chain.process_timed(frame, &mut timings)?
        };

        {
            let _span = tracing::info_span!("encode").entered();
            let timer = Timer::codec("encode");
            self.writer.write_frame(&filtered, output, &self.config)?;
            timings.record(timer);
        }

        info!(width, height, "Filtering complete");
        Ok(timings)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        input_path: P,
        output_path: Q,
    ) -> Result<StageTimings> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Filtering file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                FilterError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                FilterError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.convert(&input_data, &mut output_file)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    pub fn chain_mut(&mut self) -> &mut FilterChain {
        &mut self.chain
    }
}
