//! Still-frame pipeline configuration types

/// Compression applied to the filtered frame when it is written out
///
/// Filtered frames are 8-bit RGB or RGBA strips; darkened and EECM-mapped
/// output tends to have long flat runs, which the deflate levels exploit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// Raw strips, byte-for-byte the filtered pixels
    None,
    Lzw,
    /// Deflate level 1, for quick previews of a filter setting
    DeflateFast,
    /// Deflate level 9
    DeflateBest,
    /// Default deflate level, used by the binary
    DeflateBalanced,
}

/// Configuration for the still-frame filter pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Compression method for the output TIFF
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Whether to reject zero-sized images before filtering
    pub validate_dimensions: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
}

impl PipelineConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
        }
    }
}
