//! Frame color-remapping pipeline
//!
//! This module provides three per-frame pixel transforms over packed RGB(A)
//! buffers (table-driven darkening, energy-efficient color mapping through a
//! dense color cube, and luminance-adaptive gamma) together with the layout,
//! traversal and still-frame plumbing they share.

pub mod common;
pub mod conversions;
pub mod frame;
pub mod layout;
pub mod luminance;
pub mod lut;
pub mod stages;
pub mod tiff;

pub use common::{
    FilterError,
    Result,
};

pub use layout::{
    PixelFormat,
    PixelLayout,
    SUPPORTED_FORMATS,
};

pub use frame::{
    ChannelTransform,
    Frame,
    FrameProps,
};

pub use lut::{
    ChannelLut,
    ColorCubeLut,
    DarkenConfig,
    DarkenConfigBuilder,
    DarkenMode,
    SharedColorCube,
};

pub use stages::{
    ChainReport,
    DarkenStage,
    EecmStage,
    FilterChain,
    FilterStage,
    GammaAdaptiveStage,
};

pub use tiff::{
    FrameReader,
    FrameWriter,
    PipelineConfig,
    PipelineConfigBuilder,
    StandardTiffReader,
    StandardTiffWriter,
    TiffCompression,
};

pub use conversions::{
    FramePipeline,
    StageTimings,
    StepKind,
};
