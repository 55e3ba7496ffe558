use anyhow::Context;
use eecm_filters_rs::frame_pipeline::{
    ColorCubeLut, DarkenConfig, DarkenStage, EecmStage, FilterChain, FramePipeline,
    GammaAdaptiveStage, PipelineConfig, SharedColorCube, TiffCompression,
};
use eecm_filters_rs::logger;

use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting eecm_filters...");

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "input.tiff".to_string());
    let output = args.next().unwrap_or_else(|| "output.tiff".to_string());
    let cube_path = args.next();

    let mut chain = FilterChain::new()
        .with_stage(DarkenStage::new(DarkenConfig::from_options(0, 0, 20.0)?)?)
        .with_stage(GammaAdaptiveStage::new());

    if let Some(cube_path) = cube_path {
        let table = ColorCubeLut::load(&cube_path)
            .with_context(|| format!("loading color cube {cube_path}"))?;
        let cube = SharedColorCube::with_table(table)?;
        chain.push(EecmStage::new(cube)?);
    }

    let config = PipelineConfig::builder()
        .compression(TiffCompression::DeflateBalanced)
        .build();
    let mut pipeline = FramePipeline::new(config, chain);

    info!("Filter pipeline initialized");
    info!("Stages: {:?}", pipeline.chain().stage_names());
    info!("Compression: {:?}", pipeline.config().compression);

    match pipeline.convert_file(&input, &output) {
        Ok(timings) => {
            timings.log_summary();
            info!("Filtering successful!");
        }
        Err(e) => error!("Filtering failed: {}", e),
    }

    Ok(())
}
