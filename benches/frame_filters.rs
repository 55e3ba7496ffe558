use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use eecm_filters_rs::frame_pipeline::{
    ColorCubeLut, DarkenConfig, DarkenMode, DarkenStage, EecmStage, FilterStage, Frame,
    GammaAdaptiveStage, PixelFormat, SharedColorCube,
};

fn generate_frame(width: usize, height: usize, format: PixelFormat) -> Frame {
    let step = format.bytes_per_pixel().unwrap();
    let mut data = Vec::with_capacity(width * height * step);
    for y in 0..height {
        for x in 0..width {
            for c in 0..step {
                data.push(((x * 3 + y * 7 + c * 11) % 256) as u8);
            }
        }
    }
    Frame::packed(width, height, format, data).unwrap()
}

fn run_stage<S: FilterStage>(c: &mut Criterion, group_name: &str, mut make_stage: impl FnMut() -> S) {
    let mut group = c.benchmark_group(group_name);

    let sizes = vec![
        (320, 240, PixelFormat::Rgb24, "320x240_rgb24"),
        (1280, 720, PixelFormat::Rgb24, "1280x720_rgb24"),
        (1280, 720, PixelFormat::Bgra, "1280x720_bgra"),
    ];

    for (width, height, format, label) in sizes {
        let source = generate_frame(width, height, format);
        let mut stage = make_stage();
        stage.config_output(format).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(label), &source, |b, source| {
            // cloning shares the buffer, so every iteration takes the copy path
            b.iter(|| black_box(stage.filter_frame(source.clone()).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_darken(c: &mut Criterion) {
    run_stage(c, "darken", || {
        let config = DarkenConfig::builder()
            .mode(DarkenMode::Subtractive)
            .adaptive(true)
            .value(64.0)
            .build();
        DarkenStage::new(config).unwrap()
    });
}

fn benchmark_gamma(c: &mut Criterion) {
    run_stage(c, "gamma_adaptive", GammaAdaptiveStage::new);
}

fn benchmark_eecm(c: &mut Criterion) {
    let cube = SharedColorCube::with_table(ColorCubeLut::from_fn(|r, g, b| {
        [r / 2, g.saturating_sub(8), b]
    }))
    .unwrap();
    run_stage(c, "eecm", || EecmStage::new(cube.clone()).unwrap());
}

criterion_group!(benches, benchmark_darken, benchmark_gamma, benchmark_eecm);
criterion_main!(benches);
