use criterion::{Criterion, criterion_group, criterion_main};
use overview_chart::core::{
    DataSet, ScaleEngine, Series, SeriesArena, SeriesKey, TimeAxis, ViewWindow, Viewport,
};
use overview_chart::render::SvgRenderer;
use overview_chart::{Chart, ChartOptions};
use std::hint::black_box;

const DAY_MS: i64 = 86_400_000;

fn generated_data(samples: usize) -> DataSet {
    let time_axis =
        TimeAxis::new((0..samples).map(|i| i as i64 * DAY_MS).collect()).expect("time axis");
    let mut series = SeriesArena::new();
    for (key, phase) in [("y0", 0.0), ("y1", 1.3)] {
        let values = (0..samples)
            .map(|i| 500.0 + 400.0 * (i as f64 * 0.01 + phase).sin())
            .collect();
        let line = Series::new(SeriesKey::new(key), key, "#3DC23F", values).expect("series");
        series.insert(line.key().clone(), line);
    }
    DataSet::new(time_axis, series)
}

fn bench_path_generation_10k(c: &mut Criterion) {
    let data = generated_data(10_000);
    let axis = data.time_axis().pixel_positions(50.0);
    let line = data
        .series()
        .get(&SeriesKey::new("y0"))
        .expect("generated series");

    c.bench_function("path_generation_10k", |b| {
        b.iter(|| {
            let path = line.generate_path(black_box(&axis), 300.0, black_box(0.3), 0.0);
            black_box(path.to_svg_path_data());
        })
    });
}

fn bench_windowed_scale_10k(c: &mut Criterion) {
    let data = generated_data(10_000);
    let mut engine = ScaleEngine::new(300.0);
    let window = ViewWindow {
        left: 400.0,
        right: 250.0,
        width: 1_000.0,
    };

    c.bench_function("windowed_scale_10k", |b| {
        b.iter(|| {
            black_box(engine.update(black_box(window), data.series(), data.time_axis().len()));
        })
    });
}

fn bench_scene_to_svg_2k(c: &mut Criterion) {
    let options = ChartOptions::default().with_container(Viewport::new(1_600.0, 600.0));
    let mut chart =
        Chart::new(SvgRenderer::default(), generated_data(2_000), options).expect("chart");

    c.bench_function("scene_to_svg_2k", |b| {
        b.iter(|| {
            chart.render().expect("render should succeed");
            black_box(chart.renderer().document().len());
        })
    });
}

criterion_group!(
    benches,
    bench_path_generation_10k,
    bench_windowed_scale_10k,
    bench_scene_to_svg_2k
);
criterion_main!(benches);
