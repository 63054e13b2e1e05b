//! Simulation and chart benchmarks with 95% confidence intervals.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tgrm_sim::dashboard::{run_dashboard, ChartLayout};
use tgrm_sim::engine::SimRng;
use tgrm_sim::model::{simulate, SimulationParameters};
use tgrm_sim::render::{line_chart, ChartSize, ChartSpec};
use tgrm_sim::renderers::render_svg_string;

fn params(step_count: usize) -> SimulationParameters {
    SimulationParameters {
        step_count,
        ..SimulationParameters::default()
    }
}

/// Simulator throughput across run lengths.
fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    group.sample_size(100);
    group.confidence_level(0.95);

    for steps in [300, 3_000, 30_000] {
        group.bench_with_input(BenchmarkId::new("steps", steps), &steps, |b, &n| {
            let p = params(n);
            b.iter(|| black_box(simulate(&p, &mut SimRng::new(42))));
        });
    }

    group.finish();
}

/// Command generation for one two-series line chart.
fn bench_line_chart(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_chart");
    group.sample_size(100);
    group.confidence_level(0.95);

    for steps in [300, 3_000] {
        let result = simulate(&params(steps), &mut SimRng::new(42));
        let xs: Vec<f64> = (0..steps).map(|i| i as f64).collect();
        group.bench_with_input(BenchmarkId::new("steps", steps), &steps, |b, _| {
            b.iter(|| {
                let spec = ChartSpec::new()
                    .with_series("TGRM Repair", &result.accuracy_repair)
                    .with_series("Retrain", &result.accuracy_retrain);
                black_box(line_chart(ChartSize::default(), &xs, &spec))
            });
        });
    }

    group.finish();
}

/// Full refresh: simulate, build four charts, replay one into SVG.
fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard");
    group.sample_size(100);
    group.confidence_level(0.95);

    let p = params(300);
    let layout = ChartLayout::default();
    group.bench_function("refresh", |b| {
        b.iter(|| black_box(run_dashboard(&p, &layout, &mut SimRng::new(42))));
    });

    let frame = run_dashboard(&p, &layout, &mut SimRng::new(42));
    group.bench_function("accuracy_svg", |b| {
        b.iter(|| black_box(render_svg_string(ChartSize::default(), &frame.accuracy)));
    });

    group.finish();
}

criterion_group!(benches, bench_simulate, bench_line_chart, bench_dashboard);
criterion_main!(benches);
