use chart_core::{build_window, Aggregation, AxisTriple, DataPoint, Dataset, WindowControl};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn gen_cloud(side: usize) -> Dataset {
    let dims = ["t", "p_a", "m_z"].map(String::from).to_vec();
    let mut pts = Vec::with_capacity(side * side);
    for i in 0..side {
        for j in 0..side {
            let z = (i as f64 * 0.01).sin() * 10.0 + (j as f64 * 0.02).cos();
            pts.push(DataPoint::new(vec![i as f64, j as f64, z]));
        }
    }
    Dataset::new(dims, pts).expect("valid cloud")
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_window");
    let ds = gen_cloud(300);
    let axes = AxisTriple::new("t", "p_a", "m_z").resolve(&ds).expect("axes");
    let points: Vec<&DataPoint> = ds.points().iter().collect();
    for &compress in &[1usize, 4, 16] {
        for agg in [Aggregation::Mean, Aggregation::Median, Aggregation::Candlestick] {
            let control = WindowControl { start_x: 0, count_x: 200, start_y: 0, count_y: 200, compress, aggregation: agg };
            group.bench_with_input(BenchmarkId::from_parameter(format!("c{compress}_{agg}")), &control, |b, ctl| {
                b.iter(|| black_box(build_window(&points, axes, ctl)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_window);
criterion_main!(benches);
