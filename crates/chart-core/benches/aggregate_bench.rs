use chart_core::{aggregate, aggregate_candlestick, Aggregation};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};

fn gen_samples(n: usize) -> Vec<f64> {
    let mut v = Vec::with_capacity(n);
    let mut price = 100.0f64;
    for i in 0..n {
        price += (i as f64 * 0.37).sin();
        v.push(price);
    }
    v
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for &n in &[16usize, 256, 4096] {
        let data = gen_samples(n);
        for kind in [Aggregation::Mean, Aggregation::Median, Aggregation::Max] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_{kind}")), &kind, |b, &k| {
                b.iter_batched(
                    || data.clone(),
                    |d| { let _ = black_box(aggregate(&d, k)); },
                    BatchSize::SmallInput,
                );
            });
        }
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_candlestick")), &n, |b, _| {
            b.iter(|| black_box(aggregate_candlestick(&data)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
