//! Benchmarks for graph generation and shortest paths.

use algoscope_graph::{generate_with, AllPairs, Bounds, ShortestPaths};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for &n in &[10usize, 100, 300, 1000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| generate_with(&mut rng, black_box(n), Bounds::default()))
        });
    }
    group.finish();
}

fn bench_shortest(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_paths");
    for &n in &[100usize, 300] {
        let graph = generate_with(&mut StdRng::seed_from_u64(2), n, Bounds::default())
            .expect("valid graph");
        group.bench_with_input(BenchmarkId::new("single_source", n), &graph, |b, g| {
            b.iter(|| ShortestPaths::from_source(g, black_box(0)))
        });
        group.bench_with_input(BenchmarkId::new("all_pairs", n), &graph, |b, g| {
            b.iter(|| AllPairs::compute(black_box(g)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_shortest);
criterion_main!(benches);
