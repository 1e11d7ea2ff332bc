//! Benchmarks for the instrumented sorts at the benchmark tier.

use algoscope_core::{CancellationSource, PaceTier, RecordingProbe};
use algoscope_sort::SortAlgorithm;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_sequence(len: usize) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.gen_range(1..=150)).collect()
}

fn bench_sorts(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");

    let mut group = c.benchmark_group("sort");
    for &len in &[100usize, 500] {
        let input = random_sequence(len);
        group.throughput(Throughput::Elements(len as u64));
        for algo in SortAlgorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algo.id(), len), &input, |b, input| {
                b.iter(|| {
                    let source = CancellationSource::new();
                    let mut probe =
                        RecordingProbe::recording(PaceTier::Benchmark.pace(), source.token());
                    let mut seq = input.clone();
                    runtime.block_on(algo.run(&mut seq, &mut probe));
                    black_box(seq)
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sorts);
criterion_main!(benches);
