//! Benchmark suite for the W2A2 lookup-accumulate kernels
//!
//! Measures the scalar reference against the runtime-dispatched SIMD path
//! across operand sizes, in both accumulation modes.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tabular::lut::{AccumMode, ProductTable, lut_dot_w2a2, lut_dot_w2a2_simd};

fn random_operands(len: usize) -> (Vec<u8>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(0xDEEB);
    let mut weights = vec![0u8; len];
    let mut activations = vec![0u8; len];
    rng.fill_bytes(&mut weights);
    rng.fill_bytes(&mut activations);
    (weights, activations)
}

fn benchmark_dot(c: &mut Criterion) {
    let table = ProductTable::w2a2();
    let mut group = c.benchmark_group("lut_dot_w2a2");

    for &len in &[32usize, 1024, 16384] {
        let (weights, activations) = random_operands(len);
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("scalar", len), &len, |b, _| {
            b.iter(|| {
                lut_dot_w2a2(
                    black_box(&weights),
                    black_box(&activations),
                    &table,
                    AccumMode::Wrap8,
                )
                .unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("simd", len), &len, |b, _| {
            b.iter(|| {
                lut_dot_w2a2_simd(
                    black_box(&weights),
                    black_box(&activations),
                    &table,
                    AccumMode::Wrap8,
                )
                .unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("simd_wide", len), &len, |b, _| {
            b.iter(|| {
                lut_dot_w2a2_simd(
                    black_box(&weights),
                    black_box(&activations),
                    &table,
                    AccumMode::Wide32,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_dot);
criterion_main!(benches);
