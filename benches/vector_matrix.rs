//! Serial vs SIMD strategy benchmarks.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use vecmath::prelude::*;

fn sample(n: usize) -> Vec<f32> {
    (0..n).map(|i| ((i * 17 + 3) % 1000) as f32 / 1000.0).collect()
}

/// Serial context plus the detected one when it differs
fn contexts() -> Vec<Context> {
    let mut contexts = vec![Context::serial()];
    let detected = Backend::detect();
    if detected.is_simd() {
        contexts.push(Context::new(detected));
    }
    contexts
}

fn bench_vector_dot(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_dot_f32");

    for size in [100, 1000, 10_000, 100_000] {
        let data = sample(size);
        for ctx in contexts() {
            let a = Vector::from_slice(&data, &ctx).unwrap();
            let b = a.multiply_scalar(0.5);
            group.bench_with_input(
                BenchmarkId::new(ctx.backend().to_string(), size),
                &size,
                |bencher, _| bencher.iter(|| black_box(a.dot(&b).unwrap())),
            );
        }
    }
    group.finish();
}

fn bench_vector_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_add_f32");

    for size in [100, 10_000, 100_000] {
        let data = sample(size);
        for ctx in contexts() {
            let a = Vector::from_slice(&data, &ctx).unwrap();
            let b = a.abs();
            group.bench_with_input(
                BenchmarkId::new(ctx.backend().to_string(), size),
                &size,
                |bencher, _| bencher.iter(|| black_box(a.add(&b).unwrap())),
            );
        }
    }
    group.finish();
}

fn bench_matrix_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_multiply_f32");
    group.sample_size(20);

    for n in [16, 64, 128] {
        let data = sample(n * n);
        for ctx in contexts() {
            let a = Matrix::from_slice(&data, n, n, VectorizationMode::ByRow, &ctx).unwrap();
            let b = Matrix::from_slice(&data, n, n, VectorizationMode::ByColumn, &ctx).unwrap();
            group.bench_with_input(
                BenchmarkId::new(ctx.backend().to_string(), n),
                &n,
                |bencher, _| bencher.iter(|| black_box(a.multiply(&b).unwrap())),
            );
        }
    }
    group.finish();
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_transpose_in_place_f32");

    for n in [64, 256] {
        let data = sample(n * n);
        for ctx in contexts() {
            let mut m = Matrix::from_slice(&data, n, n, VectorizationMode::ByRow, &ctx).unwrap();
            group.bench_with_input(
                BenchmarkId::new(ctx.backend().to_string(), n),
                &n,
                |bencher, _| {
                    bencher.iter(|| {
                        m.transpose_in_place();
                        black_box(m.rows())
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_determinant(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_determinant_f64");

    for n in [8, 32, 64] {
        let data: Vec<f64> = sample(n * n).into_iter().map(f64::from).collect();
        let m = Matrix::from_slice(&data, n, n, VectorizationMode::ByRow, Context::global()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bencher, _| {
            bencher.iter(|| black_box(m.determinant().unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_vector_dot,
    bench_vector_add,
    bench_matrix_multiply,
    bench_transpose,
    bench_determinant
);
criterion_main!(benches);
