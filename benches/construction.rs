//! Benchmarks for filling a one-million-element Vec4 array
//!
//! Compares the construction paths of `Vec4`. All of them must compile down to
//! four stores per element; a gap here means one path initializes more than
//! the 16 bytes it owns.

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use vec4len::{Vec4, DEFAULT_COUNT};

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");
    group.throughput(Throughput::Elements(DEFAULT_COUNT as u64));

    let mut values = vec![Vec4::ZERO; DEFAULT_COUNT];

    group.bench_function("new", |bencher| {
        bencher.iter(|| {
            for (i, slot) in values.iter_mut().enumerate() {
                let f = i as f32;
                *slot = Vec4::new(f, f, f, f);
            }
            black_box(&values);
        });
    });

    group.bench_function("splat", |bencher| {
        bencher.iter(|| {
            for (i, slot) in values.iter_mut().enumerate() {
                *slot = Vec4::splat(i as f32);
            }
            black_box(&values);
        });
    });

    group.bench_function("from_array", |bencher| {
        bencher.iter(|| {
            for (i, slot) in values.iter_mut().enumerate() {
                let f = i as f32;
                *slot = Vec4::from_array([f, f, f, f]);
            }
            black_box(&values);
        });
    });

    group.bench_function("field_assign", |bencher| {
        bencher.iter(|| {
            for (i, slot) in values.iter_mut().enumerate() {
                let f = i as f32;
                let mut v = Vec4::ZERO;
                v.x = f;
                v.y = f;
                v.z = f;
                v.w = f;
                *slot = v;
            }
            black_box(&values);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_construct);
criterion_main!(benches);
