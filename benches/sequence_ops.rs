//! Benchmarks for packed sequence operations
//!
//! Run with: cargo bench --bench sequence_ops

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use packed_dna::{Sequence, SliceStrategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

/// Generate a random DNA sequence
fn generate_sequence(len: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len)
        .map(|_| b"ATGC"[rng.gen_range(0..4)] as char)
        .collect()
}

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");
    for size in SIZES {
        let text = generate_sequence(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| Sequence::new(black_box(text)))
        });
    }
    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");
    for size in SIZES {
        let seq = Sequence::new(&generate_sequence(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("pair", size), &seq, |b, seq| {
            b.iter(|| black_box(seq).pair())
        });
        group.bench_with_input(BenchmarkId::new("reverse", size), &seq, |b, seq| {
            let mut seq = seq.clone();
            b.iter(|| seq.reverse())
        });
        group.bench_with_input(BenchmarkId::new("slice_reencode", size), &seq, |b, seq| {
            b.iter(|| seq.slice_with(black_box(3..size - 3), SliceStrategy::Reencode))
        });
        group.bench_with_input(BenchmarkId::new("slice_bitshift", size), &seq, |b, seq| {
            b.iter(|| seq.slice_with(black_box(3..size - 3), SliceStrategy::BitShift))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    for size in SIZES {
        let seq = Sequence::new(&generate_sequence(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("find_all", size), &seq, |b, seq| {
            b.iter(|| seq.find_all(black_box("gattaca")))
        });
        group.bench_with_input(BenchmarkId::new("count", size), &seq, |b, seq| {
            b.iter(|| seq.count(black_box("gc")))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_construct, bench_transforms, bench_search);
criterion_main!(benches);
