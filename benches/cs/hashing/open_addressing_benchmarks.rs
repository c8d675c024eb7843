use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use probe_table::{DoubleHashingTable, LinearProbingHashTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn random_keys(n: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|_| rng.gen()).collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &size in SIZES.iter() {
        let keys = random_keys(size);
        group.bench_with_input(BenchmarkId::new("linear", size), &keys, |b, keys| {
            b.iter(|| {
                let mut table = LinearProbingHashTable::new(3, 0.75).unwrap();
                for &k in keys {
                    table.insert(k, k);
                }
                black_box(table.len())
            })
        });
        group.bench_with_input(BenchmarkId::new("double", size), &keys, |b, keys| {
            b.iter(|| {
                let mut table = DoubleHashingTable::new(3, 0.75).unwrap();
                for &k in keys {
                    table.insert(k, k);
                }
                black_box(table.len())
            })
        });
        group.bench_with_input(BenchmarkId::new("std", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = std::collections::HashMap::new();
                for &k in keys {
                    map.insert(k, k);
                }
                black_box(map.len())
            })
        });
    }
    group.finish();
}

fn bench_lookup_after_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_after_churn");
    for &size in SIZES.iter() {
        let keys = random_keys(size);

        let mut linear = LinearProbingHashTable::new(size, 0.75).unwrap();
        let mut double = DoubleHashingTable::new(size, 0.75).unwrap();
        for &k in &keys {
            linear.insert(k, k);
            double.insert(k, k);
        }
        // leave tombstones behind half of the keys
        for &k in keys.iter().step_by(2) {
            linear.remove(&k);
            double.remove(&k);
        }

        group.bench_function(BenchmarkId::new("linear", size), |b| {
            b.iter(|| {
                let mut hits = 0;
                for k in &keys {
                    if linear.contains_key(k) {
                        hits += 1;
                    }
                }
                black_box(hits)
            })
        });
        group.bench_function(BenchmarkId::new("double", size), |b| {
            b.iter(|| {
                let mut hits = 0;
                for k in &keys {
                    if double.contains_key(k) {
                        hits += 1;
                    }
                }
                black_box(hits)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup_after_churn);
criterion_main!(benches);
