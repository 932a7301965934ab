extern crate solver;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use solver::{DavisPutnam, Formula, Instance, Solver};

/// n pigeons into n - 1 holes, always unsatisfiable
fn pigeonhole(pigeons: i64) -> Instance {
    let holes = pigeons - 1;
    let p = |i: i64, h: i64| i * holes + h + 1;
    let mut clauses: Vec<Vec<i64>> =
        (0..pigeons).map(|i| (0..holes).map(|h| p(i, h)).collect()).collect();
    for h in 0..holes {
        for i in 0..pigeons {
            for j in i + 1..pigeons {
                clauses.push(vec![-p(i, h), -p(j, h)]);
            }
        }
    }
    Instance::from_formula(Formula::from_signed(clauses).unwrap()).unwrap()
}

/// Implication chain closed by a unit clause; solved by propagation alone
fn chain(length: i64) -> Instance {
    let mut clauses: Vec<Vec<i64>> = (1..length).map(|i| vec![-i, i + 1]).collect();
    clauses.push(vec![1]);
    clauses.push(vec![-length, 1]);
    Instance::from_formula(Formula::from_signed(clauses).unwrap()).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Davis-Putnam");

    for pigeons in 4..=6 {
        let instance = pigeonhole(pigeons);
        group.bench_with_input(BenchmarkId::new("pigeonhole", pigeons), &instance, |b, instance| {
            b.iter_batched(
                || instance.clone(),
                |instance| DavisPutnam.solve(&instance),
                BatchSize::SmallInput,
            )
        });
    }

    for length in [50, 200].iter() {
        let instance = chain(*length);
        group.bench_with_input(BenchmarkId::new("chain", length), &instance, |b, instance| {
            b.iter(|| DavisPutnam.solve(instance))
        });
    }

    group.finish()
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}
criterion_main!(benches);
