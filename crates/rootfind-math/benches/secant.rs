//! Benchmarks for the secant solver.
//!
//! Run with: cargo bench -p rootfind-math

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use rootfind_math::diagnostics::SolverOptions;
use rootfind_math::expression::compile;
use rootfind_math::solvers::{secant, SecantSolver, SolverConfig};

// =============================================================================
// TEST FUNCTIONS
// =============================================================================

/// Price of a 5% annual-coupon bond at yield `y`, minus a target price.
fn bond_price_gap(y: f64) -> f64 {
    let mut pv = 0.0;
    for t in 1..=10 {
        pv += 5.0 / (1.0 + y).powi(t);
    }
    pv += 100.0 / (1.0 + y).powi(10);
    pv - 95.0
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_closures(c: &mut Criterion) {
    let mut group = c.benchmark_group("secant/closure");
    let config = SolverConfig::new(1e-12, 100);

    group.bench_function("sqrt_2", |b| {
        b.iter(|| secant(|x: f64| x * x - 2.0, black_box(1.0), black_box(2.0), &config))
    });

    group.bench_function("cos_fixed_point", |b| {
        b.iter(|| secant(|x: f64| x.cos() - x, black_box(0.0), black_box(1.0), &config))
    });

    group.bench_function("bond_yield", |b| {
        b.iter(|| secant(bond_price_gap, black_box(0.04), black_box(0.06), &config))
    });

    group.finish();
}

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("secant/logging");
    let config = SolverConfig::new(1e-12, 100);

    for logging in [false, true] {
        group.bench_with_input(BenchmarkId::from_parameter(logging), &logging, |b, &logging| {
            b.iter(|| {
                let options = SolverOptions::default().with_logging(logging);
                let mut solver =
                    SecantSolver::with_options(bond_price_gap, 0.04, 0.06, options).unwrap();
                black_box(solver.solve(&config))
            })
        });
    }

    group.finish();
}

fn bench_expression(c: &mut Criterion) {
    let config = SolverConfig::new(1e-12, 100);
    let f = compile("x -> x^3 + x - 1").unwrap();

    c.bench_function("secant/expression", |b| {
        b.iter(|| secant(|x| f.eval(x), black_box(0.0), black_box(1.0), &config))
    });
}

criterion_group!(benches, bench_closures, bench_logging, bench_expression);
criterion_main!(benches);
