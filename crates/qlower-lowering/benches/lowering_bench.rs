//! Benchmarks for the lowering passes
//!
//! Run with: cargo bench -p qlower-lowering

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::PI;

use qlower_ir::{AtomicObservable, Observable, Operation, StandardGate, Tape};
use qlower_lowering::{
    Double, KernelRegistry, Lowerer, LoweringConfig, Single, WireMap, lower_observables,
    lower_operations,
};

/// Layered hardware-efficient ansatz: Rot on every wire, then a CNOT ladder.
fn ansatz(num_wires: u32, layers: usize) -> Tape {
    let mut tape = Tape::new();
    for layer in 0..layers {
        for q in 0..num_wires {
            let angle = PI * f64::from(q + 1) / (layer as f64 + 2.0);
            tape.rot(angle, angle / 2.0, angle / 3.0, q);
        }
        for q in 0..num_wires - 1 {
            tape.cnot(q, q + 1);
        }
    }
    tape
}

/// Tape whose gates all fall back to dense matrices.
fn matrix_heavy(num_wires: u32, depth: usize) -> Tape {
    let mut tape = Tape::new();
    for _ in 0..depth {
        for q in 0..num_wires {
            tape.apply(Operation::gate(StandardGate::SX, [q]).inv());
        }
        for q in 0..num_wires - 1 {
            tape.apply(Operation::gate(StandardGate::ISWAP, [q, q + 1]));
        }
    }
    tape
}

/// Benchmark the operation pass on kernel-only tapes
fn bench_lower_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("lower_operations");
    let registry = KernelRegistry::standard();

    for num_wires in &[4_u32, 10, 20, 50] {
        let tape = ansatz(*num_wires, 10);
        let map = WireMap::trivial(*num_wires);
        group.bench_with_input(BenchmarkId::new("double", num_wires), &tape, |b, tape| {
            b.iter(|| lower_operations::<Double>(black_box(tape), &map, &registry).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("single", num_wires), &tape, |b, tape| {
            b.iter(|| lower_operations::<Single>(black_box(tape), &map, &registry).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the matrix fallback path
fn bench_matrix_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_fallback");
    let registry = KernelRegistry::standard();

    for num_wires in &[4_u32, 10, 20] {
        let tape = matrix_heavy(*num_wires, 10);
        let map = WireMap::trivial(*num_wires);
        group.bench_with_input(BenchmarkId::new("double", num_wires), &tape, |b, tape| {
            b.iter(|| lower_operations::<Double>(black_box(tape), &map, &registry).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the observable pass
fn bench_lower_observables(c: &mut Criterion) {
    let mut group = c.benchmark_group("lower_observables");
    let hermitian = Array2::<Complex64>::eye(4);

    for num_wires in &[4_u32, 10, 20] {
        let mut tape = Tape::new();
        for q in 0..*num_wires {
            tape.observe(AtomicObservable::pauli_z(q));
        }
        for q in 0..num_wires - 1 {
            tape.observe(Observable::tensor([
                AtomicObservable::pauli_x(q).into(),
                AtomicObservable::hermitian(hermitian.clone(), [q, q + 1]).into(),
            ]));
        }
        let map = WireMap::trivial(*num_wires);
        group.bench_with_input(BenchmarkId::new("double", num_wires), &tape, |b, tape| {
            b.iter(|| lower_observables::<Double>(black_box(tape), &map).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the full facade, including wire-map construction
fn bench_lowerer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lowerer");
    let config = LoweringConfig::default();

    for num_wires in &[4_u32, 20] {
        let tape = ansatz(*num_wires, 5);
        group.bench_with_input(BenchmarkId::new("for_tape", num_wires), &tape, |b, tape| {
            b.iter(|| {
                let lowerer = Lowerer::for_tape(black_box(tape), &config).unwrap();
                lowerer.lower(tape).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_lower_operations,
    bench_matrix_fallback,
    bench_lower_observables,
    bench_lowerer
);
criterion_main!(benches);
