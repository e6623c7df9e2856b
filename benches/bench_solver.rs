use criterion::{criterion_group, criterion_main, Criterion};

use cross_solver::constants::ALL_COLORS;
use cross_solver::coord::{CrossCoord, CrossState};
use cross_solver::cubie::CubieCube;
use cross_solver::facelet::Color;
use cross_solver::moves::Move::*;
use cross_solver::moves::MoveEffects;
use cross_solver::pruning::DistanceTable;
use cross_solver::scramble::scramble_from_str;
use cross_solver::solver::CrossSolver;

const SCRAMBLE: &str = "D2 B2 R' F2 U2 L' B2 U2 R2 B2 R' B' U' L2 F' D' L' F2 U' B";

fn cc_apply_moves() {
    let cc = CubieCube::default();
    let _ = cc.apply_moves(&[R, U, R3, U3]);
}

fn bench_moves(c: &mut Criterion) {
    let coord = CrossCoord::new();
    let effects = MoveEffects::new();
    let state = CrossState::solved(Color::U);
    let mut group = c.benchmark_group("Moves");
    group.bench_function("cubie apply_moves", |b| b.iter(cc_apply_moves));
    group.bench_function("cross state neighbours", |b| {
        b.iter(|| {
            effects
                .iter()
                .map(|(_, e)| coord.encode(&state.apply(e)).unwrap())
                .sum::<usize>()
        })
    });
    group.finish();
}

fn bench_table(c: &mut Criterion) {
    let coord = CrossCoord::new();
    let effects = MoveEffects::new();
    let mut group = c.benchmark_group("Distance table");
    group.sample_size(10);
    group.bench_function("build", |b| {
        b.iter(|| DistanceTable::build(Color::D, &coord, &effects).unwrap())
    });
    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    let solver = CrossSolver::in_memory();
    let cc = CubieCube::from(&scramble_from_str(SCRAMBLE).unwrap());
    // warm tables
    solver.best_cross_solutions(&cc, None, &ALL_COLORS).unwrap();

    c.bench_function("Solve cross", |b| {
        b.iter(|| solver.solve_cross(&cc, Color::D, None).unwrap())
    });
    c.bench_function("Best cross", |b| {
        b.iter(|| solver.best_cross_solutions(&cc, None, &ALL_COLORS).unwrap())
    });
}

criterion_group!(benches, bench_solver, bench_table, bench_moves);
criterion_main!(benches);
