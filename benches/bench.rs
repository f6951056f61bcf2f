use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sudoku_solver::grid::{EXAMPLE, Grid};
use sudoku_solver::solver::Solver;

fn bench_solve_example(c: &mut Criterion) {
    let puzzle = Grid::new(EXAMPLE);

    c.bench_function("solve_example", |b| {
        b.iter(|| {
            let mut solver = Solver::new(black_box(puzzle));
            solver.solve().unwrap()
        });
    });
}

fn bench_solve_empty(c: &mut Criterion) {
    let puzzle = Grid::empty();

    c.bench_function("solve_empty", |b| {
        b.iter(|| {
            let mut solver = Solver::new(black_box(puzzle));
            solver.solve().unwrap()
        });
    });
}

fn bench_partial_validity(c: &mut Criterion) {
    let grid = Grid::new(EXAMPLE);

    c.bench_function("is_partial_valid", |b| {
        b.iter(|| black_box(&grid).is_partial_valid());
    });
}

criterion_group!(
    benches,
    bench_solve_example,
    bench_solve_empty,
    bench_partial_validity
);
criterion_main!(benches);
