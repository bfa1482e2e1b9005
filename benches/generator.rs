//! Benchmarks for arrangement generation, view checking and puzzle assembly.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use streakview::generator::random_grid;
use streakview::puzzle::DEFAULT_MAX_ATTEMPTS;
use streakview::{assemble, Direction, Palette, ReachableSet, Shape, View};

fn palette() -> Palette {
    Palette::parse(&["r", "g", "b"]).expect("valid palette")
}

/// Benchmark drawing a random 5x5x5 arrangement.
fn bench_random_grid(c: &mut Criterion) {
    let shape = Shape::cube(5).expect("valid shape");
    let palette = palette();
    let mut rng = ChaCha12Rng::seed_from_u64(0);

    c.bench_function("random_grid_5", |b| {
        b.iter(|| random_grid(&mut rng, black_box(shape), &palette))
    });
}

/// Benchmark a single projection.
fn bench_project(c: &mut Criterion) {
    let mut rng = ChaCha12Rng::seed_from_u64(1);
    let (grid, _) = random_grid(&mut rng, Shape::cube(5).expect("valid shape"), &palette())
        .expect("valid arrangement");

    c.bench_function("project_5", |b| {
        b.iter(|| View::project(black_box(&grid), Direction::MinusX))
    });
}

/// Benchmark computing all 24 reachable views and searching for an impossible one.
fn bench_check(c: &mut Criterion) {
    let mut rng = ChaCha12Rng::seed_from_u64(2);
    let (grid, _) = random_grid(&mut rng, Shape::cube(5).expect("valid shape"), &palette())
        .expect("valid arrangement");

    c.bench_function("reachable_set_and_check_5", |b| {
        b.iter(|| ReachableSet::compute(black_box(&grid)).impossible_direction())
    });
}

/// Benchmark assembling complete puzzles at every default size.
fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let palette = palette();
    for side in [3, 4, 5] {
        let shape = Shape::cube(side).expect("valid shape");
        let mut rng = ChaCha12Rng::seed_from_u64(60);
        group.bench_function(format!("{side}x{side}x{side}"), |b| {
            b.iter(|| assemble(&mut rng, black_box(shape), &palette, DEFAULT_MAX_ATTEMPTS))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_random_grid, bench_project, bench_check, bench_assemble);
criterion_main!(benches);
