//! Benchmarks for puzzle setup and solving.
//!
//! # Benchmarks
//!
//! - **`puzzle_setup`**: Partitions a 1024×1024 extent and shuffles it for
//!   several grid sizes.
//! - **`puzzle_solve`**: Solves a seeded puzzle by swapping each tile home in
//!   turn, measuring swap and fixed-state recomputation cost.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench session
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use picswap_core::{Extent, GridSize};
use picswap_game::Puzzle;
use picswap_generator::PuzzleSeed;

const SEED: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";
const SIZES: [usize; 3] = [3, 8, 16];

fn bench_setup(c: &mut Criterion) {
    let seed = PuzzleSeed::from_str(SEED).unwrap();
    let extent = Extent::new(1024, 1024);

    for size in SIZES {
        let grid = GridSize::try_new(size, size).unwrap();
        c.bench_with_input(BenchmarkId::new("puzzle_setup", grid), &grid, |b, &grid| {
            b.iter(|| Puzzle::with_seed(&extent, hint::black_box(grid), seed));
        });
    }
}

fn bench_solve(c: &mut Criterion) {
    let seed = PuzzleSeed::from_str(SEED).unwrap();
    let extent = Extent::new(1024, 1024);

    for size in SIZES {
        let grid = GridSize::try_new(size, size).unwrap();
        c.bench_with_input(BenchmarkId::new("puzzle_solve", grid), &grid, |b, &grid| {
            b.iter_batched(
                || Puzzle::with_seed(&extent, grid, seed),
                |mut puzzle| {
                    for position in 0..puzzle.tile_count() {
                        if let Some(source) =
                            puzzle.tiles().iter().position(|tile| tile.home() == position)
                        {
                            let _ = puzzle.swap(position, source);
                        }
                    }
                    assert!(puzzle.is_complete());
                    puzzle
                },
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(5));
    targets = bench_setup, bench_solve
);
criterion_main!(benches);
