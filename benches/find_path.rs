use env_logger::Env;
use log::warn;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use nanorand::{Rng, WyRand};
use tile_pathfinding::prelude::*;
use tile_pathfinding::{ManualClock, SystemClock};

use std::sync::Arc;

fn random_grid(width: usize, height: usize, seed: u64) -> Grid {
    let mut grid = Grid::new(width, height);
    let mut rng = WyRand::new_seed(seed);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if rng.generate_range(0_u32..100) < 25 {
                grid.set_walkable(GridPoint::new(x, y), false);
            }
        }
    }
    // keep the corners open so that the benchmarks have something to find
    for (x, y) in [(0, 0), (width as i32 - 1, height as i32 - 1)] {
        grid.set_walkable(GridPoint::new(x, y), true);
    }
    grid
}

// Setup logging output
fn init() {
    let env = Env::default()
        .filter_or("MY_LOG_LEVEL", "info") // Change this to trace to see every search.
        .write_style_or("MY_LOG_STYLE", "always");

    let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
}

fn bench_open_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("Open Map");
    init();

    for size in [64, 256] {
        let grid = Grid::new(size, size);
        let goal = GridPoint::new(size as i32 - 1, size as i32 / 2);
        let pathfinder = Pathfinder::with_config(&grid, PathfinderConfig::UNCACHED);

        group.bench_with_input(BenchmarkId::new("raw", size), &goal, |b, &goal| {
            b.iter(|| pathfinder.find_raw_path(GridPoint::new(0, 0), goal))
        });

        let mut pathfinder = Pathfinder::with_config(&grid, PathfinderConfig::UNCACHED);
        group.bench_with_input(BenchmarkId::new("smoothed", size), &goal, |b, &goal| {
            b.iter(|| pathfinder.find_path(GridPoint::new(0, 0), goal))
        });
    }
}

fn bench_random_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("Random Map");
    group.sample_size(20);
    init();

    for size in [64, 256] {
        let grid = random_grid(size, size, 4);
        let goal = GridPoint::new(size as i32 - 1, size as i32 - 1);
        if Pathfinder::new(&grid).find_raw_path(GridPoint::new(0, 0), goal).is_none() {
            warn!("Random Map {}x{} has no Path, only failed searches are measured", size, size);
        }

        let mut uncached = Pathfinder::with_config(&grid, PathfinderConfig::UNCACHED);
        group.bench_with_input(BenchmarkId::new("uncached", size), &goal, |b, &goal| {
            b.iter(|| uncached.find_path(GridPoint::new(0, 0), goal))
        });

        let mut cached = Pathfinder::new(&grid);
        group.bench_with_input(BenchmarkId::new("cached", size), &goal, |b, &goal| {
            b.iter(|| cached.find_path(GridPoint::new(0, 0), goal))
        });
    }
}

fn bench_chunked_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("Chunked Map");
    group.sample_size(20);

    let size = 256;
    let goal = GridPoint::new(size as i32 - 1, size as i32 - 1);

    let warm = ChunkedMap::new(random_grid(size, size, 4), SystemClock::shared());
    let pathfinder = Pathfinder::with_config(&warm, PathfinderConfig::UNCACHED);
    group.bench_function("warm chunks", |b| {
        b.iter(|| pathfinder.find_raw_path(GridPoint::new(0, 0), goal))
    });

    group.bench_function("cold chunks", |b| {
        b.iter_batched(
            || ChunkedMap::new(random_grid(size, size, 4), Arc::new(ManualClock::new())),
            |map| {
                Pathfinder::with_config(&map, PathfinderConfig::UNCACHED)
                    .find_raw_path(GridPoint::new(0, 0), goal)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_open_map, bench_random_map, bench_chunked_map);
criterion_main!(benches);
