use city_worlds::collision::merge;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const TILE: f32 = 32.0;

/// A square town: solid city blocks with a road grid and a scattering of trees.
fn town_grid(size: i32) -> Vec<bool> {
    let mut seed: u32 = 7;
    (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let road = x % 16 < 3 || y % 12 < 3;
            let tree = (seed >> 16) % 11 == 0;
            !road || tree
        })
        .collect()
}

pub fn rect_merge_benchmark(c: &mut Criterion) {
    // init logger
    pretty_env_logger::init();

    let size = 128;
    let grid = town_grid(size);

    c.bench_function("merge town", |b| {
        b.iter(|| {
            let mut rects = merge::tile_rects(black_box(&grid), size, TILE);
            merge::merge_adjacent(&mut rects, TILE);
            rects
        })
    });
}

criterion_group!(benches, rect_merge_benchmark);
criterion_main!(benches);
