use crate::collision::merge::{merge_adjacent, tile_rects};
use crate::collision::Rect;
use std::collections::BTreeSet;

const T: f32 = 32.0;

fn grid(width: i32, height: i32, solid: &[(i32, i32)]) -> Vec<bool> {
    let mut cells = vec![false; (width * height) as usize];
    for &(x, y) in solid {
        cells[(x + y * width) as usize] = true;
    }
    cells
}

fn merged(width: i32, height: i32, solid: &[(i32, i32)]) -> Vec<Rect> {
    let mut rects = tile_rects(&grid(width, height, solid), width, T);
    merge_adjacent(&mut rects, T);
    rects
}

/// Tiles covered by the rectangles; panics if any tile is covered twice.
fn covered(rects: &[Rect]) -> BTreeSet<(i32, i32)> {
    let mut tiles = BTreeSet::new();
    for r in rects {
        let (x0, y0) = ((r.left / T) as i32, (r.top / T) as i32);
        let (x1, y1) = ((r.right() / T) as i32, (r.bottom() / T) as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                assert!(tiles.insert((x, y)), "tile ({}, {}) covered twice", x, y);
            }
        }
    }
    tiles
}

fn sorted(rects: &[Rect]) -> Vec<(i32, i32, i32, i32)> {
    let mut keys: Vec<_> = rects
        .iter()
        .map(|r| (r.left as i32, r.top as i32, r.width as i32, r.height as i32))
        .collect();
    keys.sort_unstable();
    keys
}

/// Deterministic pseudo random grid, roughly a third solid.
fn noise_grid(width: i32, height: i32, seed: u64) -> Vec<(i32, i32)> {
    let mut state = seed;
    let mut solid = Vec::new();
    for y in 0..height {
        for x in 0..width {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            if (state >> 33) % 3 == 0 {
                solid.push((x, y));
            }
        }
    }
    solid
}

#[test]
fn test_isolated_tile() {
    let rects = merged(5, 5, &[(2, 2)]);

    assert_eq!(rects, vec![Rect::new(64.0, 64.0, 32.0, 32.0)]);
}

#[test]
fn test_empty_grid() {
    assert!(merged(4, 4, &[]).is_empty());
}

#[test]
fn test_row_becomes_one_strip() {
    let rects = merged(6, 3, &[(1, 1), (2, 1), (3, 1), (4, 1)]);

    assert_eq!(rects, vec![Rect::new(32.0, 32.0, 128.0, 32.0)]);
}

#[test]
fn test_gap_breaks_row() {
    let rects = merged(6, 1, &[(0, 0), (1, 0), (3, 0)]);

    assert_eq!(sorted(&rects), vec![(0, 0, 64, 32), (96, 0, 32, 32)]);
}

#[test]
fn test_block_becomes_one_rect() {
    let solid: Vec<_> = (0..3).flat_map(|y| (1..3).map(move |x| (x, y))).collect();

    let rects = merged(4, 4, &solid);

    assert_eq!(rects, vec![Rect::new(32.0, 0.0, 64.0, 96.0)]);
}

#[test]
fn test_strips_of_different_width_stay_apart() {
    let rects = merged(4, 4, &[(0, 0), (1, 0), (0, 1)]);

    assert_eq!(sorted(&rects), vec![(0, 0, 64, 32), (0, 32, 32, 32)]);
}

#[test]
fn test_row_end_does_not_join_next_row() {
    // last tile of row 0 sits right above the first tile of row 1
    let solid = [(1, 0), (1, 1), (2, 1)];

    let rects = merged(4, 4, &solid);

    assert_eq!(sorted(&rects), vec![(32, 0, 32, 32), (32, 32, 64, 32)]);
    assert_eq!(covered(&rects), solid.iter().copied().collect());
}

#[test]
fn test_coverage_is_exact() {
    for seed in 1..20 {
        let solid = noise_grid(24, 16, seed);

        let rects = merged(24, 16, &solid);

        assert!(rects.len() <= solid.len());
        assert_eq!(covered(&rects), solid.iter().copied().collect());
    }
}

#[test]
fn test_merge_is_idempotent() {
    for seed in 1..20 {
        let rects = merged(24, 16, &noise_grid(24, 16, seed));

        let mut again = rects.clone();
        merge_adjacent(&mut again, T);

        assert_eq!(sorted(&again), sorted(&rects));
    }
}
