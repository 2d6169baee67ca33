//! Greedy coalescing of collidable tiles into few large rectangles.
//!
//! Two sweeps over the tile rectangles: the first joins runs of tiles along each row into strips,
//! the second stacks strips of identical extent on top of each other. The result is not a minimal
//! cover, but it is computed in a single sort plus linear pass per sweep.

use crate::collision::rect::Rect;
use std::cmp::Ordering;

/// Appended to each sweep so the last accumulated rectangle gets flushed.
const SENTINEL: Rect = Rect::new(-100.0, -100.0, 0.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    /// join tiles along a row
    Horizontal,
    /// stack equally sized strips in a column
    Vertical,
}

impl Sweep {
    /// Whether `next` has to start a new rectangle instead of extending the one that `last`
    /// was merged into.
    #[allow(clippy::float_cmp)]
    fn starts_new(self, last: &Rect, next: &Rect, tile_size: f32) -> bool {
        match self {
            Self::Horizontal => {
                let same_row = last.top == next.top;
                !same_row || last.origin_distance_sq(next) > tile_size * tile_size
            }
            Self::Vertical => {
                let stacked = last.left == next.left && last.bottom() == next.top;
                let same_size = last.width == next.width && last.height == next.height;
                !(stacked && same_size)
            }
        }
    }

    fn compare(self, a: &Rect, b: &Rect) -> Ordering {
        let key = |r: &Rect| match self {
            Self::Horizontal => (r.top, r.left),
            Self::Vertical => (r.left, r.top),
        };
        let (a0, a1) = key(a);
        let (b0, b1) = key(b);
        a0.total_cmp(&b0).then(a1.total_cmp(&b1))
    }
}

/// Merge adjacent rectangles in place, rows first, then columns.
pub fn merge_adjacent(rects: &mut Vec<Rect>, tile_size: f32) {
    merge_sweep(rects, Sweep::Horizontal, tile_size);
    merge_sweep(rects, Sweep::Vertical, tile_size);
}

fn merge_sweep(rects: &mut Vec<Rect>, sweep: Sweep, tile_size: f32) {
    rects.sort_by(|a, b| sweep.compare(a, b));
    rects.push(SENTINEL);

    let sorted = std::mem::take(rects);
    let mut current: Option<Rect> = None;
    let mut last = SENTINEL;

    for rect in sorted {
        let Some(acc) = current.as_mut() else {
            current = Some(rect);
            last = rect;
            continue;
        };

        if sweep.starts_new(&last, &rect, tile_size) {
            rects.push(*acc);
            current = Some(rect);
        } else {
            acc.stretch(&rect);
        }
        last = rect;
    }
}

/// One tile sized rectangle for every `true` cell of a row-major grid.
pub fn tile_rects(grid: &[bool], width: i32, tile_size: f32) -> Vec<Rect> {
    if width <= 0 {
        return Vec::new();
    }
    grid.iter()
        .enumerate()
        .filter(|(_, &solid)| solid)
        .map(|(idx, _)| {
            let x = (idx as i32 % width) as f32;
            let y = (idx as i32 / width) as f32;
            Rect::new(x * tile_size, y * tile_size, tile_size, tile_size)
        })
        .collect()
}
