use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Integer coordinate of a tile inside one world's local grid.
#[derive(
    Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct TilePos {
    x: i32,
    y: i32,
}

impl Display for TilePos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl TilePos {
    pub const fn from_xy(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a position given in map pixel units into the tile containing it.
    pub fn from_map_pixels(x: f32, y: f32, resolution: i32) -> Self {
        let res = resolution as f32;
        Self {
            x: (x / res).floor() as i32,
            y: (y / res).floor() as i32,
        }
    }

    pub const fn x(&self) -> i32 {
        self.x
    }

    pub const fn y(&self) -> i32 {
        self.y
    }

    pub const fn get_translated(&self, dx: i32, dy: i32) -> Self {
        Self::from_xy(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Axis aligned rectangle of tiles, e.g. the footprint of a building.
#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl TileRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Edges are inclusive on all sides, so a door placed on the outer edge of a building's
    /// footprint still belongs to that building.
    pub const fn contains(&self, tile: TilePos) -> bool {
        self.left <= tile.x
            && self.left + self.width >= tile.x
            && self.top <= tile.y
            && self.top + self.height >= tile.y
    }
}
