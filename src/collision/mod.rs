//! # Collision
//!
//! Static collision geometry of a world: collidable terrain tiles are merged into rectangles,
//! four border rectangles keep entities from leaving the map, and every rectangle becomes one
//! zero-friction box fixture in the physics engine.

pub mod merge;
pub mod rect;

pub use rect::Rect;

use crate::world::consts::{BORDER_PADDING, BORDER_THICKNESS, PIXELS_PER_METRE, TILE_SIZE_F};
use crate::world::{TilePos, World, WorldId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Box fixture request in physics units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub centre: (f32, f32),
    pub half_extents: (f32, f32),
    pub friction: f32,
}

impl Fixture {
    /// Convert a pixel space rectangle into a static, frictionless box.
    pub fn from_pixel_rect(rect: &Rect) -> Self {
        let scaled = rect.scaled(1.0 / PIXELS_PER_METRE);
        Self {
            centre: scaled.centre(),
            half_extents: (scaled.width / 2.0, scaled.height / 2.0),
            friction: 0.0,
        }
    }
}

/// The physics engine side: receives one static fixture per collision rectangle.
pub trait PhysicsSink {
    fn create_static_fixture(&mut self, world: WorldId, fixture: &Fixture);
}

impl PhysicsSink for Vec<(WorldId, Fixture)> {
    fn create_static_fixture(&mut self, world: WorldId, fixture: &Fixture) {
        self.push((world, *fixture));
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionMap {
    world: WorldId,
    rects: Vec<Rect>,
    borders: Vec<Rect>,
    /// tile -> index into `rects` of the rectangle covering it
    cell_grid: HashMap<TilePos, usize>,
}

impl CollisionMap {
    pub fn build(world: &World) -> Self {
        let (width, _) = world.tile_size();
        let grid = world.terrain().collision_grid();

        let mut rects = merge::tile_rects(&grid, width, TILE_SIZE_F);
        let tile_count = rects.len();
        merge::merge_adjacent(&mut rects, TILE_SIZE_F);
        debug!(
            "world {}: merged {} collidable tiles into {} rectangles",
            world.id(),
            tile_count,
            rects.len()
        );

        let cell_grid = build_cell_grid(&rects);
        let (pixel_width, pixel_height) = world.pixel_size();
        let borders = border_rects(pixel_width, pixel_height);

        Self {
            world: world.id(),
            rects,
            borders,
            cell_grid,
        }
    }

    /// Send every rectangle, borders included, to the physics engine. Returns the fixture count.
    pub fn create_fixtures<P: PhysicsSink + ?Sized>(&self, physics: &mut P) -> usize {
        let mut count = 0;
        for rect in self.all_rects() {
            physics.create_static_fixture(self.world, &Fixture::from_pixel_rect(rect));
            count += 1;
        }
        trace!("world {}: created {} static fixtures", self.world, count);
        count
    }

    pub const fn world(&self) -> WorldId {
        self.world
    }

    /// Merged terrain rectangles, without the borders.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn borders(&self) -> &[Rect] {
        &self.borders
    }

    pub fn all_rects(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter().chain(self.borders.iter())
    }

    /// The merged rectangle covering the given tile, if it is collidable.
    pub fn rect_at(&self, tile: TilePos) -> Option<Rect> {
        self.cell_grid.get(&tile).map(|&idx| self.rects[idx])
    }

    /// All distinct merged rectangles covering any tile within `range` tiles of `tile`.
    pub fn surrounding_tiles(&self, tile: TilePos, range: i32) -> Vec<Rect> {
        let mut found = BTreeSet::new();
        for dy in -range..=range {
            for dx in -range..=range {
                if let Some(&idx) = self.cell_grid.get(&tile.get_translated(dx, dy)) {
                    found.insert(idx);
                }
            }
        }
        found.into_iter().map(|idx| self.rects[idx]).collect()
    }
}

fn build_cell_grid(rects: &[Rect]) -> HashMap<TilePos, usize> {
    let mut cell_grid = HashMap::new();
    for (idx, rect) in rects.iter().enumerate() {
        let left = (rect.left / TILE_SIZE_F) as i32;
        let top = (rect.top / TILE_SIZE_F) as i32;
        let right = (rect.right() / TILE_SIZE_F) as i32;
        let bottom = (rect.bottom() / TILE_SIZE_F) as i32;
        for y in top..bottom {
            for x in left..right {
                cell_grid.insert(TilePos::from_xy(x, y), idx);
            }
        }
    }
    cell_grid
}

/// Four walls just outside the map, left, top, right and bottom.
pub fn border_rects(pixel_width: f32, pixel_height: f32) -> Vec<Rect> {
    let offset = BORDER_THICKNESS + BORDER_PADDING;
    vec![
        Rect::new(-offset, 0.0, BORDER_THICKNESS, pixel_height),
        Rect::new(0.0, -offset, pixel_width, BORDER_THICKNESS),
        Rect::new(pixel_width + BORDER_PADDING, 0.0, BORDER_THICKNESS, pixel_height),
        Rect::new(0.0, pixel_height + BORDER_PADDING, pixel_width, BORDER_THICKNESS),
    ]
}
