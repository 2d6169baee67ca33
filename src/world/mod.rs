//! The loaded world model: worlds, buildings, the world graph and the door connection table.

pub mod connection;
pub mod consts;
pub mod env;
pub mod graph;
pub mod position;
pub mod service;
pub mod terrain;

pub use connection::{ConnectionTable, Location};
pub use env::env;
pub use graph::WorldGraph;
pub use position::{TilePos, TileRect};
pub use service::WorldService;
pub use terrain::{BlockType, LayerType, Terrain};

use serde::{Deserialize, Serialize};

pub type WorldId = usize;
pub type DoorId = i32;
pub type BuildingId = usize;

/// One loaded map, either the outdoor world or a building interior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    id: WorldId,
    name: String,
    is_outside: bool,
    terrain: Terrain,
}

impl World {
    pub fn new<S: Into<String>>(id: WorldId, name: S, is_outside: bool, terrain: Terrain) -> Self {
        Self {
            id,
            name: name.into(),
            is_outside,
            terrain,
        }
    }

    pub const fn id(&self) -> WorldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn is_outside(&self) -> bool {
        self.is_outside
    }

    /// Size of the world in tiles.
    pub const fn tile_size(&self) -> (i32, i32) {
        self.terrain.size()
    }

    /// Size of the world in world space pixels.
    pub fn pixel_size(&self) -> (f32, f32) {
        let (w, h) = self.terrain.size();
        (w as f32 * consts::TILE_SIZE_F, h as f32 * consts::TILE_SIZE_F)
    }

    pub const fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn block_at(&self, tile: TilePos, layer: LayerType) -> BlockType {
        self.terrain.block_at(tile, layer)
    }
}

/// A region of a world that leads into an interior world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    id: BuildingId,
    bounds: TileRect,
    outside_world: WorldId,
    inside_world: WorldId,
    inside_world_name: String,
    doors: Vec<Location>,
}

impl Building {
    pub fn new<S: Into<String>>(
        id: BuildingId,
        bounds: TileRect,
        outside_world: WorldId,
        inside_world: WorldId,
        inside_world_name: S,
    ) -> Self {
        Self {
            id,
            bounds,
            outside_world,
            inside_world,
            inside_world_name: inside_world_name.into(),
            doors: Vec::new(),
        }
    }

    /// Register an entrance. Doors are located in the outside world.
    pub fn add_door(&mut self, location: Location) {
        if !self.doors.contains(&location) {
            self.doors.push(location);
        }
    }

    pub const fn id(&self) -> BuildingId {
        self.id
    }

    pub const fn bounds(&self) -> TileRect {
        self.bounds
    }

    pub const fn outside_world(&self) -> WorldId {
        self.outside_world
    }

    pub const fn inside_world(&self) -> WorldId {
        self.inside_world
    }

    pub fn inside_world_name(&self) -> &str {
        &self.inside_world_name
    }

    pub fn doors(&self) -> &[Location] {
        &self.doors
    }

    pub fn contains(&self, location: &Location) -> bool {
        location.world == self.outside_world && self.bounds.contains(location.tile)
    }
}
