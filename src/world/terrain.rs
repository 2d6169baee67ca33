//! Block types and the per-layer tile grids of a world.

use crate::loader::LoadError;
use crate::raws::{Layer, TileMap};
use crate::world::consts::{BUILDINGS_LAYER, TILESET_RESOLUTION};
use crate::world::TilePos;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BlockType {
    #[default]
    Blank,
    Grass,
    Dirt,
    Road,
    Pavement,
    Sand,
    Water,
    Cobblestone,
    Tree,
    Fence,
    SlidingDoor,
    BuildingWall,
    BuildingWindowOn,
    BuildingWindowOff,
    BuildingRoof,
    BuildingEdge,
    BuildingRoofCorner,
    WoodenFloor,
    EntranceMat,
    Rug,
    RugCorner,
    RugEdge,
}

impl BlockType {
    const ALL: [Self; 22] = [
        Self::Blank,
        Self::Grass,
        Self::Dirt,
        Self::Road,
        Self::Pavement,
        Self::Sand,
        Self::Water,
        Self::Cobblestone,
        Self::Tree,
        Self::Fence,
        Self::SlidingDoor,
        Self::BuildingWall,
        Self::BuildingWindowOn,
        Self::BuildingWindowOff,
        Self::BuildingRoof,
        Self::BuildingEdge,
        Self::BuildingRoofCorner,
        Self::WoodenFloor,
        Self::EntranceMat,
        Self::Rug,
        Self::RugCorner,
        Self::RugEdge,
    ];

    /// Map a tile id from the map file to its block type. Ids past the catalogue are `None`.
    pub fn from_gid(gid: u32) -> Option<Self> {
        Self::ALL.get(gid as usize).copied()
    }

    pub const fn is_collidable(self) -> bool {
        matches!(
            self,
            Self::Water
                | Self::Tree
                | Self::BuildingWall
                | Self::BuildingEdge
                | Self::BuildingRoof
                | Self::BuildingRoofCorner
        )
    }

    pub const fn as_str(&self) -> &str {
        match self {
            Self::Blank => "blank",
            Self::Grass => "grass",
            Self::Dirt => "dirt",
            Self::Road => "road",
            Self::Pavement => "pavement",
            Self::Sand => "sand",
            Self::Water => "water",
            Self::Cobblestone => "cobblestone",
            Self::Tree => "tree",
            Self::Fence => "fence",
            Self::SlidingDoor => "sliding door",
            Self::BuildingWall => "building wall",
            Self::BuildingWindowOn => "lit window",
            Self::BuildingWindowOff => "dark window",
            Self::BuildingRoof => "roof",
            Self::BuildingEdge => "building edge",
            Self::BuildingRoofCorner => "roof corner",
            Self::WoodenFloor => "wooden floor",
            Self::EntranceMat => "entrance mat",
            Self::Rug => "rug",
            Self::RugCorner => "rug corner",
            Self::RugEdge => "rug edge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerType {
    Underterrain,
    Terrain,
    Overterrain,
    Objects,
    Collisions,
    Buildings,
}

impl LayerType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "underterrain" => Some(Self::Underterrain),
            "terrain" => Some(Self::Terrain),
            "overterrain" => Some(Self::Overterrain),
            "objects" => Some(Self::Objects),
            "collisions" => Some(Self::Collisions),
            BUILDINGS_LAYER => Some(Self::Buildings),
            _ => None,
        }
    }

    pub const fn is_tile_layer(self) -> bool {
        matches!(self, Self::Underterrain | Self::Terrain | Self::Overterrain)
    }
}

/// A free-standing decoration from the `objects` layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    pub block: BlockType,
    pub rotation: f32,
    pub tile: TilePos,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TileLayer {
    layer_type: LayerType,
    blocks: Vec<BlockType>,
}

/// The tile payload of one world: a dense block grid per tile layer plus the object list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Terrain {
    width: i32,
    height: i32,
    layers: Vec<TileLayer>,
    objects: Vec<WorldObject>,
}

impl Terrain {
    /// Build the terrain from all visible, recognised layers of a parsed map.
    ///
    /// # Errors
    ///
    /// Fails if the map size is negative or its tile count does not fit an `i32`, and if a tile
    /// lies outside of the map grid.
    pub fn from_tile_map(map_name: &str, tmx: &TileMap) -> Result<Self, LoadError> {
        let fits = tmx.width >= 0 && tmx.height >= 0 && tmx.width.checked_mul(tmx.height).is_some();
        if !fits {
            error!(
                "map '{}' declares {}x{} tiles",
                map_name, tmx.width, tmx.height
            );
            return Err(LoadError::InvalidMapSize {
                map: map_name.to_string(),
                width: tmx.width,
                height: tmx.height,
            });
        }

        let mut terrain = Self {
            width: tmx.width,
            height: tmx.height,
            layers: Vec::new(),
            objects: Vec::new(),
        };
        let mut tile_layer_count = 0;

        for layer in &tmx.layers {
            let Some(layer_type) = LayerType::from_name(&layer.name) else {
                warn!("map '{}': invalid layer name '{}'", map_name, layer.name);
                continue;
            };
            if !layer.visible {
                debug!("map '{}': skipping invisible layer '{}'", map_name, layer.name);
                continue;
            }

            if layer_type.is_tile_layer() {
                terrain.load_tile_layer(map_name, layer_type, layer)?;
                tile_layer_count += 1;
            } else if layer_type == LayerType::Objects {
                terrain.load_objects(layer);
            }
        }

        debug!(
            "map '{}': discovered {} tile layer(s) and {} object(s)",
            map_name,
            tile_layer_count,
            terrain.objects.len()
        );
        Ok(terrain)
    }

    fn load_tile_layer(
        &mut self,
        map_name: &str,
        layer_type: LayerType,
        layer: &Layer,
    ) -> Result<(), LoadError> {
        let mut blocks = vec![BlockType::Blank; self.cell_count()];

        for tile in &layer.tiles {
            let Some(block) = BlockType::from_gid(tile.gid) else {
                warn!(
                    "map '{}': unknown tile id {} at ({}, {})",
                    map_name, tile.gid, tile.x, tile.y
                );
                continue;
            };
            if block == BlockType::Blank {
                continue;
            }

            let pos = TilePos::from_xy(tile.x, tile.y);
            let idx = self
                .index_of(pos)
                .ok_or_else(|| LoadError::TileOutOfBounds {
                    map: map_name.to_string(),
                    tile: pos,
                    width: self.width,
                    height: self.height,
                })?;
            blocks[idx] = block;
        }

        // a repeated layer replaces the previous one of the same type
        self.layers.retain(|l| l.layer_type != layer_type);
        self.layers.push(TileLayer { layer_type, blocks });
        Ok(())
    }

    fn load_objects(&mut self, layer: &Layer) {
        for object in &layer.objects {
            let Some(block) = object.gid.and_then(BlockType::from_gid) else {
                continue;
            };
            if block == BlockType::Blank {
                continue;
            }
            // objects are anchored at their bottom left corner
            let tile = TilePos::from_map_pixels(
                object.x,
                object.y - TILESET_RESOLUTION as f32,
                TILESET_RESOLUTION,
            );
            self.objects.push(WorldObject {
                block,
                rotation: object.rotation,
                tile,
            });
        }
    }

    const fn index_of(&self, pos: TilePos) -> Option<usize> {
        if pos.x() < 0 || pos.y() < 0 || pos.x() >= self.width || pos.y() >= self.height {
            None
        } else {
            Some((pos.x() + pos.y() * self.width) as usize)
        }
    }

    /// Width and height are non-negative with a product that fits an `i32`.
    const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub const fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Block at the given tile of a layer. Tiles outside the grid or on a missing layer are blank.
    pub fn block_at(&self, pos: TilePos, layer_type: LayerType) -> BlockType {
        let Some(idx) = self.index_of(pos) else {
            return BlockType::Blank;
        };
        self.layers
            .iter()
            .find(|l| l.layer_type == layer_type)
            .map_or(BlockType::Blank, |l| l.blocks[idx])
    }

    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    /// Dense row-major grid of collidable flags, taken from the terrain layer only.
    pub fn collision_grid(&self) -> Vec<bool> {
        self.layers
            .iter()
            .find(|l| l.layer_type == LayerType::Terrain)
            .map_or_else(
                || vec![false; self.cell_count()],
                |l| l.blocks.iter().map(|b| b.is_collidable()).collect(),
            )
    }
}
