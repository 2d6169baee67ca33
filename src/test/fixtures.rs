//! In-memory maps for exercising the loader without touching the file system.

use crate::raws::{self, Layer, MapError, MapKind, MapSource, PropertyObject, TileMap, TileRecord};
use crate::world::consts::TILESET_RESOLUTION;
use crate::world::{ConnectionTable, WorldGraph};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Default)]
pub struct MemoryMapSource {
    maps: HashMap<(MapKind, String), TileMap>,
}

impl MemoryMapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outdoor(mut self, name: &str, map: TileMap) -> Self {
        self.maps.insert((MapKind::Outdoor, name.to_string()), map);
        self
    }

    pub fn building(mut self, name: &str, map: TileMap) -> Self {
        self.maps.insert((MapKind::Building, name.to_string()), map);
        self
    }
}

impl MapSource for MemoryMapSource {
    fn load_map(&self, name: &str, kind: MapKind) -> Result<TileMap, MapError> {
        self.maps
            .get(&(kind, name.to_string()))
            .cloned()
            .ok_or_else(|| MapError::NotFound(PathBuf::from(name)))
    }
}

const RES: f32 = TILESET_RESOLUTION as f32;

/// An empty map of the given size with a buildings layer holding `objects`.
pub fn map_with(width: i32, height: i32, objects: Vec<PropertyObject>) -> TileMap {
    let mut buildings = Layer::new("buildings");
    buildings.objects = objects;
    TileMap {
        width,
        height,
        layers: vec![buildings],
    }
}

pub fn terrain_layer(tiles: &[(i32, i32, u32)]) -> Layer {
    let mut layer = Layer::new("terrain");
    layer.tiles = tiles
        .iter()
        .map(|&(x, y, gid)| TileRecord::new(x, y, gid))
        .collect();
    layer
}

/// A building footprint in tile units, leading into `interior`.
pub fn building(x: i32, y: i32, w: i32, h: i32, interior: &str) -> PropertyObject {
    PropertyObject::at(x as f32 * RES, y as f32 * RES)
        .sized(w as f32 * RES, h as f32 * RES)
        .with_property(raws::PROPERTY_BUILDING_WORLD, interior)
}

/// An untagged door at a tile.
pub fn door(x: i32, y: i32, id: i32) -> PropertyObject {
    PropertyObject::at(x as f32 * RES, y as f32 * RES).with_property(raws::PROPERTY_DOOR_ID, id)
}

pub fn named_door(x: i32, y: i32, id: i32, world: &str) -> PropertyObject {
    door(x, y, id).with_property(raws::PROPERTY_DOOR_WORLD, world)
}

pub fn share_door(x: i32, y: i32, id: i32, share: &str) -> PropertyObject {
    door(x, y, id).with_property(raws::PROPERTY_DOOR_WORLD_SHARE, share)
}

/// The outdoor map `city` with a single building leading into `shop`, entered through door 1.
pub fn city_with_shop() -> TileMap {
    map_with(10, 10, vec![building(2, 2, 3, 3, "shop"), door(3, 5, 1)])
}

/// Every connection must lead back to where it came from.
pub fn assert_symmetric(connections: &ConnectionTable) {
    for (src, dst) in connections.iter() {
        assert_eq!(
            connections.destination(dst),
            Some(*src),
            "connection {} -> {} has no way back",
            src,
            dst
        );
    }
}

/// One root without parent, every other node hangs below an earlier node.
pub fn assert_tree(graph: &WorldGraph) {
    let roots = graph.nodes().iter().filter(|n| n.parent.is_none()).count();
    assert_eq!(roots, 1);
    assert!(graph.root().parent.is_none());
    for (idx, node) in graph.nodes().iter().enumerate().skip(1) {
        let parent = node.parent.expect("non-root node without parent");
        assert!(parent < idx);
        assert!(graph.nodes()[parent].children.values().any(|&c| c == idx));
    }
    let mut worlds: Vec<_> = graph.nodes().iter().map(|n| n.world).collect();
    worlds.sort_unstable();
    worlds.dedup();
    assert_eq!(worlds.len(), graph.len(), "a world appears twice in the tree");
}
