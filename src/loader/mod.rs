//! # World loading
//!
//! Turns the outdoor map and every building interior reachable from it into one world graph.
//!
//! 1. Load the outdoor map and the interior of every building found on it. Interior world ids are
//!    allocated as soon as a building is seen, so doors can refer to them before they are parsed.
//!    Every outdoor door is assigned the interior of the building it stands in.
//! 2. Follow all descending doors recursively, resolving their tags and loading named interiors on
//!    first use, until every reachable world is loaded.
//! 3. Walk the worlds again, pair every door with its partner in the neighbouring world, fill the
//!    connection table and grow the world tree.
//!
//! All state lives in a [`WorldLoader`] that is consumed by the load, so ids and caches never leak
//! from one load into the next.

pub mod door;
pub mod error;

pub use door::{DoorTag, UnloadedDoor};
pub use error::LoadError;

use crate::raws::{self, MapKind, MapSource, TileMap};
use crate::world::consts::{BUILDINGS_LAYER, TILESET_RESOLUTION};
use crate::world::graph::NodeId;
use crate::world::{
    Building, ConnectionTable, DoorId, Location, Terrain, TilePos, TileRect, World, WorldGraph,
    WorldId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A building marker found on a map, before its interior is connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnloadedBuilding {
    pub bounds: TileRect,
    pub inside_world_name: String,
    pub inside_world_id: WorldId,
}

#[derive(Debug)]
struct LoadedWorld {
    world: World,
    doors: Vec<UnloadedDoor>,
    buildings: Vec<UnloadedBuilding>,
}

/// Everything a successful load produces, ready to be handed over to the world service.
#[derive(Debug)]
pub struct LoadedWorlds {
    pub main_world: WorldId,
    pub worlds: BTreeMap<WorldId, World>,
    pub buildings: Vec<Building>,
    pub graph: WorldGraph,
    pub connections: ConnectionTable,
}

pub struct WorldLoader<'a, S: MapSource + ?Sized> {
    source: &'a S,
    last_world_id: WorldId,
    loaded_worlds: BTreeMap<WorldId, LoadedWorld>,
    /// loaded interiors by map name, the first one wins if a name is loaded twice
    named_worlds: HashMap<String, WorldId>,
}

impl<'a, S: MapSource + ?Sized> WorldLoader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            last_world_id: 0,
            loaded_worlds: BTreeMap::new(),
            named_worlds: HashMap::new(),
        }
    }

    /// Load the outdoor world `main_world_name` and everything reachable from it.
    ///
    /// # Errors
    ///
    /// Any unreadable map or inconsistent door layout aborts the whole load, see [`LoadError`].
    pub fn load_worlds(mut self, main_world_name: &str) -> Result<LoadedWorlds, LoadError> {
        let main_id = self.generate_world_id();
        self.load_world(main_world_name, MapKind::Outdoor, main_id)
            .map_err(|e| {
                error!("failed to load main world '{}': {}", main_world_name, e);
                e
            })?;

        // load the interiors of all buildings in the main world
        let buildings = self.loaded(main_id)?.buildings.clone();
        for building in &buildings {
            debug!(
                "found building {} '{}' in main world",
                building.inside_world_id, building.inside_world_name
            );
            self.load_world(
                &building.inside_world_name,
                MapKind::Building,
                building.inside_world_id,
            )?;
        }

        self.assign_main_world_doors(main_id)?;

        let mut visited = HashSet::new();
        self.discover_and_load_all_worlds(main_id, &mut visited)?;
        info!("discovered {} world(s)", visited.len());

        let mut graph = WorldGraph::new(main_id);
        let mut connections = ConnectionTable::new();
        let mut visited = HashSet::new();
        self.connect_doors(
            WorldGraph::ROOT,
            main_id,
            &mut graph,
            &mut connections,
            &mut visited,
        )?;
        info!(
            "connected {} world(s) through {} door connection(s)",
            graph.len(),
            connections.len()
        );

        Ok(self.finish(main_id, graph, connections))
    }

    fn generate_world_id(&mut self) -> WorldId {
        let id = self.last_world_id;
        self.last_world_id += 1;
        id
    }

    fn loaded(&self, id: WorldId) -> Result<&LoadedWorld, LoadError> {
        self.loaded_worlds
            .get(&id)
            .ok_or(LoadError::WorldNotLoaded { world: id })
    }

    /// Parse a map into a world with the given id, together with its doors and buildings.
    fn load_world(&mut self, name: &str, kind: MapKind, id: WorldId) -> Result<(), LoadError> {
        debug!("loading {} world '{}' as world {}", kind, name, id);
        let tmx = self
            .source
            .load_map(name, kind)
            .map_err(|e| LoadError::from_map_error(name, kind, e))?;

        let terrain = Terrain::from_tile_map(name, &tmx)?;
        let world = World::new(id, name, kind == MapKind::Outdoor, terrain);
        let (doors, buildings) = self.read_buildings_layer(name, &tmx)?;

        // named doors reuse any interior already loaded under this name
        if kind == MapKind::Building {
            self.named_worlds.entry(name.to_string()).or_insert(id);
        }

        self.loaded_worlds.insert(
            id,
            LoadedWorld {
                world,
                doors,
                buildings,
            },
        );
        Ok(())
    }

    fn read_buildings_layer(
        &mut self,
        name: &str,
        tmx: &TileMap,
    ) -> Result<(Vec<UnloadedDoor>, Vec<UnloadedBuilding>), LoadError> {
        let mut doors = Vec::new();
        let mut buildings = Vec::new();

        let Some(layer) = tmx.layer(BUILDINGS_LAYER) else {
            debug!("map '{}' has no \"{}\" layer", name, BUILDINGS_LAYER);
            return Ok((doors, buildings));
        };

        for object in &layer.objects {
            if let Some(inside_world_name) = object.property(raws::PROPERTY_BUILDING_WORLD) {
                let origin = TilePos::from_map_pixels(object.x, object.y, TILESET_RESOLUTION);
                let bounds = TileRect::new(
                    origin.x(),
                    origin.y(),
                    (object.width / TILESET_RESOLUTION as f32) as i32,
                    (object.height / TILESET_RESOLUTION as f32) as i32,
                );
                buildings.push(UnloadedBuilding {
                    bounds,
                    inside_world_name: inside_world_name.to_string(),
                    inside_world_id: self.generate_world_id(),
                });
            } else if object.has_property(raws::PROPERTY_DOOR_ID) {
                let door = door::parse_door(name, object)?;
                trace!(
                    "map '{}': door {} at {} tagged {}",
                    name,
                    door.id,
                    door.tile,
                    door.tag
                );
                doors.push(door);
            }
        }

        Ok((doors, buildings))
    }

    /// Every door on the main world leads into the building it stands in.
    fn assign_main_world_doors(&mut self, main_id: WorldId) -> Result<(), LoadError> {
        let Some(LoadedWorld {
            doors, buildings, ..
        }) = self.loaded_worlds.get_mut(&main_id)
        else {
            return Err(LoadError::WorldNotLoaded { world: main_id });
        };

        for door in doors.iter_mut() {
            let Some(building) = door::find_door_building(buildings.as_slice(), door.tile) else {
                error!("a door at {} is not in any buildings", door.tile);
                return Err(LoadError::DoorOutsideBuildings {
                    world: main_id,
                    door: door.id,
                    tile: door.tile,
                });
            };
            door.tag = DoorTag::WorldId(building.inside_world_id);
        }
        Ok(())
    }

    /// Resolve the destination of every descending door and load all worlds they lead to.
    fn discover_and_load_all_worlds(
        &mut self,
        world_id: WorldId,
        visited: &mut HashSet<WorldId>,
    ) -> Result<(), LoadError> {
        if !visited.insert(world_id) {
            return Ok(());
        }

        let door_count = self.loaded(world_id)?.doors.len();

        // direct and named doors first, share doors copy their target from one of these
        for idx in 0..door_count {
            let door = &self.loaded(world_id)?.doors[idx];
            if !door.is_descending() || door.target.is_some() {
                continue;
            }
            let (door_id, tile) = (door.id, door.tile);
            let target = match door.tag.clone() {
                DoorTag::WorldId(id) => id,
                DoorTag::WorldName(name) => {
                    trace!("door {} loads world '{}'", door_id, name);
                    self.load_named_world(&name, world_id, door_id)?
                }
                DoorTag::Share(_) => continue,
                DoorTag::Unknown => {
                    error!("door {} has no assigned door tag", door_id);
                    return Err(LoadError::UnknownDoorTag {
                        world: world_id,
                        door: door_id,
                        tile,
                    });
                }
            };
            self.set_door_target(world_id, idx, target);
        }

        for idx in 0..door_count {
            let doors = &self.loaded(world_id)?.doors;
            let door = &doors[idx];
            let DoorTag::Share(share) = &door.tag else {
                continue;
            };
            if !door.is_descending() {
                continue;
            }
            let target = door::find_share_sibling(doors, share)
                .and_then(|sibling| sibling.target)
                .ok_or_else(|| {
                    error!("door {} has an unknown world share tag '{}'", door.id, share);
                    LoadError::MissingShareSibling {
                        share: share.clone(),
                        world: world_id,
                        door: door.id,
                    }
                })?;
            self.set_door_target(world_id, idx, target);
        }

        let mut targets: Vec<WorldId> = Vec::new();
        for door in &self.loaded(world_id)?.doors {
            if let Some(target) = door.target {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }

        for target in targets {
            if self.loaded_worlds.contains_key(&target) {
                self.discover_and_load_all_worlds(target, visited)?;
            } else {
                // reported with door context while connecting
                warn!("world {} refers to unloaded world {}", world_id, target);
            }
        }
        Ok(())
    }

    fn set_door_target(&mut self, world_id: WorldId, idx: usize, target: WorldId) {
        if let Some(loaded) = self.loaded_worlds.get_mut(&world_id) {
            loaded.doors[idx].target = Some(target);
        }
    }

    /// Return the world loaded for this name, loading it under a fresh id on first use.
    fn load_named_world(
        &mut self,
        name: &str,
        world_id: WorldId,
        door_id: DoorId,
    ) -> Result<WorldId, LoadError> {
        if let Some(&id) = self.named_worlds.get(name) {
            return Ok(id);
        }

        let id = self.generate_world_id();
        self.load_world(name, MapKind::Building, id)
            .map_err(|e| match e {
                LoadError::MapNotFound { .. } => {
                    error!(
                        "cannot find building world '{}', owner of door {}",
                        name, door_id
                    );
                    LoadError::MissingNamedWorld {
                        name: name.to_string(),
                        world: world_id,
                        door: door_id,
                    }
                }
                other => other,
            })?;
        Ok(id)
    }

    /// Pair every door with its partner and grow the world tree below `node`.
    fn connect_doors(
        &self,
        node: NodeId,
        world_id: WorldId,
        graph: &mut WorldGraph,
        connections: &mut ConnectionTable,
        visited: &mut HashSet<WorldId>,
    ) -> Result<(), LoadError> {
        if !visited.insert(world_id) {
            return Ok(());
        }

        for door in &self.loaded(world_id)?.doors {
            let neighbour = if door.is_descending() {
                door.target.ok_or(LoadError::UnknownDoorTag {
                    world: world_id,
                    door: door.id,
                    tile: door.tile,
                })?
            } else {
                graph
                    .parent_world(node)
                    .ok_or(LoadError::AscendingDoorInRoot {
                        world: world_id,
                        door: door.id,
                        tile: door.tile,
                    })?
            };

            let Some(neighbour_world) = self.loaded_worlds.get(&neighbour) else {
                error!("world {} has not been loaded yet", neighbour);
                return Err(LoadError::UnloadedWorld {
                    missing: neighbour,
                    world: world_id,
                    door: door.id,
                });
            };

            let Some(partner) = door::find_partner_door(&neighbour_world.doors, door.id) else {
                error!(
                    "cannot find partner door in world {} for door {} in world {}",
                    neighbour, door.id, world_id
                );
                return Err(LoadError::MissingPartnerDoor {
                    world: world_id,
                    door: door.id,
                    neighbour,
                    partner: -door.id,
                });
            };

            let src = Location::new(world_id, door.tile);
            let dst = Location::new(neighbour, partner.tile);
            if connections.insert(src, dst) {
                debug!(
                    "added world connection {} from {} to {} through door {}",
                    if door.is_descending() { "down" } else { "up" },
                    world_id,
                    neighbour,
                    door.id
                );
            } else {
                warn!("door {} shares its tile {} with another door", door.id, src);
            }

            if !door.is_descending() {
                continue;
            }

            if visited.contains(&neighbour) {
                // a second door into a world that already hangs below this node
                if let Some(child) = graph.node_of(neighbour) {
                    if graph.node(child).and_then(|n| n.parent) == Some(node) {
                        graph.link_child(node, door.tile, child);
                    }
                }
                continue;
            }

            let child = graph.add_child(node, door.tile, neighbour);
            self.connect_doors(child, neighbour, graph, connections, visited)?;
        }
        Ok(())
    }

    /// Hand all worlds and buildings over, dropping everything the load only needed temporarily.
    fn finish(
        self,
        main_world: WorldId,
        graph: WorldGraph,
        connections: ConnectionTable,
    ) -> LoadedWorlds {
        let mut worlds = BTreeMap::new();
        let mut buildings = Vec::new();
        let loaded_ids: HashSet<WorldId> = self.loaded_worlds.keys().copied().collect();

        for (id, loaded) in self.loaded_worlds {
            for unloaded in &loaded.buildings {
                if !loaded_ids.contains(&unloaded.inside_world_id) {
                    warn!(
                        "interior '{}' of a building in world {} was never loaded, skipping it",
                        unloaded.inside_world_name, id
                    );
                    continue;
                }
                let mut building = Building::new(
                    buildings.len(),
                    unloaded.bounds,
                    id,
                    unloaded.inside_world_id,
                    unloaded.inside_world_name.clone(),
                );
                loaded
                    .doors
                    .iter()
                    .filter(|d| d.target == Some(unloaded.inside_world_id))
                    .for_each(|d| building.add_door(Location::new(id, d.tile)));
                buildings.push(building);
            }
            worlds.insert(id, loaded.world);
        }

        LoadedWorlds {
            main_world,
            worlds,
            buildings,
            graph,
            connections,
        }
    }
}
