use crate::collision::{CollisionMap, PhysicsSink, Rect};
use crate::loader::{LoadError, LoadedWorlds, WorldLoader};
use crate::raws::MapSource;
use crate::util::Timer;
use crate::world::{
    Building, BuildingId, ConnectionTable, Location, TilePos, World, WorldGraph, WorldId,
};
use std::collections::BTreeMap;

/// Stable storage for everything a successful load produced.
///
/// Nothing in here changes after construction, so lookups need no locking.
#[derive(Debug)]
pub struct WorldService {
    main_world: WorldId,
    worlds: BTreeMap<WorldId, World>,
    buildings: Vec<Building>,
    graph: WorldGraph,
    connections: ConnectionTable,
    collision_maps: BTreeMap<WorldId, CollisionMap>,
}

impl WorldService {
    /// Load all worlds reachable from the outdoor map `main_world_name` and create their static
    /// collision geometry in `physics`.
    ///
    /// # Errors
    ///
    /// Returns the first [`LoadError`] hit; no world is registered in that case.
    pub fn load<S, P>(
        source: &S,
        main_world_name: &str,
        physics: &mut P,
    ) -> Result<Self, LoadError>
    where
        S: MapSource + ?Sized,
        P: PhysicsSink + ?Sized,
    {
        let mut timer = Timer::new("world loading");
        info!("starting to load worlds from '{}'", main_world_name);

        let loaded = WorldLoader::new(source).load_worlds(main_world_name)?;
        let service = Self::from_loaded(loaded, physics);

        timer.stop();
        Ok(service)
    }

    /// Take over the loader's output and build the collision geometry of every world.
    pub fn from_loaded<P: PhysicsSink + ?Sized>(loaded: LoadedWorlds, physics: &mut P) -> Self {
        let mut collision_maps = BTreeMap::new();
        let mut fixture_count = 0;
        for (&id, world) in &loaded.worlds {
            let collision_map = CollisionMap::build(world);
            fixture_count += collision_map.create_fixtures(physics);
            collision_maps.insert(id, collision_map);
        }
        info!(
            "loaded {} world(s) and {} building(s), {} static fixture(s)",
            loaded.worlds.len(),
            loaded.buildings.len(),
            fixture_count
        );

        Self {
            main_world: loaded.main_world,
            worlds: loaded.worlds,
            buildings: loaded.buildings,
            graph: loaded.graph,
            connections: loaded.connections,
            collision_maps,
        }
    }

    pub const fn main_world_id(&self) -> WorldId {
        self.main_world
    }

    pub fn main_world(&self) -> Option<&World> {
        self.worlds.get(&self.main_world)
    }

    pub fn world(&self, id: WorldId) -> Option<&World> {
        self.worlds.get(&id)
    }

    pub fn worlds(&self) -> impl Iterator<Item = &World> {
        self.worlds.values()
    }

    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(id)
    }

    /// The building whose footprint contains the given location.
    pub fn building_at(&self, location: &Location) -> Option<&Building> {
        self.buildings.iter().find(|b| b.contains(location))
    }

    pub const fn graph(&self) -> &WorldGraph {
        &self.graph
    }

    pub const fn connections(&self) -> &ConnectionTable {
        &self.connections
    }

    /// Where an entity stepping onto the door at `tile` of `world` comes out.
    pub fn resolve_connection(&self, world: WorldId, tile: TilePos) -> Option<Location> {
        self.connections.destination(&Location::new(world, tile))
    }

    pub fn collision_map(&self, world: WorldId) -> Option<&CollisionMap> {
        self.collision_maps.get(&world)
    }

    /// Collision rectangles covering the 3x3 tiles around `tile`.
    pub fn surrounding_tiles(&self, world: WorldId, tile: TilePos) -> Vec<Rect> {
        self.collision_maps
            .get(&world)
            .map_or_else(Vec::new, |c| c.surrounding_tiles(tile, 1))
    }
}
