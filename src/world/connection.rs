use crate::world::{TilePos, WorldId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// A tile in a specific world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub world: WorldId,
    pub tile: TilePos,
}

impl Location {
    pub const fn new(world: WorldId, tile: TilePos) -> Self {
        Self { world, tile }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "world {} {}", self.world, self.tile)
    }
}

/// Maps every door tile to the tile of its partner door in the neighbouring world.
///
/// Filled once while loading, read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionTable {
    connections: HashMap<Location, Location>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a one-way connection. Returns `false` if the source already had a destination,
    /// in which case the table is left unchanged.
    pub(crate) fn insert(&mut self, src: Location, dst: Location) -> bool {
        if self.connections.contains_key(&src) {
            return false;
        }
        self.connections.insert(src, dst);
        true
    }

    pub fn destination(&self, src: &Location) -> Option<Location> {
        self.connections.get(src).copied()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Location, &Location)> {
        self.connections.iter()
    }
}
