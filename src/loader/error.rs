use crate::raws::{MapError, MapKind};
use crate::world::{DoorId, TilePos, WorldId};
use thiserror::Error;

/// Everything that can abort loading the world graph.
///
/// Parse failures mean a map file is missing or corrupt. Topology errors mean the maps parsed fine
/// but their doors and buildings do not fit together; they name the offending world, door and tile
/// so the map can be fixed.
#[derive(Error, Debug)]
pub enum LoadError {
    // parse failures
    #[error("cannot find {kind} map '{name}'")]
    MapNotFound { name: String, kind: MapKind },
    #[error("failed to parse {kind} map '{name}'")]
    MapParse {
        name: String,
        kind: MapKind,
        #[source]
        source: MapError,
    },
    #[error("map '{map}' has an invalid value '{value}' for property '{property}' at {tile}")]
    InvalidProperty {
        map: String,
        tile: TilePos,
        property: &'static str,
        value: String,
    },
    #[error("map '{map}' has a door with id 0 at {tile}")]
    InvalidDoorId { map: String, tile: TilePos },
    #[error("map '{map}' places a tile at {tile} outside of its {width}x{height} grid")]
    TileOutOfBounds {
        map: String,
        tile: TilePos,
        width: i32,
        height: i32,
    },
    #[error("map '{map}' declares an unsupported size of {width}x{height} tiles")]
    InvalidMapSize {
        map: String,
        width: i32,
        height: i32,
    },

    // topology errors
    #[error("door {door} at {tile} in world {world} is not in any building")]
    DoorOutsideBuildings {
        world: WorldId,
        door: DoorId,
        tile: TilePos,
    },
    #[error("cannot find building world '{name}', owner of door {door} in world {world}")]
    MissingNamedWorld {
        name: String,
        world: WorldId,
        door: DoorId,
    },
    #[error("door {door} in world {world} has an unknown world share tag '{share}'")]
    MissingShareSibling {
        share: String,
        world: WorldId,
        door: DoorId,
    },
    #[error("door {door} at {tile} in world {world} has no assigned door tag")]
    UnknownDoorTag {
        world: WorldId,
        door: DoorId,
        tile: TilePos,
    },
    #[error(
        "door {door} at {tile} in map '{map}' has both a world share tag and a share source"
    )]
    AmbiguousShareTag {
        map: String,
        door: DoorId,
        tile: TilePos,
    },
    #[error("cannot find partner door {partner} in world {neighbour} for door {door} in world {world}")]
    MissingPartnerDoor {
        world: WorldId,
        door: DoorId,
        neighbour: WorldId,
        partner: DoorId,
    },
    #[error("world {missing} has not been loaded, referenced by door {door} in world {world}")]
    UnloadedWorld {
        missing: WorldId,
        world: WorldId,
        door: DoorId,
    },
    #[error("world {world} is not among the loaded worlds")]
    WorldNotLoaded { world: WorldId },
    #[error("door {door} at {tile} in the main world {world} leads up, but the main world has no parent")]
    AscendingDoorInRoot {
        world: WorldId,
        door: DoorId,
        tile: TilePos,
    },
}

impl LoadError {
    /// Wrap a map source failure, keeping "not found" distinct from "corrupt".
    pub fn from_map_error(name: &str, kind: MapKind, source: MapError) -> Self {
        match source {
            MapError::NotFound(_) => Self::MapNotFound {
                name: name.to_string(),
                kind,
            },
            source => Self::MapParse {
                name: name.to_string(),
                kind,
                source,
            },
        }
    }

    /// True for authoring mistakes in the door and building layout, false for unreadable maps.
    pub const fn is_topology(&self) -> bool {
        !matches!(
            self,
            Self::MapNotFound { .. }
                | Self::MapParse { .. }
                | Self::InvalidProperty { .. }
                | Self::InvalidDoorId { .. }
                | Self::TileOutOfBounds { .. }
                | Self::InvalidMapSize { .. }
        )
    }
}
