//! Door records and the rules for finding out where a door leads.
//!
//! Doors come in pairs: the door leading down into a building carries a positive id, the door
//! leading back up out of the building carries the same id negated. How a descending door finds
//! its building world is decided by its tag, see [`DoorTag`].

use crate::loader::{LoadError, UnloadedBuilding};
use crate::raws::{self, PropertyObject};
use crate::world::consts::TILESET_RESOLUTION;
use crate::world::{DoorId, TilePos, WorldId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// How the destination world of a door is found. Classification priority is the declaration
/// order: an explicit world id beats a world name, which beats a share tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorTag {
    /// connects to an already allocated world
    WorldId(WorldId),
    /// connects to the building world of this name, loaded on first use
    WorldName(String),
    /// connects to the same world as the sibling door that is the source of this share tag
    Share(String),
    /// no destination given; only valid on doors whose tag is never consulted
    Unknown,
}

impl Display for DoorTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorldId(id) => write!(f, "world id {}", id),
            Self::WorldName(name) => write!(f, "world name '{}'", name),
            Self::Share(share) => write!(f, "share tag '{}'", share),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnloadedDoor {
    pub tile: TilePos,
    pub id: DoorId,
    pub tag: DoorTag,
    /// marks this door as the canonical side of a share tag
    pub share_source: Option<String>,
    /// destination world, known after discovery for descending doors
    pub target: Option<WorldId>,
}

impl UnloadedDoor {
    pub fn new(tile: TilePos, id: DoorId, tag: DoorTag) -> Self {
        Self {
            tile,
            id,
            tag,
            share_source: None,
            target: None,
        }
    }

    /// Positive doors lead down into a child world, negative ones back up to the parent.
    pub const fn is_descending(&self) -> bool {
        self.id > 0
    }

    pub const fn is_share(&self) -> bool {
        matches!(self.tag, DoorTag::Share(_))
    }

    /// The share string this door answers to, whether as a share user or as a share source.
    pub fn share_key(&self) -> Option<&str> {
        match &self.tag {
            DoorTag::Share(share) => Some(share),
            _ => self.share_source.as_deref(),
        }
    }
}

/// Reasons a door property bundle cannot be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    InvalidWorldId(String),
    AmbiguousShare,
}

/// Decide the tag of a door from its properties.
///
/// # Errors
///
/// Fails if the world id is not a number, or if the door carries both a share tag and a share
/// source, which leaves it unclear which string the door answers to.
pub fn classify(props: &PropertyObject) -> Result<DoorTag, TagError> {
    if props.has_property(raws::PROPERTY_DOOR_WORLD_SHARE)
        && props.has_property(raws::PROPERTY_DOOR_WORLD_SHARE_SOURCE)
    {
        return Err(TagError::AmbiguousShare);
    }

    if let Some(raw) = props.property(raws::PROPERTY_DOOR_WORLD_ID) {
        return raw
            .trim()
            .parse()
            .map(DoorTag::WorldId)
            .map_err(|_| TagError::InvalidWorldId(raw.to_string()));
    }
    if let Some(name) = props.property(raws::PROPERTY_DOOR_WORLD) {
        return Ok(DoorTag::WorldName(name.to_string()));
    }
    if let Some(share) = props.property(raws::PROPERTY_DOOR_WORLD_SHARE) {
        return Ok(DoorTag::Share(share.to_string()));
    }
    Ok(DoorTag::Unknown)
}

/// Build a door from a door marker on the buildings layer of `map`.
///
/// # Errors
///
/// Fails on a missing, non-numeric or zero door id and on any [`TagError`].
pub fn parse_door(map: &str, props: &PropertyObject) -> Result<UnloadedDoor, LoadError> {
    let tile = TilePos::from_map_pixels(props.x, props.y, TILESET_RESOLUTION);
    let raw_id = props.property(raws::PROPERTY_DOOR_ID).unwrap_or_default();
    let id: DoorId = raw_id
        .trim()
        .parse()
        .map_err(|_| LoadError::InvalidProperty {
            map: map.to_string(),
            tile,
            property: raws::PROPERTY_DOOR_ID,
            value: raw_id.to_string(),
        })?;
    if id == 0 {
        return Err(LoadError::InvalidDoorId {
            map: map.to_string(),
            tile,
        });
    }

    let tag = classify(props).map_err(|e| match e {
        TagError::InvalidWorldId(value) => LoadError::InvalidProperty {
            map: map.to_string(),
            tile,
            property: raws::PROPERTY_DOOR_WORLD_ID,
            value,
        },
        TagError::AmbiguousShare => LoadError::AmbiguousShareTag {
            map: map.to_string(),
            door: id,
            tile,
        },
    })?;

    let mut door = UnloadedDoor::new(tile, id, tag);
    door.share_source = props
        .property(raws::PROPERTY_DOOR_WORLD_SHARE_SOURCE)
        .map(str::to_string);
    Ok(door)
}

/// The door with the negated id, i.e. the other end of the same doorway.
pub fn find_partner_door(doors: &[UnloadedDoor], door_id: DoorId) -> Option<&UnloadedDoor> {
    doors.iter().find(|d| d.id == -door_id)
}

/// A resolved descending door in the same map that is not itself a share user but answers to
/// `share`.
pub fn find_share_sibling<'a>(doors: &'a [UnloadedDoor], share: &str) -> Option<&'a UnloadedDoor> {
    doors.iter().find(|d| {
        !d.is_share() && d.is_descending() && d.target.is_some() && d.share_key() == Some(share)
    })
}

/// The first building whose footprint contains the tile.
pub fn find_door_building(
    buildings: &[UnloadedBuilding],
    tile: TilePos,
) -> Option<&UnloadedBuilding> {
    buildings.iter().find(|b| b.bounds.contains(tile))
}
