//! # Map input
//!
//! The tile map model handed to the world loader. Maps are authored in an external editor and
//! arrive as an ordered list of named layers. Tile layers hold tile records, the `buildings` layer
//! holds property objects that mark either a building footprint or a door.
//!
//! Any type implementing [`MapSource`] can feed the loader; [`json::JsonMapSource`] reads maps
//! from JSON files below the configured root directories.

pub mod json;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use thiserror::Error;

pub use json::JsonMapSource;

pub const PROPERTY_BUILDING_WORLD: &str = "building-world";
pub const PROPERTY_DOOR_ID: &str = "door-id";
pub const PROPERTY_DOOR_WORLD_ID: &str = "door-world-id";
pub const PROPERTY_DOOR_WORLD: &str = "door-world";
pub const PROPERTY_DOOR_WORLD_SHARE: &str = "door-world-share";
pub const PROPERTY_DOOR_WORLD_SHARE_SOURCE: &str = "door-world-share-source";

/// Which root directory a map is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapKind {
    Outdoor,
    Building,
}

impl Display for MapKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outdoor => write!(f, "outdoor"),
            Self::Building => write!(f, "building"),
        }
    }
}

#[derive(Error, Debug)]
pub enum MapError {
    #[error("map file {0} does not exist")]
    NotFound(PathBuf),
    #[error("cannot read map file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("map file {path} is corrupt")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can turn a map name into a parsed tile map.
pub trait MapSource {
    /// Parse the map with the given name, sans file extension.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotFound`] if no map of that name exists, any other variant if it
    /// exists but cannot be parsed.
    fn load_map(&self, name: &str, kind: MapKind) -> Result<TileMap, MapError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileMap {
    /// width in tiles
    pub width: i32,
    /// height in tiles
    pub height: i32,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl TileMap {
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }
}

const fn visible_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default = "visible_default")]
    pub visible: bool,
    #[serde(default)]
    pub tiles: Vec<TileRecord>,
    #[serde(default)]
    pub objects: Vec<PropertyObject>,
}

impl Layer {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            visible: true,
            tiles: Vec::new(),
            objects: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipFlags {
    #[serde(default)]
    pub horizontal: bool,
    #[serde(default)]
    pub vertical: bool,
    #[serde(default)]
    pub diagonal: bool,
}

/// A single tile placed on a tile layer, positioned in tile units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TileRecord {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub flip: FlipFlags,
    /// numeric tile type, `0` is blank
    pub gid: u32,
}

impl TileRecord {
    pub const fn new(x: i32, y: i32, gid: u32) -> Self {
        Self {
            x,
            y,
            rotation: 0,
            flip: FlipFlags {
                horizontal: false,
                vertical: false,
                diagonal: false,
            },
            gid,
        }
    }
}

/// A free-standing object, positioned in map pixel units. Objects on the `objects` layer carry a
/// tile type, objects on the `buildings` layer carry string properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyObject {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub gid: Option<u32>,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl PropertyObject {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn sized(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_property<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.properties.insert(key.into(), value.to_string());
        self
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}
