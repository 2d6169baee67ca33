use crate::raws::{MapError, MapKind, MapSource, TileMap};
use crate::world::env::Config;
use std::fs;
use std::path::PathBuf;

/// Reads maps from `<root>/<name>.<extension>`, with separate roots for outdoor maps and building
/// interiors.
#[derive(Debug, Clone)]
pub struct JsonMapSource {
    world_root: PathBuf,
    buildings_root: PathBuf,
    extension: String,
}

impl JsonMapSource {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(world_root: P, buildings_root: Q) -> Self {
        Self {
            world_root: world_root.into(),
            buildings_root: buildings_root.into(),
            extension: crate::world::consts::DEFAULT_MAP_EXTENSION.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            world_root: config.world_root.clone(),
            buildings_root: config.buildings_root.clone(),
            extension: config.map_extension.clone(),
        }
    }

    pub fn map_path(&self, name: &str, kind: MapKind) -> PathBuf {
        let root = match kind {
            MapKind::Outdoor => &self.world_root,
            MapKind::Building => &self.buildings_root,
        };
        root.join(format!("{}.{}", name, self.extension))
    }
}

impl MapSource for JsonMapSource {
    fn load_map(&self, name: &str, kind: MapKind) -> Result<TileMap, MapError> {
        let path = self.map_path(name, kind);
        if !path.is_file() {
            return Err(MapError::NotFound(path));
        }
        debug!("reading {} map {}", kind, path.display());

        let raw = fs::read_to_string(&path).map_err(|source| MapError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| MapError::Json { path, source })
    }
}
