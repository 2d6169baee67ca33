use crate::world::consts::DEFAULT_MAP_EXTENSION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

lazy_static! {
    static ref WORLD_ENV: Mutex<Config> = Mutex::new(Config::default());
}

/// Process wide configuration, as set up from the command line.
pub fn env<'a>() -> MutexGuard<'a, Config> {
    WORLD_ENV.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// directory of the outdoor maps
    pub world_root: PathBuf,
    /// directory of the building interior maps
    pub buildings_root: PathBuf,
    /// name of the outdoor map to start loading from, without extension
    pub main_world: String,
    /// extension appended to every map name
    pub map_extension: String,
    /// if true: log every door and connection while loading
    pub is_debug_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_root: PathBuf::from("res/worlds"),
            buildings_root: PathBuf::from("res/worlds/buildings"),
            main_world: "city".to_string(),
            map_extension: DEFAULT_MAP_EXTENSION.to_string(),
            is_debug_mode: false,
        }
    }
}

impl Config {
    /// Read a configuration from a JSON file. Missing keys fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn set_world_root<P: Into<PathBuf>>(&mut self, root: P) {
        self.world_root = root.into();
    }

    pub fn set_buildings_root<P: Into<PathBuf>>(&mut self, root: P) {
        self.buildings_root = root.into();
    }

    pub fn set_main_world<S: Into<String>>(&mut self, name: S) {
        self.main_world = name.into();
    }

    pub fn set_debug_mode(&mut self, debug_mode: bool) {
        self.is_debug_mode = debug_mode;
    }
}
