// map file units
/// Pixel size of one tile in the authored map files.
pub const TILESET_RESOLUTION: i32 = 32;
// world space
/// Pixel size of one tile in world space.
pub const TILE_SIZE: i32 = 32;
pub const TILE_SIZE_F: f32 = TILE_SIZE as f32;
// physics
pub const PIXELS_PER_METRE: f32 = 32.0;
pub const BORDER_THICKNESS: f32 = TILE_SIZE_F;
pub const BORDER_PADDING: f32 = TILE_SIZE_F / 4.0;
// map files
pub const BUILDINGS_LAYER: &str = "buildings";
pub const DEFAULT_MAP_EXTENSION: &str = "json";
