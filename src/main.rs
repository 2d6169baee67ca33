//! # City Worlds
//!
//! Loads the configured city and reports the resulting world graph.

use city_worlds::collision::Fixture;
use city_worlds::raws::JsonMapSource;
use city_worlds::world::{self, WorldId, WorldService};
use color_eyre::eyre::Result;

#[macro_use]
extern crate log;

// For testing run with `RUST_LOG=city_worlds=trace RUST_BACKTRACE=1 cargo run -- -w city`.

/// # Errors
/// Errors are repackaged with `color_eyre`
pub fn main() -> Result<()> {
    color_eyre::install()?;

    // init logger
    pretty_env_logger::init();

    // parse program arguments
    city_worlds::parse_cmdline_flags();

    let config = world::env().clone();
    info!(
        "City Worlds v{}, loading '{}' from {}",
        city_worlds::VERSION,
        config.main_world,
        config.world_root.display()
    );

    let source = JsonMapSource::from_config(&config);
    let mut fixtures: Vec<(WorldId, Fixture)> = Vec::new();
    let service = WorldService::load(&source, &config.main_world, &mut fixtures)?;

    for w in service.worlds() {
        let (width, height) = w.tile_size();
        println!(
            "world {:>3} {:<24} {:>4}x{:<4} {:<8} {} collision rect(s)",
            w.id(),
            w.name(),
            width,
            height,
            if w.is_outside() { "outdoor" } else { "interior" },
            fixtures.iter().filter(|(id, _)| *id == w.id()).count()
        );
    }
    println!(
        "{} building(s), {} door connection(s)",
        service.buildings().len(),
        service.connections().len()
    );

    if config.is_debug_mode {
        let mut connections: Vec<_> = service.connections().iter().collect();
        connections.sort();
        for (src, dst) in connections {
            println!("  {} -> {}", src, dst);
        }
    }

    Ok(())
}
