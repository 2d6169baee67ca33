//! # City Worlds - world graph loading for a tile based city
//!
//! Loads an outdoor map together with every building interior reachable through its doors,
//! connects the doors of neighbouring worlds and turns collidable terrain into static collision
//! rectangles.
//!

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::multiple_crate_versions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions,
    clippy::use_self
)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;
extern crate serde;
extern crate serde_json;

pub mod collision;
pub mod loader;
pub mod raws;
pub mod util;
pub mod world;

#[cfg(test)]
mod test;

use std::env;
use world::env::Config;

pub const VERSION: &str = "0.1.0";

pub fn parse_cmdline_flags() {
    let args: Vec<String> = env::args().collect();
    debug!("args: {:?}", args);
    for idx in 0..args.len() {
        if let Some(arg) = args.get(idx) {
            match arg.as_str() {
                "-d" | "--debug" => world::env().set_debug_mode(true),
                "-c" | "--config" => parse_config(&args, idx),
                "-r" | "--root" => parse_path(&args, idx, "world root", |root| {
                    world::env().set_world_root(root);
                }),
                "-b" | "--buildings" => parse_path(&args, idx, "buildings root", |root| {
                    world::env().set_buildings_root(root);
                }),
                "-w" | "--world" => parse_path(&args, idx, "main world", |name| {
                    world::env().set_main_world(name);
                }),
                _ => {}
            }
        }
    }
}

fn parse_config(args: &[String], idx: usize) {
    // try get next argument to retrieve the config file
    let Some(path) = args.get(idx + 1) else {
        info!("Option '-c | --config' requires a file parameter!");
        return;
    };
    match Config::from_file(path) {
        Ok(config) => *world::env() = config,
        Err(err) => warn!("cannot read config file '{}': {}, using defaults", path, err),
    }
}

fn parse_path<F: FnOnce(&str)>(args: &[String], idx: usize, what: &str, apply: F) {
    // try get next argument to retrieve the value
    if let Some(next_arg) = args.get(idx + 1) {
        apply(next_arg);
    } else {
        info!("no {} parameter provided, fall back to the default", what);
    }
}
