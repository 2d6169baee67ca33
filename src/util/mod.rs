//! Utilities that are unrelated to any of the main modules.

pub mod timer;

pub use timer::Timer;
