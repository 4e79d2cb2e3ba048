//! Procedural generation of the height fields the terrain samples from.

pub mod map;

pub use map::*;
