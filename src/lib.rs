//! Procedural map generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod coastline;
pub mod diagram;
pub mod features;
pub mod params;
pub mod render;
pub mod seeds;
pub mod terrain;
pub mod world;
