//! Seed management for map generation
//!
//! Each generation stage gets its own seed derived from the master seed, so
//! one stage can be varied while the others stay fixed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for all map generation stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Poisson-disk site placement
    pub sites: u64,
    /// Elevation noise
    pub elevation: u64,
}

impl MapSeeds {
    /// Derive all stage seeds deterministically from a master seed.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            sites: derive_seed(master, "sites"),
            elevation: derive_seed(master, "elevation"),
        }
    }

    pub fn builder(master: u64) -> MapSeedsBuilder {
        MapSeedsBuilder { seeds: MapSeeds::from_master(master) }
    }
}

/// Builder for overriding individual stage seeds
pub struct MapSeedsBuilder {
    seeds: MapSeeds,
}

impl MapSeedsBuilder {
    pub fn sites(mut self, seed: u64) -> Self {
        self.seeds.sites = seed;
        self
    }

    pub fn elevation(mut self, seed: u64) -> Self {
        self.seeds.elevation = seed;
        self
    }

    pub fn build(self) -> MapSeeds {
        self.seeds
    }
}

fn derive_seed(master: u64, stage: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stage.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for MapSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MapSeeds {{ master: {}, sites: {}, elevation: {} }}",
            self.master, self.sites, self.elevation
        )
    }
}
