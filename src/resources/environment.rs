use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{Building, Runway};

/// Terrain elevation query. Sampling of the heightmap lives behind this seam.
pub trait Terrain: Send + Sync {
    /// Terrain elevation at world `(x, z)` [m], before the sea-level floor
    fn height_at(&self, x: f64, z: f64) -> f64;
}

/// Level ground everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatTerrain {
    pub elevation: f64,
}

impl FlatTerrain {
    pub fn new(elevation: f64) -> Self {
        Self { elevation }
    }
}

impl Terrain for FlatTerrain {
    fn height_at(&self, _x: f64, _z: f64) -> f64 {
        self.elevation
    }
}

impl<F> Terrain for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn height_at(&self, x: f64, z: f64) -> f64 {
        self(x, z)
    }
}

/// Everything the flight model reads from the world. Never mutated by a tick.
#[derive(Resource)]
pub struct Environment {
    terrain: Box<dyn Terrain>,
    pub sea_level: f64,
    pub runways: Vec<Runway>,
    pub buildings: Vec<Building>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Box::new(FlatTerrain::default()), f64::NEG_INFINITY)
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("sea_level", &self.sea_level)
            .field("runways", &self.runways.len())
            .field("buildings", &self.buildings.len())
            .finish_non_exhaustive()
    }
}

impl Environment {
    pub fn new(terrain: Box<dyn Terrain>, sea_level: f64) -> Self {
        Self {
            terrain,
            sea_level,
            runways: Vec::new(),
            buildings: Vec::new(),
        }
    }

    pub fn with_runways(mut self, runways: Vec<Runway>) -> Self {
        self.runways = runways;
        self
    }

    pub fn with_buildings(mut self, buildings: Vec<Building>) -> Self {
        self.buildings = buildings;
        self
    }

    /// Surface height at `(x, z)`: terrain, floored at sea level.
    pub fn ground_height(&self, x: f64, z: f64) -> f64 {
        self.terrain.height_at(x, z).max(self.sea_level)
    }

    pub fn is_over_runway(&self, x: f64, z: f64) -> bool {
        self.runways.iter().any(|runway| runway.contains(x, z))
    }

    /// Terrain at or below sea level is open water.
    pub fn is_over_water(&self, x: f64, z: f64) -> bool {
        self.terrain.height_at(x, z) <= self.sea_level
    }

    /// Altitude above the surface [m]
    pub fn agl(&self, pos: &Vector3<f64>) -> f64 {
        pos.y - self.ground_height(pos.x, pos.z)
    }

    pub fn runway(&self, name: &str) -> Option<&Runway> {
        self.runways.iter().find(|runway| runway.name == name)
    }
}
