use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use nalgebra::Vector3;
use serde::Deserialize;
use thiserror::Error;

use crate::components::{Building, BuildingPart, Primitive, Runway};
use crate::resources::{Environment, Terrain};

#[derive(Error, Debug)]
pub enum WorldDataError {
    #[error("Failed to read world file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse world JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Building definition missing for type: '{0}'")]
    MissingBuildingDefinition(String),
    #[error("Invalid part in building '{building}': {reason}")]
    InvalidPart { building: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PrimitiveKind {
    Cuboid,
    Cylinder,
    Sphere,
}

#[derive(Debug, Clone, Deserialize)]
struct RawPart {
    offset: Vector3<f64>,
    primitive: PrimitiveKind,
    dims: Vec<f64>,
}

impl RawPart {
    fn resolve(&self, building: &str) -> Result<BuildingPart, WorldDataError> {
        let invalid = |reason: String| WorldDataError::InvalidPart {
            building: building.to_string(),
            reason,
        };

        if let Some(bad) = self.dims.iter().find(|d| !(d.is_finite() && **d > 0.0)) {
            return Err(invalid(format!("dimension {} is not positive", bad)));
        }

        let primitive = match (self.primitive, self.dims.as_slice()) {
            (PrimitiveKind::Cuboid, &[l, h, w]) => Primitive::Cuboid { l, h, w },
            (PrimitiveKind::Cylinder, &[r, h]) => Primitive::Cylinder { r, h },
            (PrimitiveKind::Sphere, &[r]) => Primitive::Sphere { r },
            (kind, dims) => {
                return Err(invalid(format!(
                    "{:?} cannot take {} dimension(s)",
                    kind,
                    dims.len()
                )))
            }
        };

        Ok(BuildingPart {
            offset: self.offset,
            primitive,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct BuildingDefinition {
    parts: Vec<RawPart>,
}

#[derive(Debug, Clone, Deserialize)]
struct BuildingPlacement {
    #[serde(rename = "type")]
    kind: String,
    pos: Vector3<f64>,
}

/// Static world layout: runways and building placements.
///
/// Presentation fields in the file (colours, map icons) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorldData {
    #[serde(default)]
    runways: Vec<Runway>,
    #[serde(default)]
    building_defs: HashMap<String, BuildingDefinition>,
    #[serde(default)]
    building_placements: Vec<BuildingPlacement>,
}

impl WorldData {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WorldDataError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let data = Self::from_json_str(&contents)?;
        info!(
            "Loaded world from {}: {} runway(s), {} building(s)",
            path.as_ref().display(),
            data.runways.len(),
            data.building_placements.len()
        );
        Ok(data)
    }

    pub fn from_json_str(json: &str) -> Result<Self, WorldDataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn runways(&self) -> &[Runway] {
        &self.runways
    }

    /// Resolve every placement against its definition.
    pub fn buildings(&self) -> Result<Vec<Building>, WorldDataError> {
        self.building_placements
            .iter()
            .map(|placement| {
                let definition = self.building_defs.get(&placement.kind).ok_or_else(|| {
                    warn!("World references unknown building type '{}'", placement.kind);
                    WorldDataError::MissingBuildingDefinition(placement.kind.clone())
                })?;
                let parts = definition
                    .parts
                    .iter()
                    .map(|part| part.resolve(&placement.kind))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Building::new(placement.kind.clone(), placement.pos, parts))
            })
            .collect()
    }

    pub fn into_environment(
        self,
        terrain: Box<dyn Terrain>,
        sea_level: f64,
    ) -> Result<Environment, WorldDataError> {
        let buildings = self.buildings()?;
        Ok(Environment::new(terrain, sea_level)
            .with_runways(self.runways)
            .with_buildings(buildings))
    }
}
