use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::aircraft::config::{ConfigError, PlaneCatalog};

/// Aerodynamic and physical coefficients of one aircraft type.
///
/// Loaded once and shared between every aircraft of the same type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneModel {
    /// Canonical model name, e.g. "Cessna 172".
    pub name: String,

    /// Maximum lift coefficient, reached at the stall angle.
    pub cl_max: f64,
    /// Zero-AoA drag coefficient.
    pub cd_min: f64,
    /// Drag coefficient growth per degree of AoA.
    pub cd_slope: f64,

    /// Critical angle of attack [deg].
    pub stall_angle: f64,
    /// Wing reference area [m²].
    pub wing_area: f64,
    /// Mass [kg].
    pub mass: f64,
    /// Thrust at full throttle [N].
    pub max_throttle: f64,
    pub aspect_ratio: f64,
    pub efficiency: f64,
    /// How strongly the aircraft levels its wings; lower allows steeper banks.
    pub roll_stability_factor: f64,

    /// Fractional lift increase at full flap, e.g. 0.3 = +30%.
    pub flap_lift_bonus: f64,
    /// Fractional drag increase at full flap.
    pub flap_drag_penalty: f64,
    /// Yaw acceleration per unit rudder [deg/s²].
    pub rudder_sensitivity: f64,
    /// Roll acceleration per unit rudder [deg/s²].
    pub rudder_roll_effect: f64,
    /// Bank angle beyond which rudder causes no extra roll [deg].
    pub max_bank_angle: f64,

    /// Velocity never exceed [m/s].
    pub v_ne: f64,
}

impl Default for PlaneModel {
    /// The Cessna 172 is the default trainer.
    fn default() -> Self {
        Self::cessna_172()
    }
}

impl PlaneModel {
    /// Creates a model from a given source.
    ///
    /// # Arguments
    /// * `source` - built-in type (`BuiltIn`) or a catalog entry in a YAML file (`File`).
    pub fn new(source: PlaneSource) -> Result<Self, ConfigError> {
        match source {
            PlaneSource::BuiltIn(plane_type) => Ok(Self::from_built_in(plane_type)),
            PlaneSource::File { path, name } => Self::from_file(path, &name),
        }
    }

    fn from_built_in(plane_type: PlaneType) -> Self {
        match plane_type {
            PlaneType::Cessna172 => Self::cessna_172(),
        }
    }

    fn from_file<P: AsRef<Path>>(path: P, name: &str) -> Result<Self, ConfigError> {
        let catalog = PlaneCatalog::from_file(path)?;
        catalog.get(name).map(|model| (*model).clone())
    }

    pub fn cessna_172() -> Self {
        Self {
            name: "Cessna 172".to_string(),
            cl_max: 1.2,
            cd_min: 0.03,
            cd_slope: 0.0015,
            stall_angle: 15.0,
            wing_area: 16.2,
            mass: 850.0,
            max_throttle: 1800.0,
            aspect_ratio: 7.5,
            efficiency: 0.8,
            roll_stability_factor: 0.1,
            flap_lift_bonus: 0.3,
            flap_drag_penalty: 0.5,
            rudder_sensitivity: 50.0,
            rudder_roll_effect: 5.0,
            max_bank_angle: 30.0,
            v_ne: 82.31,
        }
    }

    /// Checks that every coefficient is strictly positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let coefficients = [
            ("cl_max", self.cl_max),
            ("cd_min", self.cd_min),
            ("cd_slope", self.cd_slope),
            ("stall_angle", self.stall_angle),
            ("wing_area", self.wing_area),
            ("mass", self.mass),
            ("max_throttle", self.max_throttle),
            ("aspect_ratio", self.aspect_ratio),
            ("efficiency", self.efficiency),
            ("roll_stability_factor", self.roll_stability_factor),
            ("flap_lift_bonus", self.flap_lift_bonus),
            ("flap_drag_penalty", self.flap_drag_penalty),
            ("rudder_sensitivity", self.rudder_sensitivity),
            ("rudder_roll_effect", self.rudder_roll_effect),
            ("v_ne", self.v_ne),
        ];

        for (field, value) in coefficients {
            if !(value.is_finite() && value > 0.0) {
                warn!("Plane model '{}' rejected: {} = {}", self.name, field, value);
                return Err(ConfigError::ValidationError(format!(
                    "{}: {} must be positive and finite, got {}",
                    self.name, field, value
                )));
            }
        }

        // Divides the bank-dependent rudder roll, so it may be any non-zero angle
        if !self.max_bank_angle.is_finite() || self.max_bank_angle == 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "{}: max_bank_angle must be a non-zero angle, got {}",
                self.name, self.max_bank_angle
            )));
        }

        Ok(())
    }
}

/// Source for a plane model.
#[derive(Debug, Clone)]
pub enum PlaneSource {
    BuiltIn(PlaneType),
    File { path: PathBuf, name: String },
}

/// Aircraft types with built-in coefficients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum PlaneType {
    Cessna172,
}
