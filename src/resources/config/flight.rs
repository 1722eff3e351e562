use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{
    SimError, AIR_DENSITY, DEFAULT_TIMESTEP_MS, GRAVITY, SOFT_TRAVEL_LIMIT, TRAVEL_LIMIT,
};

/// Where a fresh or reset aircraft is placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartConfig {
    pub x: f64,
    pub z: f64,
    /// Degrees clockwise from north
    pub heading: f64,
    /// Flap lever, 0 = down, 1 = up
    pub flaps: f64,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            z: 0.0,
            heading: 0.0,
            flaps: 0.5,
        }
    }
}

/// Square world boundary, as Chebyshev distances from the origin [m].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldLimits {
    /// Containment force starts here
    pub soft: f64,
    /// Containment force cancels full thrust here; position is clamped to it
    pub hard: f64,
}

impl Default for WorldLimits {
    fn default() -> Self {
        Self {
            soft: SOFT_TRAVEL_LIMIT,
            hard: TRAVEL_LIMIT,
        }
    }
}

/// Global settings for the flight simulation.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightConfig {
    /// Fixed simulation step [ms]
    pub timestep_ms: f64,
    pub gravity: f64,
    pub air_density: f64,
    pub limits: WorldLimits,
    pub start: StartConfig,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            timestep_ms: DEFAULT_TIMESTEP_MS,
            gravity: GRAVITY,
            air_density: AIR_DENSITY,
            limits: WorldLimits::default(),
            start: StartConfig::default(),
        }
    }
}

impl FlightConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        info!("Loaded flight config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SimError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.timestep_ms.is_finite() && self.timestep_ms > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "timestep_ms must be positive, got {}",
                self.timestep_ms
            )));
        }
        if !(self.gravity >= 0.0 && self.air_density > 0.0) {
            return Err(SimError::InvalidConfig(
                "gravity must be non-negative and air density positive".to_string(),
            ));
        }
        if !(0.0 < self.limits.soft && self.limits.soft < self.limits.hard) {
            return Err(SimError::InvalidConfig(format!(
                "world limits must satisfy 0 < soft < hard, got {} and {}",
                self.limits.soft, self.limits.hard
            )));
        }
        if !(0.0..=1.0).contains(&self.start.flaps) {
            return Err(SimError::InvalidConfig(format!(
                "start flaps must be within [0, 1], got {}",
                self.start.flaps
            )));
        }
        Ok(())
    }

    pub fn timestep_secs(&self) -> f64 {
        self.timestep_ms / 1000.0
    }
}
