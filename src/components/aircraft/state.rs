use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::aircraft::config::PlaneModel;
use crate::components::SimBody;
use crate::resources::StartConfig;

/// What the aircraft hit when it was destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrashReason {
    Terrain,
    Obstacle,
    Ocean,
    Runway,
}

impl CrashReason {
    /// Classify an impact by where it happened; water takes precedence.
    pub fn from_location(over_runway: bool, over_water: bool) -> Self {
        if over_water {
            CrashReason::Ocean
        } else if over_runway {
            CrashReason::Runway
        } else {
            CrashReason::Terrain
        }
    }
}

impl fmt::Display for CrashReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CrashReason::Terrain => "crashed into terrain",
            CrashReason::Obstacle => "collided with an obstacle",
            CrashReason::Ocean => "crashed into the ocean",
            CrashReason::Runway => "crashed on the runway",
        };
        f.write_str(text)
    }
}

/// Runtime state of a simulated aircraft.
///
/// Rotations are degrees: `rot = (pitch, yaw, roll)` with positive pitch
/// meaning nose down. World axes are x east, y up, z south.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Plane {
    pub model: Arc<PlaneModel>,

    /// Position in world space [m]
    pub pos: Vector3<f64>,
    /// Velocity in world space [m/s]
    pub vel: Vector3<f64>,
    /// Acceleration from the last tick [m/s²]
    pub acc: Vector3<f64>,

    /// (pitch, yaw, roll) [deg]
    pub rot: Vector3<f64>,
    /// (pitch, yaw, roll) rates [deg/s]
    pub rot_rate: Vector3<f64>,

    /// Throttle setting in [0, 1]
    pub throttle_frac: f64,
    /// Flap lever in [0, 1], 0 = fully down, 1 = fully up
    pub flaps: f64,
    /// Rudder deflection in [-1, 1]
    pub rudder: f64,
    pub braking: bool,

    /// Angle of attack from the last tick [deg]
    pub aoa: f64,
    pub on_ground: bool,
    /// Structural damage in [0, 1]
    pub damage_level: f64,
    pub crash_reason: Option<CrashReason>,
}

impl Plane {
    /// A parked aircraft at the origin.
    pub fn new(model: Arc<PlaneModel>) -> Self {
        Self {
            model,
            pos: Vector3::zeros(),
            vel: Vector3::zeros(),
            acc: Vector3::zeros(),
            rot: Vector3::zeros(),
            rot_rate: Vector3::zeros(),
            throttle_frac: 0.0,
            flaps: 0.0,
            rudder: 0.0,
            braking: false,
            aoa: 0.0,
            on_ground: true,
            damage_level: 0.0,
            crash_reason: None,
        }
    }

    /// A fresh aircraft placed at the configured start, resting on the ground.
    pub fn spawn(model: Arc<PlaneModel>, start: &StartConfig, ground_height: f64) -> Self {
        let mut plane = Self::new(model);
        plane.reset(start, ground_height);
        plane
    }

    /// Restore the start state. The only operation that clears damage.
    pub fn reset(&mut self, start: &StartConfig, ground_height: f64) {
        let model = Arc::clone(&self.model);
        *self = Self::new(model);

        self.pos = Vector3::new(start.x, ground_height, start.z);
        self.rot.y = start.heading.rem_euclid(360.0);
        self.flaps = start.flaps;

        info!(
            "{} reset at ({:.1}, {:.1}, {:.1}) heading {:.0}",
            self.model.name, self.pos.x, self.pos.y, self.pos.z, self.rot.y
        );
    }

    pub fn pitch(&self) -> f64 {
        self.rot.x
    }

    pub fn yaw(&self) -> f64 {
        self.rot.y
    }

    pub fn roll(&self) -> f64 {
        self.rot.z
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    pub fn crashed(&self) -> bool {
        self.crash_reason.is_some()
    }

    /// Fully damaged; engine output is lost.
    pub fn disabled(&self) -> bool {
        self.damage_level >= 1.0
    }

    pub fn flyable(&self) -> bool {
        !self.crashed() && !(self.disabled() && self.on_ground)
    }

    pub fn stalling(&self) -> bool {
        self.aoa > self.model.stall_angle
    }

    pub fn overspeed(&self) -> bool {
        self.speed() > self.model.v_ne
    }

    /// Flap deflection in [0, 1], 1 = fully down
    pub fn flap_deflection(&self) -> f64 {
        1.0 - self.flaps
    }
}

impl SimBody for Plane {
    fn position(&self) -> Vector3<f64> {
        self.pos
    }

    fn velocity(&self) -> Vector3<f64> {
        self.vel
    }
}
