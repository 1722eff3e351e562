use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::aircraft::Plane;
use crate::utils::{clamp, SimError, REFERENCE_SPEED};

const THROTTLE_SPEED: f64 = 0.4; // per second
const BASE_ROTATION_ACCEL: f64 = 20.0; // deg/s²
const ROTATION_DAMPING: f64 = 0.8; // per second
const FLAPS_SPEED: f64 = 2.0; // per second
const RUDDER_SPEED: f64 = 2.5; // per second
const RUDDER_SNAPBACK: f64 = 3.0; // per second

/// Direction a control is being driven this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Decrease,
    #[default]
    Neutral,
    Increase,
}

impl Axis {
    pub fn from_keys(decrease: bool, increase: bool) -> Self {
        match (decrease, increase) {
            (true, false) => Axis::Decrease,
            (false, true) => Axis::Increase,
            _ => Axis::Neutral,
        }
    }

    fn sign(self) -> f64 {
        match self {
            Axis::Decrease => -1.0,
            Axis::Neutral => 0.0,
            Axis::Increase => 1.0,
        }
    }
}

/// Pilot commands for one tick.
///
/// `pitch: Increase` raises the nose; `roll: Increase` banks right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub throttle: Axis,
    pub pitch: Axis,
    pub roll: Axis,
    /// `Increase` raises the flaps
    pub flaps: Axis,
    pub rudder: Axis,
    pub brake: bool,
}

/// Latest commands for an aircraft entity, written by the input layer.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PilotInput(pub ControlInput);

impl Plane {
    /// Rotation acceleration available this tick [deg/s per tick].
    ///
    /// Authority falls with damage and at low speed, and is heavily reduced on
    /// the ground.
    fn rotation_authority(&self, dt: f64) -> Result<f64, SimError> {
        let control_authority = 1.0 - 0.875 * self.damage_level.powi(2);
        let speed_authority = clamp((self.speed() / REFERENCE_SPEED).powi(2), (0.01, 1.0))?;
        let ground_factor = if self.on_ground { 0.2 } else { 1.0 };
        Ok(control_authority * BASE_ROTATION_ACCEL * dt * speed_authority * ground_factor)
    }

    /// Apply pilot commands over `dt_ms` milliseconds.
    ///
    /// Does nothing unless the aircraft is flyable.
    pub fn apply_controls(&mut self, input: &ControlInput, dt_ms: f64) -> Result<(), SimError> {
        if !self.flyable() {
            return Ok(());
        }
        let dt = dt_ms / 1000.0;

        self.throttle_frac = clamp(
            self.throttle_frac + input.throttle.sign() * THROTTLE_SPEED * dt,
            (0.0, 1.0),
        )?;

        let rot_accel = self.rotation_authority(dt)?;

        // Positive pitch is nose down, so pulling up drives the rate negative
        match input.pitch {
            Axis::Increase => self.rot_rate.x -= rot_accel * (1.0 + self.rot.x / 90.0),
            Axis::Decrease => self.rot_rate.x += rot_accel * (1.0 - self.rot.x / 90.0),
            Axis::Neutral => self.rot_rate.x *= 1.0 - ROTATION_DAMPING * dt,
        }

        match input.roll {
            Axis::Neutral => self.rot_rate.z *= 1.0 - ROTATION_DAMPING * dt,
            axis => self.rot_rate.z += axis.sign() * rot_accel,
        }

        self.flaps = clamp(
            self.flaps + input.flaps.sign() * FLAPS_SPEED * dt,
            (0.0, 1.0),
        )?;

        match input.rudder {
            Axis::Neutral => self.rudder *= (1.0 - RUDDER_SNAPBACK * dt).max(0.0),
            axis => self.rudder += axis.sign() * RUDDER_SPEED * dt,
        }
        self.rudder = clamp(self.rudder, (-1.0, 1.0))?;

        self.braking = input.brake;

        Ok(())
    }
}
