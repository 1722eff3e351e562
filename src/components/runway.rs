use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::{point_in_rotated_rect, RectLocal, GLIDESLOPE_ANGLE};

#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runway {
    pub name: String,
    /// Centre of the runway surface in world space [m]
    pub pos: Vector3<f64>,
    /// Width of the runway [m]
    pub width: f64,
    /// Length of the runway [m]
    pub length: f64,
    /// Direction of the centreline in degrees, clockwise from north
    pub heading: f64,
}

impl Default for Runway {
    fn default() -> Self {
        Self {
            name: "RWY".to_string(),
            pos: Vector3::zeros(),
            width: 30.0,
            length: 1_500.0,
            heading: 0.0,
        }
    }
}

impl Runway {
    pub fn local_coords(&self, x: f64, z: f64) -> RectLocal {
        point_in_rotated_rect(
            x,
            z,
            self.pos.x,
            self.pos.z,
            self.length,
            self.width,
            self.heading,
        )
    }

    pub fn contains(&self, x: f64, z: f64) -> bool {
        self.local_coords(x, z).inside
    }

    /// Height above (positive) or below the 3° approach path to the near
    /// threshold, for an approach flown along the runway heading.
    ///
    /// `None` once the aircraft is past the threshold.
    pub fn glideslope_deviation(&self, pos: &Vector3<f64>) -> Option<f64> {
        let local = self.local_coords(pos.x, pos.z);
        let distance_to_threshold = -self.length / 2.0 - local.along;
        if distance_to_threshold <= 0.0 {
            return None;
        }
        let on_slope = distance_to_threshold * GLIDESLOPE_ANGLE.to_radians().tan();
        Some(pos.y - self.pos.y - on_slope)
    }
}
