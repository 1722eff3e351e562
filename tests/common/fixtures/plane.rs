use std::sync::Arc;

use nalgebra::Vector3;
use skyward::components::{Plane, PlaneModel};

pub fn cessna() -> Arc<PlaneModel> {
    Arc::new(PlaneModel::cessna_172())
}

/// Parked at the origin on ground of the given elevation, flaps half down.
pub fn parked_plane(elevation: f64) -> Plane {
    let mut plane = Plane::new(cessna());
    plane.pos.y = elevation;
    plane.flaps = 0.5;
    plane
}

/// Airborne heading north at 30 m/s, `height` above the origin, sinking at `sink_rate`.
pub fn approaching_plane(height: f64, sink_rate: f64) -> Plane {
    let mut plane = Plane::new(cessna());
    plane.on_ground = false;
    plane.pos = Vector3::new(0.0, height, 0.0);
    plane.vel = Vector3::new(0.0, -sink_rate, -30.0);
    plane
}

/// Level cruise heading north at `speed`.
pub fn cruising_plane(height: f64, speed: f64) -> Plane {
    let mut plane = Plane::new(cessna());
    plane.on_ground = false;
    plane.pos = Vector3::new(0.0, height, 0.0);
    plane.vel = Vector3::new(0.0, 0.0, -speed);
    plane.throttle_frac = 0.6;
    plane.flaps = 1.0;
    plane
}
