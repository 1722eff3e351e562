use nalgebra::Vector3;

use crate::components::{Plane, PlaneModel};
use crate::resources::{FlightConfig, WorldLimits};
use crate::utils::{clamp, SimError, EPSILON};

const STALL_LIFT_FLOOR: f64 = 0.125;
const STALL_LIFT_DECAY: f64 = 0.1; // per degree past stall
const STALL_DRAG_PENALTY: f64 = 0.004; // per degree² past stall
const SURFACE_DRAG_MULTIPLIER: f64 = 1.5;
const MAX_DRAG_COEFFICIENT: f64 = 1.0;
const FLAP_LIFT_EXPONENT: f64 = 0.7;
const FLAP_DRAG_EXPONENT: f64 = 1.8;

/// Forces acting on an aircraft in world space [N]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forces {
    pub thrust: Vector3<f64>,
    pub weight: Vector3<f64>,
    pub lift: Vector3<f64>,
    pub drag: Vector3<f64>,
    pub containment: Vector3<f64>,
}

impl Forces {
    pub fn net(&self) -> Vector3<f64> {
        self.thrust + self.weight + self.lift + self.drag + self.containment
    }
}

/// Unit vector along the nose. Positive pitch is nose down.
pub fn forward_vector(pitch_deg: f64, yaw_deg: f64) -> Vector3<f64> {
    let (pitch, yaw) = (pitch_deg.to_radians(), yaw_deg.to_radians());
    Vector3::new(
        yaw.sin() * pitch.cos(),
        (-pitch).sin(),
        -yaw.cos() * pitch.cos(),
    )
    .normalize()
}

/// Spanwise unit vector towards the right wing tip.
///
/// Equal to `forward × up` normalised, but still defined at ±90° pitch.
pub fn right_vector(yaw_deg: f64) -> Vector3<f64> {
    let yaw = yaw_deg.to_radians();
    Vector3::new(yaw.cos(), 0.0, yaw.sin())
}

/// Difference between the nose and flight-path climb angles [deg]
pub fn angle_of_attack(forward: &Vector3<f64>, vel: &Vector3<f64>) -> f64 {
    let airspeed = vel.norm();
    if airspeed < EPSILON {
        return 0.0;
    }
    let vel_unit = vel / airspeed;
    let pitch_forward = forward.y.clamp(-1.0, 1.0).asin();
    let pitch_velocity = vel_unit.y.clamp(-1.0, 1.0).asin();
    (pitch_forward - pitch_velocity).to_degrees()
}

/// Linear up to the stall, then collapsing towards a floor.
pub fn lift_coefficient(model: &PlaneModel, aoa: f64) -> f64 {
    if aoa <= model.stall_angle {
        model.cl_max * aoa / model.stall_angle
    } else {
        let excess = aoa - model.stall_angle;
        (model.cl_max * (1.0 - STALL_LIFT_DECAY * excess)).max(STALL_LIFT_FLOOR)
    }
}

/// `on_surface` adds rolling resistance while the wheels are on the ground.
pub fn drag_coefficient(model: &PlaneModel, aoa: f64, on_surface: bool) -> f64 {
    let mut cd = model.cd_min + model.cd_slope * aoa.abs();
    if aoa > model.stall_angle {
        let excess = aoa - model.stall_angle;
        cd += excess.powi(2) * STALL_DRAG_PENALTY;
    }
    if on_surface {
        cd *= SURFACE_DRAG_MULTIPLIER;
    }
    cd.min(MAX_DRAG_COEFFICIENT)
}

/// Horizontal push back towards the origin once past the soft world limit.
///
/// Grows quadratically to `max_force` at the hard limit.
pub fn containment_force(
    pos: &Vector3<f64>,
    limits: &WorldLimits,
    max_force: f64,
) -> Result<Vector3<f64>, SimError> {
    let chebyshev = pos.x.abs().max(pos.z.abs());
    if chebyshev <= limits.soft {
        return Ok(Vector3::zeros());
    }

    let t = clamp(
        (chebyshev - limits.soft) / (limits.hard - limits.soft),
        (0.0, 1.0),
    )?;
    let towards_origin = Vector3::new(-pos.x, 0.0, -pos.z)
        .try_normalize(EPSILON)
        .unwrap_or_else(Vector3::zeros);

    Ok(towards_origin * max_force * t * t)
}

/// Sum the forces on `plane` for this tick. `plane.aoa` must already be current.
pub fn compute_forces(
    plane: &Plane,
    forward: &Vector3<f64>,
    on_surface: bool,
    config: &FlightConfig,
) -> Result<Forces, SimError> {
    let model = &plane.model;
    let airspeed = plane.speed();
    let deflection = plane.flap_deflection();
    let dynamic_pressure = 0.5 * config.air_density * airspeed.powi(2) * model.wing_area;

    let thrust = if plane.disabled() {
        Vector3::zeros()
    } else {
        forward * plane.throttle_frac * model.max_throttle
    };

    let weight = Vector3::new(0.0, -config.gravity * model.mass, 0.0);

    let lift = if plane.vel.norm_squared() < EPSILON {
        Vector3::zeros()
    } else {
        let lift_mag = dynamic_pressure
            * lift_coefficient(model, plane.aoa)
            * (1.0 + deflection.powf(FLAP_LIFT_EXPONENT) * model.flap_lift_bonus);

        // Airflow turned 90° about the span, so always perpendicular to both
        let airflow_dir = -plane.vel / airspeed;
        airflow_dir
            .cross(&right_vector(plane.yaw()))
            .try_normalize(EPSILON)
            .map_or_else(Vector3::zeros, |lift_dir| lift_dir * lift_mag)
    };

    let drag = if airspeed < EPSILON {
        Vector3::zeros()
    } else {
        let drag_mag = dynamic_pressure
            * drag_coefficient(model, plane.aoa, on_surface)
            * (1.0 + deflection.powf(FLAP_DRAG_EXPONENT) * model.flap_drag_penalty);
        -plane.vel / airspeed * drag_mag
    };

    let containment = containment_force(&plane.pos, &config.limits, model.max_throttle)?;

    Ok(Forces {
        thrust,
        weight,
        lift,
        drag,
        containment,
    })
}
