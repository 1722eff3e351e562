use glam::DVec2;
use nalgebra::Vector3;

use crate::utils::errors::SimError;

/// Tolerance on the squared length of a rotation axis
const UNIT_AXIS_TOLERANCE: f64 = 1e-6;

/// Clamp `value` into `(lower, upper)`.
///
/// Inverted bounds or a NaN operand are contract violations and are reported
/// as errors rather than silently producing a value.
pub fn clamp(value: f64, (lower, upper): (f64, f64)) -> Result<f64, SimError> {
    if value.is_nan() || lower.is_nan() || upper.is_nan() {
        return Err(SimError::NotANumber("clamp"));
    }
    if lower > upper {
        return Err(SimError::InvalidRange { lower, upper });
    }
    Ok(lower.max(value.min(upper)))
}

/// Linear interpolation between two values, `factor` is not clamped
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

/// Maps a value from one range to another.
///
/// A zero-width input range maps everything to `out_min`.
pub fn map_value(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if in_min == in_max {
        return out_min;
    }

    let range_scale_factor = (out_max - out_min) / (in_max - in_min);
    range_scale_factor * (value - in_min) + out_min
}

#[inline]
pub fn get_sign(n: f64) -> i32 {
    if n > 0.0 {
        1
    } else if n == 0.0 {
        0
    } else {
        -1
    }
}

/// Wrap an angle in degrees into `[-180, 180)`
#[inline]
pub fn normalize_angle(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Rotate `vec` by `angle_deg` around `axis` using Rodrigues' formula.
pub fn rotate_around_axis(
    vec: &Vector3<f64>,
    axis: &Vector3<f64>,
    angle_deg: f64,
) -> Result<Vector3<f64>, SimError> {
    let length_squared = axis.norm_squared();
    if (length_squared - 1.0).abs() > UNIT_AXIS_TOLERANCE {
        return Err(SimError::NonUnitAxis(length_squared));
    }

    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Ok(vec * cos + axis.cross(vec) * sin + axis * axis.dot(vec) * (1.0 - cos))
}

/// Position of a point relative to a heading-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectLocal {
    pub inside: bool,
    /// Distance from the centre along the heading [m]
    pub along: f64,
    /// Distance from the centre to the right of the heading [m]
    pub across: f64,
}

/// Test whether `(x, z)` lies inside a rectangle centred on `(rx, rz)` whose
/// length runs along `heading_deg`, measured clockwise from north (-z).
pub fn point_in_rotated_rect(
    x: f64,
    z: f64,
    rx: f64,
    rz: f64,
    length: f64,
    width: f64,
    heading_deg: f64,
) -> RectLocal {
    let offset = DVec2::new(x - rx, z - rz);
    let local = DVec2::from_angle(-heading_deg.to_radians()).rotate(offset);

    let along = -local.y;
    let across = local.x;

    RectLocal {
        inside: along.abs() <= length / 2.0 && across.abs() <= width / 2.0,
        along,
        across,
    }
}
