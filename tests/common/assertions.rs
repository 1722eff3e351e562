use approx::assert_relative_eq;
use nalgebra::Vector3;
use skyward::{components::Plane, resources::Environment};

/// Assert that every state value is finite and within its documented range
#[track_caller]
pub fn assert_plane_valid(plane: &Plane) {
    for (name, v) in [
        ("position", plane.pos),
        ("velocity", plane.vel),
        ("acceleration", plane.acc),
        ("rotation", plane.rot),
        ("rotation rate", plane.rot_rate),
    ] {
        assert!(v.iter().all(|x| x.is_finite()), "{} is not finite: {:?}", name, v);
    }

    assert!((0.0..=1.0).contains(&plane.throttle_frac), "throttle out of range");
    assert!((0.0..=1.0).contains(&plane.flaps), "flaps out of range");
    assert!((-1.0..=1.0).contains(&plane.rudder), "rudder out of range");
    assert!((0.0..=1.0).contains(&plane.damage_level), "damage out of range");

    assert!((-90.0..=90.0).contains(&plane.pitch()), "pitch {} out of range", plane.pitch());
    assert!((0.0..360.0).contains(&plane.yaw()), "yaw {} not wrapped", plane.yaw());
    assert!((0.0..360.0).contains(&plane.roll()), "roll {} not wrapped", plane.roll());

    if plane.crashed() {
        assert_eq!(plane.damage_level, 1.0, "crashed with damage below 1");
    }
}

#[track_caller]
pub fn assert_above_ground(plane: &Plane, env: &Environment) {
    let ground = env.ground_height(plane.pos.x, plane.pos.z);
    assert!(
        plane.pos.y >= ground,
        "aircraft at {:.3} m is below the ground at {:.3} m",
        plane.pos.y,
        ground
    );
}

#[track_caller]
pub fn assert_vector_eq(actual: Vector3<f64>, expected: Vector3<f64>, epsilon: f64) {
    assert_relative_eq!(actual, expected, epsilon = epsilon);
}
