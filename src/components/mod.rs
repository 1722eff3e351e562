pub mod aircraft;
pub mod collision;
pub mod runway;

pub use aircraft::{
    Axis, ConfigError, ControlInput, CrashReason, PilotInput, Plane, PlaneCatalog, PlaneModel,
    PlaneSource, PlaneType,
};
pub use collision::{
    point_in_cuboid, point_in_cylinder, point_in_sphere, Building, BuildingPart, Primitive,
};
pub use runway::Runway;

use nalgebra::Vector3;

/// Anything with a place and motion in the simulated world.
pub trait SimBody {
    /// World position [m]
    fn position(&self) -> Vector3<f64>;
    /// World velocity [m/s]
    fn velocity(&self) -> Vector3<f64>;
}
