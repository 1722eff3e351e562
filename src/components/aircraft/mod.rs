pub mod config;
pub mod controls;
pub mod state;

pub use config::{ConfigError, PlaneCatalog, PlaneModel, PlaneSource, PlaneType};
pub use controls::{Axis, ControlInput, PilotInput};
pub use state::{CrashReason, Plane};
