mod loader;
mod plane;

pub use loader::{ConfigError, PlaneCatalog};
pub use plane::{PlaneModel, PlaneSource, PlaneType};
