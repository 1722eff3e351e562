pub mod config;
mod environment;
mod world_data;

pub use config::{FlightConfig, StartConfig, WorldLimits};
pub use environment::{Environment, FlatTerrain, Terrain};
pub use world_data::{WorldData, WorldDataError};
