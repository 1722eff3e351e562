pub mod flight;

pub use flight::{FlightConfig, StartConfig, WorldLimits};
