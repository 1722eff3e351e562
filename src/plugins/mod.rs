mod events;
mod flight;

pub use events::{LandingEvent, ResetRequestEvent};
pub use flight::{spawn_plane, FlightPlugin, FlightSet};
