pub mod collisions;
mod flight;
pub mod landing;
pub mod physics;

pub use collisions::{detect_obstacle_collision, ObstacleHit};
pub use flight::{flight_controls_system, flight_dynamics_system, reset_system};
pub use landing::{
    classify_landing, FlightEvent, ImpactDamage, LandingObserver, LandingOutcome, Touchdown,
};
pub use physics::TickOutcome;
