use bevy::prelude::*;

use crate::systems::FlightEvent;

/// A landing or crash notification for one aircraft.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LandingEvent {
    pub entity: Entity,
    pub outcome: FlightEvent,
}

/// Put aircraft back at the configured start.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResetRequestEvent {
    /// Single aircraft to reset; every aircraft when `None`
    pub entity: Option<Entity>,
}
