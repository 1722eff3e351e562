use std::sync::Arc;

use bevy::prelude::*;

use crate::components::{PilotInput, Plane, PlaneCatalog, PlaneModel};
use crate::plugins::{LandingEvent, ResetRequestEvent};
use crate::resources::{Environment, FlightConfig};
use crate::systems::{flight_controls_system, flight_dynamics_system, reset_system};

/// Flight simulation stages
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum FlightSet {
    Controls,
    Dynamics,
}

/// Runs the flight model at a fixed timestep.
///
/// Inserts the flight config and, unless the app already provides them, a
/// default environment and the built-in plane catalog.
#[derive(Default)]
pub struct FlightPlugin {
    pub config: FlightConfig,
}

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LandingEvent>()
            .add_event::<ResetRequestEvent>();

        app.insert_resource(self.config.clone())
            .init_resource::<Environment>();
        if !app.world().contains_resource::<PlaneCatalog>() {
            app.insert_resource(PlaneCatalog::built_in());
        }

        app.insert_resource(Time::<Fixed>::from_seconds(self.config.timestep_secs()));

        app.configure_sets(
            FixedUpdate,
            (FlightSet::Controls, FlightSet::Dynamics).chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                (reset_system, flight_controls_system)
                    .chain()
                    .in_set(FlightSet::Controls),
                flight_dynamics_system.in_set(FlightSet::Dynamics),
            ),
        );

        info!(
            "Flight plugin running at {:.1} Hz",
            1000.0 / self.config.timestep_ms
        );
    }
}

/// Spawn an aircraft at the configured start, resting on the ground.
pub fn spawn_plane(world: &mut World, model: Arc<PlaneModel>) -> Entity {
    let start = world
        .get_resource::<FlightConfig>()
        .map(|config| config.start)
        .unwrap_or_default();
    let ground = world
        .get_resource::<Environment>()
        .map_or(0.0, |env| env.ground_height(start.x, start.z));

    world
        .spawn((Plane::spawn(model, &start, ground), PilotInput::default()))
        .id()
}
