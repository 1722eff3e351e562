use bevy::prelude::*;

use crate::components::{PilotInput, Plane};
use crate::plugins::{LandingEvent, ResetRequestEvent};
use crate::resources::{Environment, FlightConfig};
use crate::systems::FlightEvent;

/// Applies each aircraft's pilot commands for one fixed step.
pub fn flight_controls_system(
    mut query: Query<(Entity, &mut Plane, &PilotInput)>,
    config: Res<FlightConfig>,
) {
    for (entity, mut plane, input) in query.iter_mut() {
        if let Err(err) = plane.apply_controls(&input.0, config.timestep_ms) {
            error!("Control update failed for {:?}: {}", entity, err);
        }
    }
}

/// Integrates every aircraft that has not crashed and forwards its landing events.
pub fn flight_dynamics_system(
    mut query: Query<(Entity, &mut Plane)>,
    env: Res<Environment>,
    config: Res<FlightConfig>,
    mut landing_events: EventWriter<LandingEvent>,
) {
    for (entity, mut plane) in query.iter_mut() {
        if plane.crashed() {
            continue;
        }

        let mut observed: Vec<FlightEvent> = Vec::new();
        if let Err(err) = plane.update(config.timestep_ms, &env, &config, &mut observed) {
            error!("Flight update failed for {:?}: {}", entity, err);
        }

        for outcome in observed {
            landing_events.send(LandingEvent { entity, outcome });
        }
    }
}

pub fn reset_system(
    mut requests: EventReader<ResetRequestEvent>,
    mut query: Query<(Entity, &mut Plane, Option<&mut PilotInput>)>,
    env: Res<Environment>,
    config: Res<FlightConfig>,
) {
    for request in requests.read() {
        for (entity, mut plane, input) in query.iter_mut() {
            if request.entity.is_some_and(|target| target != entity) {
                continue;
            }

            let start = config.start;
            plane.reset(&start, env.ground_height(start.x, start.z));
            if let Some(mut input) = input {
                *input = PilotInput::default();
            }
        }
    }
}
