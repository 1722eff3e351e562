use bevy::prelude::*;
use skyward::{
    components::{ControlInput, PilotInput, Plane},
    plugins::{FlightPlugin, LandingEvent, ResetRequestEvent},
    resources::{Environment, FlightConfig},
    systems::FlightEvent,
};

// Builder for creating a test application with customizable configuration
#[derive(Default)]
pub struct TestAppBuilder {
    config: FlightConfig,
    environment: Option<Environment>,
    planes: Vec<Plane>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: FlightConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_plane(mut self, plane: Plane) -> Self {
        self.planes.push(plane);
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();
        app.add_plugins(FlightPlugin {
            config: self.config,
        });

        if let Some(environment) = self.environment {
            app.insert_resource(environment);
        }

        let planes = self
            .planes
            .into_iter()
            .map(|plane| app.world_mut().spawn((plane, PilotInput::default())).id())
            .collect();

        TestApp { app, planes }
    }
}

/// Main test application wrapper; steps the fixed schedule directly.
pub struct TestApp {
    pub app: App,
    pub planes: Vec<Entity>,
}

impl TestApp {
    pub fn step(&mut self) {
        self.app.world_mut().run_schedule(FixedUpdate);
    }

    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    pub fn entity(&self) -> Entity {
        self.planes[0]
    }

    pub fn plane(&self) -> &Plane {
        self.plane_of(self.entity())
    }

    pub fn plane_of(&self, entity: Entity) -> &Plane {
        self.app
            .world()
            .get::<Plane>(entity)
            .expect("aircraft entity has no Plane")
    }

    pub fn plane_mut(&mut self) -> Mut<Plane> {
        let entity = self.entity();
        self.app
            .world_mut()
            .get_mut::<Plane>(entity)
            .expect("aircraft entity has no Plane")
    }

    pub fn set_input(&mut self, input: ControlInput) {
        let entity = self.entity();
        let mut pilot = self
            .app
            .world_mut()
            .get_mut::<PilotInput>(entity)
            .expect("aircraft entity has no PilotInput");
        pilot.0 = input;
    }

    pub fn request_reset(&mut self, entity: Option<Entity>) {
        self.app.world_mut().send_event(ResetRequestEvent { entity });
    }

    pub fn environment(&self) -> &Environment {
        self.app.world().resource::<Environment>()
    }

    pub fn config(&self) -> &FlightConfig {
        self.app.world().resource::<FlightConfig>()
    }

    /// Landing events sent since the last call.
    pub fn drain_landing_events(&mut self) -> Vec<LandingEvent> {
        self.app
            .world_mut()
            .resource_mut::<Events<LandingEvent>>()
            .drain()
            .collect()
    }

    /// Outcomes for the first aircraft sent since the last call.
    pub fn drain_outcomes(&mut self) -> Vec<FlightEvent> {
        let entity = self.entity();
        self.drain_landing_events()
            .into_iter()
            .filter(|event| event.entity == entity)
            .map(|event| event.outcome)
            .collect()
    }
}
