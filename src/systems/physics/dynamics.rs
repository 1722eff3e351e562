use std::sync::Arc;

use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{CrashReason, Plane};
use crate::resources::{Environment, FlightConfig};
use crate::systems::collisions::detect_obstacle_collision;
use crate::systems::landing::{
    classify_landing, FlightEvent, ImpactDamage, LandingObserver, LandingOutcome, Touchdown,
};
use crate::systems::physics::forces::{angle_of_attack, compute_forces, forward_vector};
use crate::utils::{
    clamp, normalize_angle, SimError, EPSILON, MAX_PITCH_RATE, MAX_ROLL_RATE, MAX_SPEED,
    MAX_YAW_RATE, REFERENCE_SPEED,
};

/// Yaw rate per unit sin(roll) at reference speed [deg/s]
const ROLL_TO_YAW: f64 = 30.0;
/// Rate at which velocity swings towards the nose at low speed
const REALIGN_RATE: f64 = 5.0;
const BRAKE_DECAY: f64 = 0.4; // per second
const YAW_FRICTION: f64 = 0.8; // per second
const GROUND_RUDDER_ROLL: f64 = 0.2;
const STALL_DROOP_RATE: f64 = 5.0; // deg/s per second
const OVERSPEED_DAMAGE_FACTOR: f64 = 0.002;
const ROLLING_FRICTION: f64 = 0.5; // per second
const SCRAPE_DAMAGE_RATE: f64 = 0.02; // per second at the scrape reference speed
const SCRAPE_REFERENCE_SPEED: f64 = 30.0; // m/s

/// How a tick ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Forces integrated as normal
    Integrated,
    /// Hit a building; nothing was integrated
    ObstacleStrike,
}

impl Plane {
    /// Advance the aircraft by `dt_ms` milliseconds.
    ///
    /// Control inputs must already have been applied. Landing and crash
    /// notifications are delivered to `observer` as they happen.
    pub fn update(
        &mut self,
        dt_ms: f64,
        env: &Environment,
        config: &FlightConfig,
        observer: &mut impl LandingObserver,
    ) -> Result<TickOutcome, SimError> {
        let dt = dt_ms / 1000.0;

        if self.check_obstacles(env, observer) {
            return Ok(TickOutcome::ObstacleStrike);
        }

        // Wheels resting on the surface at the start of the tick
        let on_surface = self.pos.y <= env.ground_height(self.pos.x, self.pos.z);

        // Banking turns the aircraft
        let speed_factor = clamp(self.speed() / REFERENCE_SPEED, (0.0, 1.0))?;
        self.rot.y += self.rot.z.to_radians().sin() * speed_factor * ROLL_TO_YAW * dt;
        let roll = normalize_angle(self.rot.z);

        let forward = forward_vector(self.rot.x, self.rot.y);

        let speed = self.speed();
        if speed > EPSILON {
            let blend = clamp(REALIGN_RATE / (speed + EPSILON), (0.0, 1.0))? * dt;
            self.vel = self.vel.lerp(&(forward * speed), blend);
        }

        let was_stalling = self.stalling();
        self.aoa = angle_of_attack(&forward, &self.vel);
        if self.stalling() && !was_stalling {
            debug!("{} stalling at AoA {:.1}°", self.model.name, self.aoa);
        }

        let forces = compute_forces(self, &forward, on_surface, config)?;
        if forces.containment != Vector3::zeros() {
            debug!(
                "Containment pushing {} back from ({:.0}, {:.0})",
                self.model.name, self.pos.x, self.pos.z
            );
        }

        if self.braking && self.on_ground {
            self.vel *= 1.0 - BRAKE_DECAY * dt;
        }

        self.integrate(forces.net(), dt, env);
        self.integrate_rotation(roll, dt)?;

        self.pos.x = clamp(self.pos.x, (-config.limits.hard, config.limits.hard))?;
        self.pos.z = clamp(self.pos.z, (-config.limits.hard, config.limits.hard))?;

        // Damage grows with excess dynamic pressure
        let dp_excess = (self.speed().powi(2) - self.model.v_ne.powi(2)).max(0.0);
        self.damage_level += dt * OVERSPEED_DAMAGE_FACTOR * dp_excess;

        self.resolve_ground_contact(dt, env, observer);

        self.damage_level = clamp(self.damage_level, (0.0, 1.0))?;

        if self.damage_level >= 1.0 && self.on_ground && !self.crashed() {
            let reason = CrashReason::from_location(
                env.is_over_runway(self.pos.x, self.pos.z),
                env.is_over_water(self.pos.x, self.pos.z),
            );
            self.crash(reason, observer);
        }

        Ok(TickOutcome::Integrated)
    }

    /// Lethal strike on any building part in range. Returns whether one occurred.
    fn check_obstacles(&mut self, env: &Environment, observer: &mut impl LandingObserver) -> bool {
        let Some(hit) = detect_obstacle_collision(&*self, &env.buildings) else {
            return false;
        };

        if !self.crashed() {
            info!(
                "{} struck {} at ({:.1}, {:.1}, {:.1})",
                self.model.name, hit.building.kind, hit.centre.x, hit.centre.y, hit.centre.z
            );
            self.damage_level = 1.0;
            self.crash(CrashReason::Obstacle, observer);
        }
        true
    }

    /// Semi-implicit Euler step of the translational state.
    fn integrate(&mut self, net_force: Vector3<f64>, dt: f64, env: &Environment) {
        self.acc = net_force / self.model.mass;
        self.vel += self.acc * dt;
        self.pos += self.vel * dt;

        let ground = env.ground_height(self.pos.x, self.pos.z);
        self.pos.y = self.pos.y.max(ground);

        if self.vel.norm() > MAX_SPEED {
            self.vel = self.vel.normalize() * MAX_SPEED;
        }
    }

    fn integrate_rotation(&mut self, roll: f64, dt: f64) -> Result<(), SimError> {
        let model = Arc::clone(&self.model);

        // Wings level themselves
        self.rot_rate.z += -roll * model.roll_stability_factor * dt;

        self.rot_rate.y += self.rudder * model.rudder_sensitivity * dt;
        self.rot_rate.y *= 1.0 - YAW_FRICTION * dt;

        // Rudder rolls the aircraft less the further it is already banked
        let bank_factor = clamp(1.0 - roll.abs() / model.max_bank_angle, (0.0, 1.0))?;
        let mut rudder_roll = model.rudder_roll_effect * bank_factor;
        if self.on_ground {
            rudder_roll *= GROUND_RUDDER_ROLL;
        }
        self.rot_rate.z += self.rudder * rudder_roll * dt;

        self.rot_rate.x = clamp(self.rot_rate.x, (-MAX_PITCH_RATE, MAX_PITCH_RATE))?;
        self.rot_rate.y = clamp(self.rot_rate.y, (-MAX_YAW_RATE, MAX_YAW_RATE))?;
        self.rot_rate.z = clamp(self.rot_rate.z, (-MAX_ROLL_RATE, MAX_ROLL_RATE))?;

        // Pitch slows near vertical
        self.rot.x += self.rot_rate.x * (1.0 - (self.rot.x / 90.0).abs()) * dt;
        self.rot.y += self.rot_rate.y * dt;
        self.rot.z += self.rot_rate.z * dt;

        if self.stalling() {
            self.rot_rate.x += STALL_DROOP_RATE * dt;
        }

        self.rot.y = self.rot.y.rem_euclid(360.0);
        self.rot.z = self.rot.z.rem_euclid(360.0);
        self.rot.x = clamp(self.rot.x, (-90.0, 90.0))?;

        Ok(())
    }

    fn resolve_ground_contact(
        &mut self,
        dt: f64,
        env: &Environment,
        observer: &mut impl LandingObserver,
    ) {
        let ground = env.ground_height(self.pos.x, self.pos.z);
        if self.pos.y > ground {
            self.on_ground = false;
            return;
        }

        if !self.on_ground {
            self.touch_down(env, observer);
        }

        self.pos.y = ground;
        self.on_ground = true;

        if !env.is_over_runway(self.pos.x, self.pos.z) {
            let h_speed = self.vel.xz().norm();
            let friction = (1.0 - ROLLING_FRICTION * dt).max(0.0);
            self.vel.x *= friction;
            self.vel.z *= friction;
            self.damage_level +=
                SCRAPE_DAMAGE_RATE * (h_speed / SCRAPE_REFERENCE_SPEED).powi(2) * dt;
        }

        if !self.crashed() {
            self.vel.y = self.vel.y.max(0.0);
        }
    }

    /// Score the transition from air to ground and apply its consequences.
    fn touch_down(&mut self, env: &Environment, observer: &mut impl LandingObserver) {
        let touchdown = Touchdown {
            sink_rate: -self.vel.y,
            roll: normalize_angle(self.rot.z),
            pitch: self.rot.x,
            over_runway: env.is_over_runway(self.pos.x, self.pos.z),
            over_water: env.is_over_water(self.pos.x, self.pos.z),
        };

        // A wreck gliding in is not scored
        if self.disabled() {
            self.crash(
                CrashReason::from_location(touchdown.over_runway, touchdown.over_water),
                observer,
            );
            return;
        }

        let outcome = classify_landing(&touchdown);

        match outcome {
            LandingOutcome::Good => {
                info!("{}: good landing", self.model.name);
                observer.notify(FlightEvent::GoodLanding);
            }
            LandingOutcome::Hard { show_dialog } => {
                info!(
                    "{}: hard landing at {:.1} m/s sink",
                    self.model.name, touchdown.sink_rate
                );
                observer.notify(FlightEvent::HardLanding { show_dialog });
            }
            LandingOutcome::Crash {
                reason,
                damage: ImpactDamage::Lethal,
            } => {
                self.damage_level = 1.0;
                self.crash(reason, observer);
            }
            LandingOutcome::Crash {
                reason,
                damage: ImpactDamage::Partial(damage),
            } => {
                self.damage_level += damage;
                if self.damage_level >= 1.0 {
                    self.crash(reason, observer);
                } else {
                    info!(
                        "{}: heavy impact, damage now {:.0}%",
                        self.model.name,
                        self.damage_level * 100.0
                    );
                    observer.notify(FlightEvent::Crash(reason));
                }
            }
        }
    }

    /// Record a crash. The first reason sticks until reset.
    fn crash(&mut self, reason: CrashReason, observer: &mut impl LandingObserver) {
        if self.crashed() {
            return;
        }
        info!("{} {}", self.model.name, reason);
        self.crash_reason = Some(reason);
        observer.notify(FlightEvent::Crash(reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Building, BuildingPart, PlaneModel, Primitive, Runway};
    use crate::resources::FlatTerrain;
    use approx::assert_relative_eq;

    const DT_MS: f64 = 1000.0 / 60.0;

    fn runway_env(elevation: f64) -> Environment {
        Environment::new(Box::new(FlatTerrain::new(elevation)), f64::NEG_INFINITY).with_runways(
            vec![Runway {
                pos: Vector3::new(0.0, elevation, 0.0),
                length: 20_000.0,
                ..Default::default()
            }],
        )
    }

    fn descending_plane(height: f64, sink_rate: f64) -> Plane {
        let mut plane = Plane::new(Arc::new(PlaneModel::cessna_172()));
        plane.on_ground = false;
        plane.pos = Vector3::new(0.0, height, 0.0);
        plane.vel = Vector3::new(0.0, -sink_rate, -30.0);
        plane
    }

    #[test]
    fn test_gentle_touchdown_is_good_landing() {
        let env = runway_env(200.0);
        let config = FlightConfig::default();
        let mut plane = descending_plane(200.001, 0.5);
        let mut events = Vec::new();

        plane.update(DT_MS, &env, &config, &mut events).unwrap();

        assert_eq!(events, vec![FlightEvent::GoodLanding]);
        assert!(plane.on_ground);
        assert_eq!(plane.pos.y, 200.0);
        assert_eq!(plane.damage_level, 0.0);
        assert!(plane.crash_reason.is_none());
        assert!(plane.vel.y >= 0.0);
    }

    #[test]
    fn test_lethal_touchdown() {
        let env = runway_env(0.0);
        let mut plane = descending_plane(0.01, 15.0);
        let mut events = Vec::new();

        plane
            .update(DT_MS, &env, &FlightConfig::default(), &mut events)
            .unwrap();

        assert_eq!(events, vec![FlightEvent::Crash(CrashReason::Runway)]);
        assert_eq!(plane.damage_level, 1.0);
        assert_eq!(plane.crash_reason, Some(CrashReason::Runway));
        assert!(!plane.flyable());
    }

    #[test]
    fn test_landing_evaluated_once_per_touchdown() {
        let env = runway_env(0.0);
        let config = FlightConfig::default();
        let mut plane = descending_plane(0.001, 0.5);
        let mut events = Vec::new();

        for _ in 0..30 {
            plane.update(DT_MS, &env, &config, &mut events).unwrap();
        }
        assert_eq!(events, vec![FlightEvent::GoodLanding]);
    }

    #[test]
    fn test_water_touchdown_is_ocean_crash() {
        let env = Environment::new(Box::new(FlatTerrain::new(-20.0)), 0.0);
        let mut plane = descending_plane(0.001, 0.5);
        let mut events = Vec::new();

        plane
            .update(DT_MS, &env, &FlightConfig::default(), &mut events)
            .unwrap();

        assert_eq!(plane.crash_reason, Some(CrashReason::Ocean));
        assert_eq!(plane.pos.y, 0.0);
    }

    #[test]
    fn test_obstacle_strike_freezes_tick() {
        let env = Environment::default().with_buildings(vec![Building::new(
            "hangar",
            Vector3::new(0.0, 0.0, 0.0),
            vec![BuildingPart {
                offset: Vector3::new(0.0, 10.0, 0.0),
                primitive: Primitive::Cuboid {
                    l: 20.0,
                    h: 20.0,
                    w: 20.0,
                },
            }],
        )]);
        // Above the roof but inside the 4 m buffer
        let mut plane = descending_plane(22.0, 0.0);
        plane.throttle_frac = 1.0;
        let before = plane.clone();
        let mut events = Vec::new();

        let outcome = plane
            .update(DT_MS, &env, &FlightConfig::default(), &mut events)
            .unwrap();

        assert_eq!(outcome, TickOutcome::ObstacleStrike);
        assert_eq!(plane.crash_reason, Some(CrashReason::Obstacle));
        assert_eq!(plane.damage_level, 1.0);
        assert_eq!(plane.pos, before.pos);
        assert_eq!(plane.vel, before.vel);
        assert_eq!(plane.rot, before.rot);
        assert_eq!(events, vec![FlightEvent::Crash(CrashReason::Obstacle)]);

        // Still inside the buffer: no second notification, reason unchanged
        plane.update(DT_MS, &env, &FlightConfig::default(), &mut events).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_disabled_glide_to_runway_is_single_crash() {
        let env = runway_env(0.0);
        let mut plane = descending_plane(0.001, 0.5);
        plane.damage_level = 1.0;
        let mut events = Vec::new();

        plane
            .update(DT_MS, &env, &FlightConfig::default(), &mut events)
            .unwrap();

        assert_eq!(events, vec![FlightEvent::Crash(CrashReason::Runway)]);
        assert_eq!(plane.crash_reason, Some(CrashReason::Runway));
        assert!(plane.on_ground);
    }

    #[test]
    fn test_yaw_follows_bank() {
        let env = runway_env(0.0);
        let mut plane = descending_plane(1_000.0, 0.0);
        plane.vel = Vector3::new(0.0, 0.0, -50.0);
        plane.rot.z = 20.0;

        plane.update(DT_MS, &env, &FlightConfig::default(), &mut ()).unwrap();

        // Right bank turns right by sin(roll) * 30 deg/s at or above reference speed
        let dt = DT_MS / 1000.0;
        assert_relative_eq!(
            plane.yaw(),
            20f64.to_radians().sin() * ROLL_TO_YAW * dt,
            epsilon = 1e-12
        );
        assert_relative_eq!(plane.yaw(), 0.171, epsilon = 1e-3);
        // Wings level themselves
        assert!(plane.rot_rate.z < 0.0);
    }

    #[test]
    fn test_bank_turns_slower_below_reference_speed() {
        let env = runway_env(0.0);
        let mut plane = descending_plane(1_000.0, 0.0);
        plane.vel = Vector3::new(0.0, 0.0, -15.0);
        plane.rot.z = 20.0;

        plane.update(DT_MS, &env, &FlightConfig::default(), &mut ()).unwrap();

        let dt = DT_MS / 1000.0;
        let speed_factor = 15.0 / REFERENCE_SPEED;
        assert_relative_eq!(
            plane.yaw(),
            20f64.to_radians().sin() * speed_factor * ROLL_TO_YAW * dt,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_velocity_swings_towards_nose() {
        // No gravity or air, so only the realignment moves the velocity
        let config = FlightConfig {
            gravity: 0.0,
            air_density: 1e-12,
            ..Default::default()
        };
        let env = runway_env(0.0);
        let mut plane = descending_plane(1_000.0, 0.0);
        // Nose north, flying east
        plane.vel = Vector3::new(10.0, 0.0, 0.0);

        plane.update(DT_MS, &env, &config, &mut ()).unwrap();

        let dt = DT_MS / 1000.0;
        let blend = (REALIGN_RATE / (10.0 + EPSILON)).clamp(0.0, 1.0) * dt;
        assert_relative_eq!(plane.vel.x, 10.0 * (1.0 - blend), epsilon = 1e-9);
        assert_relative_eq!(plane.vel.z, -10.0 * blend, epsilon = 1e-9);
        assert_relative_eq!(plane.vel.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_overspeed_accrues_damage() {
        let env = runway_env(0.0);
        let mut plane = descending_plane(2_000.0, 0.0);
        plane.vel = Vector3::new(0.0, 0.0, -100.0);
        plane.update(DT_MS, &env, &FlightConfig::default(), &mut ()).unwrap();

        assert!(plane.overspeed());
        assert!(plane.damage_level > 0.0);
        // Disabled is not crashed while airborne
        assert!(!plane.crashed());
    }

    #[test]
    fn test_damage_reaching_one_on_ground_crashes() {
        let env = Environment::new(Box::new(FlatTerrain::new(0.0)), f64::NEG_INFINITY);
        let mut plane = Plane::new(Arc::new(PlaneModel::cessna_172()));
        plane.vel = Vector3::new(0.0, 0.0, -60.0);
        plane.damage_level = 0.999_99;
        let mut events = Vec::new();

        plane
            .update(DT_MS, &env, &FlightConfig::default(), &mut events)
            .unwrap();

        assert_eq!(plane.damage_level, 1.0);
        assert_eq!(plane.crash_reason, Some(CrashReason::Terrain));
        assert_eq!(events, vec![FlightEvent::Crash(CrashReason::Terrain)]);
    }

    #[test]
    fn test_off_runway_rolling_friction() {
        let env = Environment::new(Box::new(FlatTerrain::new(0.0)), f64::NEG_INFINITY);
        let mut on_grass = Plane::new(Arc::new(PlaneModel::cessna_172()));
        on_grass.vel = Vector3::new(0.0, 0.0, -20.0);
        let mut on_runway = on_grass.clone();

        on_grass.update(DT_MS, &env, &FlightConfig::default(), &mut ()).unwrap();
        on_runway
            .update(DT_MS, &runway_env(0.0), &FlightConfig::default(), &mut ())
            .unwrap();

        assert!(on_grass.speed() < on_runway.speed());
        assert!(on_grass.damage_level > 0.0);
        assert_eq!(on_runway.damage_level, 0.0);
    }

    #[test]
    fn test_braking_slows_the_aircraft() {
        let env = runway_env(0.0);
        let mut braking = Plane::new(Arc::new(PlaneModel::cessna_172()));
        braking.vel = Vector3::new(0.0, 0.0, -20.0);
        let mut rolling = braking.clone();
        braking.braking = true;

        braking.update(DT_MS, &env, &FlightConfig::default(), &mut ()).unwrap();
        rolling.update(DT_MS, &env, &FlightConfig::default(), &mut ()).unwrap();

        assert!(braking.speed() < rolling.speed());
    }

    #[test]
    fn test_stall_drops_the_nose() {
        let env = runway_env(0.0);
        let mut plane = descending_plane(1_000.0, 0.0);
        plane.vel = Vector3::new(0.0, -20.0, -20.0);

        plane.update(DT_MS, &env, &FlightConfig::default(), &mut ()).unwrap();

        assert!(plane.stalling());
        assert!(plane.rot_rate.x > 0.0);
    }

    #[test]
    fn test_rotation_wraps_and_clamps() {
        let env = runway_env(0.0);
        let mut plane = descending_plane(1_000.0, 0.0);
        plane.rot = Vector3::new(-89.99, 359.99, 0.0);
        plane.rot_rate = Vector3::new(-25.0, 100.0, 0.0);

        plane.update(DT_MS, &env, &FlightConfig::default(), &mut ()).unwrap();

        assert!(plane.pitch() >= -90.0);
        assert!(plane.yaw() >= 0.0 && plane.yaw() < 360.0);
        assert!(plane.yaw() < 10.0);
    }

    #[test]
    fn test_position_clamped_to_hard_limit() {
        let env = runway_env(0.0);
        let config = FlightConfig::default();
        let mut plane = descending_plane(1_000.0, 0.0);
        plane.pos.x = config.limits.hard - 0.1;
        plane.rot.y = 90.0;
        plane.vel = Vector3::new(60.0, 0.0, 0.0);

        plane.update(DT_MS, &env, &config, &mut ()).unwrap();

        assert_relative_eq!(plane.pos.x, config.limits.hard);
    }

    #[test]
    fn test_never_below_ground() {
        let terrain = |x: f64, _z: f64| 50.0 + 0.1 * x;
        let env = Environment::new(Box::new(terrain), 0.0);
        let config = FlightConfig::default();
        let mut plane = descending_plane(60.0, 30.0);

        for _ in 0..120 {
            plane.update(DT_MS, &env, &config, &mut ()).unwrap();
            assert!(plane.pos.y >= env.ground_height(plane.pos.x, plane.pos.z));
        }
    }
}
