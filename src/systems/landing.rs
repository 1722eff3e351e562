use serde::{Deserialize, Serialize};

use crate::components::CrashReason;

/// Sink rate above which any touchdown is fatal [m/s]
pub const LETHAL_SINK_RATE: f64 = 12.0;
/// Sink rate absorbed by the gear without penalty [m/s]
const SAFE_SINK_RATE: f64 = 1.7;
/// Sink rate at which the sink-rate factor reaches 1 [m/s]
const FIRM_SINK_RATE: f64 = 4.0;

const ROLL_REFERENCE: f64 = 8.0; // deg
const ROLL_FACTOR_CAP: f64 = 3.0;
const PITCH_REFERENCE: f64 = 12.0; // deg
const PITCH_FACTOR_CAP: f64 = 2.0;

const SINK_WEIGHT: f64 = 0.6;
const ROLL_WEIGHT: f64 = 0.25;
const PITCH_WEIGHT: f64 = 0.15;

const NOSE_UP_PENALTY: f64 = 0.02; // per degree beyond the pitch reference
const NOSE_DOWN_PENALTY: f64 = 0.04;

pub const GOOD_LANDING_SEVERITY: f64 = 0.25;
pub const HARD_LANDING_SEVERITY: f64 = 0.6;

/// Kinematics and context at the instant of ground contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touchdown {
    /// Downward speed, `-vel.y` [m/s]
    pub sink_rate: f64,
    /// [deg], normalised to [-180, 180)
    pub roll: f64,
    /// [deg], positive nose down
    pub pitch: f64,
    pub over_runway: bool,
    pub over_water: bool,
}

impl Touchdown {
    /// Severity score of a survivable touchdown; 0 is perfect.
    pub fn impact_severity(&self) -> f64 {
        let vs_factor = ((self.sink_rate - SAFE_SINK_RATE) / (FIRM_SINK_RATE - SAFE_SINK_RATE))
            .max(0.0)
            .powi(2);
        let roll_factor = (self.roll.abs() / ROLL_REFERENCE).min(ROLL_FACTOR_CAP);
        let pitch_factor = (self.pitch.abs() / PITCH_REFERENCE).min(PITCH_FACTOR_CAP);

        let mut severity =
            SINK_WEIGHT * vs_factor + ROLL_WEIGHT * roll_factor + PITCH_WEIGHT * pitch_factor;

        // Nose-down contact is penalised twice as steeply as a tail strike
        let visual_pitch = -self.pitch;
        if visual_pitch > PITCH_REFERENCE {
            severity *= 1.0 + NOSE_UP_PENALTY * (visual_pitch - PITCH_REFERENCE);
        } else if visual_pitch < -PITCH_REFERENCE {
            severity *= 1.0 + NOSE_DOWN_PENALTY * (-PITCH_REFERENCE - visual_pitch);
        }

        severity
    }

    fn crash_reason(&self) -> CrashReason {
        CrashReason::from_location(self.over_runway, self.over_water)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImpactDamage {
    /// Aircraft destroyed outright
    Lethal,
    /// Damage added to the current level
    Partial(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LandingOutcome {
    Good,
    Hard { show_dialog: bool },
    Crash {
        reason: CrashReason,
        damage: ImpactDamage,
    },
}

impl LandingOutcome {
    pub fn event(&self) -> FlightEvent {
        match *self {
            LandingOutcome::Good => FlightEvent::GoodLanding,
            LandingOutcome::Hard { show_dialog } => FlightEvent::HardLanding { show_dialog },
            LandingOutcome::Crash { reason, .. } => FlightEvent::Crash(reason),
        }
    }
}

/// Classify a touchdown. Pure: the same touchdown always yields the same outcome.
pub fn classify_landing(touchdown: &Touchdown) -> LandingOutcome {
    if touchdown.sink_rate > LETHAL_SINK_RATE || touchdown.over_water {
        return LandingOutcome::Crash {
            reason: touchdown.crash_reason(),
            damage: ImpactDamage::Lethal,
        };
    }

    let severity = touchdown.impact_severity();
    if severity <= GOOD_LANDING_SEVERITY {
        if touchdown.over_runway {
            LandingOutcome::Good
        } else {
            // Rough-field touchdowns are not remarked upon
            LandingOutcome::Hard { show_dialog: false }
        }
    } else if severity <= HARD_LANDING_SEVERITY {
        LandingOutcome::Hard {
            show_dialog: touchdown.over_runway,
        }
    } else {
        LandingOutcome::Crash {
            reason: touchdown.crash_reason(),
            damage: ImpactDamage::Partial(severity - HARD_LANDING_SEVERITY),
        }
    }
}

/// Notifications for the audio and dialog layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlightEvent {
    GoodLanding,
    HardLanding { show_dialog: bool },
    Crash(CrashReason),
}

/// Receives flight events as they happen during a tick.
pub trait LandingObserver {
    fn notify(&mut self, event: FlightEvent);
}

impl LandingObserver for Vec<FlightEvent> {
    fn notify(&mut self, event: FlightEvent) {
        self.push(event);
    }
}

/// Discards every event
impl LandingObserver for () {
    fn notify(&mut self, _event: FlightEvent) {}
}
