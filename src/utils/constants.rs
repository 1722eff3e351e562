pub const GRAVITY: f64 = 9.8; // m/s^2
pub const AIR_DENSITY: f64 = 1.225; // kg/m^3

/// Treat anything smaller than this as zero
pub const EPSILON: f64 = 0.0001;

pub const DEFAULT_TIMESTEP_MS: f64 = 1000.0 / 60.0;

// World extent, measured from the origin along each horizontal axis
pub const HALF_WORLD_SIZE: f64 = 100_000.0; // m
pub const TRAVEL_LIMIT: f64 = HALF_WORLD_SIZE * 0.99; // m
pub const SOFT_TRAVEL_LIMIT: f64 = HALF_WORLD_SIZE * 0.95; // m

/// Reference speed used to normalise speed-dependent effects, about 60 kt
pub const REFERENCE_SPEED: f64 = 30.87; // m/s
pub const MAX_SPEED: f64 = 1_000.0; // m/s

// Rotation rate limits, deg/s
pub const MAX_PITCH_RATE: f64 = 25.0;
pub const MAX_YAW_RATE: f64 = 100.0;
pub const MAX_ROLL_RATE: f64 = 25.0;

pub const GLIDESLOPE_ANGLE: f64 = 3.0; // deg
