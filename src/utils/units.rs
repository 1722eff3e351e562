const METRES_PER_NAUTICAL_MILE: f64 = 1_852.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const METRES_PER_FOOT: f64 = 0.3048;

/// Convert a speed in metres per second to knots
#[inline]
pub fn ms_to_knots(speed: f64) -> f64 {
    speed * SECONDS_PER_HOUR / METRES_PER_NAUTICAL_MILE
}

/// Convert a speed in knots to metres per second
#[inline]
pub fn knots_to_ms(speed: f64) -> f64 {
    speed * METRES_PER_NAUTICAL_MILE / SECONDS_PER_HOUR
}

#[inline]
pub fn metres_to_feet(distance: f64) -> f64 {
    distance / METRES_PER_FOOT
}
