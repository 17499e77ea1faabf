//! Simulation constants and unit-conversion tables.

/// Approximate meters per degree of separation for the mid-latitudes.
/// Not at all suitable near the poles.
pub const METERS_PER_DEGREE: f64 = 111_139.0;

/// Extra danger radius per missile radius category (meters).
pub const RADIUS_METERS_PER_CATEGORY: f64 = 2_775.0;

/// Interceptor speed by category 1-9 (meters per second of simulation
/// time). Categories outside the table clamp to the top entry.
pub const SPEED_CATEGORY_METERS: [f64; 9] = [
    24_975.0, 27_750.0, 33_300.0, 36_075.0, 38_850.0, 41_625.0, 44_400.0, 47_175.0, 49_950.0,
];

/// Default forward-prediction horizon in seconds.
pub const DEFAULT_PREDICTION_HORIZON: u32 = 1_000;

/// Default safety margin subtracted from the launch window when not
/// shooting earliest (seconds).
pub const DEFAULT_SAFETY_MARGIN_SECS: f64 = 3.0;

/// Default control loop cadence (seconds). Best effort, not strict.
pub const DEFAULT_TICK_INTERVAL_SECS: f64 = 1.0;

/// Batteries placed at region setup: one at the centroid plus this many
/// at random points inside the region.
pub const RANDOM_BATTERY_COUNT: usize = 3;

/// Convert meters to approximate degrees of separation.
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Convert approximate degrees of separation to meters.
pub fn degrees_to_meters(degrees: f64) -> f64 {
    degrees * METERS_PER_DEGREE
}

/// Interceptor speed for a 1-9 category, in meters.
pub fn speed_category_meters(category: u8) -> f64 {
    match category {
        1..=9 => SPEED_CATEGORY_METERS[(category - 1) as usize],
        _ => SPEED_CATEGORY_METERS[8],
    }
}
