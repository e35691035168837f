//! Physical and calendar constants

pub const SECONDS_IN_DAY: f64 = 86400.0;

/// Jupiter equatorial radius, m
pub const JUPITER_RADIUS: f64 = 7.1492e7;

/// Nominal solar radius, m
pub const SOLAR_RADIUS: f64 = 6.957e8;

/// Julian date of the WASP date-system zero point, 2004-01-01T00:00:00
pub const WASP_ZERO_POINT_JD: f64 = 2_453_005.5;
