//! Geographic positions and heading arithmetic
//!
//! Positions are stored as integer 1e-7 degrees (the MAVLink `*_INT`
//! convention) so that short distances keep centimetre resolution even
//! in `f32` arithmetic. Distances use the flat-earth approximation with
//! longitude scaling, which is accurate for the sub-kilometre ranges
//! guided targets and limit envelopes work with.

use libm::{cosf, sqrtf};

/// Metres per 1e-7 degree of latitude
const LOCATION_SCALING_FACTOR: f32 = 0.011_131_884;

/// Inverse of [`LOCATION_SCALING_FACTOR`]
const LOCATION_SCALING_FACTOR_INV: f32 = 89.831_52;

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// A horizontal position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Location {
    /// Latitude in 1e-7 degrees
    pub lat: i32,
    /// Longitude in 1e-7 degrees
    pub lng: i32,
}

impl Location {
    /// Create a location from 1e-7 degree integers
    pub const fn new(lat: i32, lng: i32) -> Self {
        Self { lat, lng }
    }

    /// Create a location from decimal degrees, rounded to the nearest 1e-7 degree
    pub fn from_degrees(lat_deg: f64, lng_deg: f64) -> Self {
        Self {
            lat: libm::round(lat_deg * 1e7) as i32,
            lng: libm::round(lng_deg * 1e7) as i32,
        }
    }

    /// Latitude in decimal degrees
    pub fn lat_deg(&self) -> f64 {
        self.lat as f64 / 1e7
    }

    /// Longitude in decimal degrees
    pub fn lng_deg(&self) -> f64 {
        self.lng as f64 / 1e7
    }

    /// Horizontal distance to `other` in metres
    pub fn distance_to(&self, other: &Location) -> f32 {
        let dlat = other.lat.wrapping_sub(self.lat) as f32;
        let mid_lat = ((self.lat as i64 + other.lat as i64) / 2) as i32;
        let dlng = diff_longitude(other.lng, self.lng) as f32 * longitude_scale(mid_lat);
        sqrtf(dlat * dlat + dlng * dlng) * LOCATION_SCALING_FACTOR
    }

    /// Location displaced by `north_m` / `east_m` metres
    pub fn offset(&self, north_m: f32, east_m: f32) -> Location {
        let dlat = (north_m * LOCATION_SCALING_FACTOR_INV) as i32;
        let dlng = ((east_m * LOCATION_SCALING_FACTOR_INV) / longitude_scale(self.lat)) as i32;
        Location {
            lat: self.lat.saturating_add(dlat),
            lng: wrap_longitude(self.lng as i64 + dlng as i64),
        }
    }
}

/// Ratio of longitude degree length to latitude degree length at `lat`
fn longitude_scale(lat: i32) -> f32 {
    let scale = cosf(lat as f32 * 1.0e-7 * DEG_TO_RAD);
    scale.clamp(0.01, 1.0)
}

/// Longitude difference `lon1 - lon2` across the antimeridian
fn diff_longitude(lon1: i32, lon2: i32) -> i32 {
    let dlon = lon1 as i64 - lon2 as i64;
    if dlon > 1_800_000_000 {
        (dlon - 3_600_000_000) as i32
    } else if dlon < -1_800_000_000 {
        (dlon + 3_600_000_000) as i32
    } else {
        dlon as i32
    }
}

fn wrap_longitude(lng: i64) -> i32 {
    if lng > 1_800_000_000 {
        (lng - 3_600_000_000) as i32
    } else if lng < -1_800_000_000 {
        (lng + 3_600_000_000) as i32
    } else {
        lng as i32
    }
}

/// Wrap a centi-degree angle into `[0, 36000)`
pub fn wrap_360_cd(angle_cd: f32) -> f32 {
    let mut res = libm::fmodf(angle_cd, 36000.0);
    if res < 0.0 {
        res += 36000.0;
    }
    // fmodf of a tiny negative input can round up to exactly 36000
    if res >= 36000.0 {
        res -= 36000.0;
    }
    res
}

/// Wrap a centi-degree angle into `[-18000, 18000)`
pub fn wrap_180_cd(angle_cd: f32) -> f32 {
    let res = wrap_360_cd(angle_cd);
    if res >= 18000.0 {
        res - 36000.0
    } else {
        res
    }
}
