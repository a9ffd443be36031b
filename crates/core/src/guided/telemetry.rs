//! Navigation telemetry for GCS reporting
//!
//! Waypoint and Loiter report their navigator's values. The attitude and
//! direct submodes have no path, so they report neutral values.

use super::submode::SubMode;
use super::GuidedMode;

impl<'a> GuidedMode<'a> {
    /// Bearing to the next waypoint (degrees)
    pub fn wp_bearing(&self) -> f32 {
        match self.submode {
            SubMode::Waypoint(_) => self.nav.wp_bearing_deg(),
            SubMode::Loiter => self.loiter.wp_bearing_deg(),
            _ => 0.0,
        }
    }

    /// Bearing the vehicle is being steered along (degrees)
    pub fn nav_bearing(&self) -> f32 {
        match self.submode {
            SubMode::Waypoint(_) => self.nav.nav_bearing_deg(),
            SubMode::Loiter => self.loiter.nav_bearing_deg(),
            _ => 0.0,
        }
    }

    /// Cross track error (metres)
    pub fn crosstrack_error(&self) -> f32 {
        match self.submode {
            SubMode::Waypoint(_) => self.nav.crosstrack_error(),
            SubMode::Loiter => self.loiter.crosstrack_error(),
            _ => 0.0,
        }
    }

    /// Desired lateral acceleration (m/s/s)
    pub fn desired_lat_accel(&self) -> f32 {
        match self.submode {
            SubMode::Waypoint(_) => self.nav.lat_accel(),
            SubMode::Loiter => self.loiter.desired_lat_accel(),
            _ => 0.0,
        }
    }

    /// Distance to the destination (metres)
    pub fn distance_to_destination(&self) -> f32 {
        match self.submode {
            SubMode::Waypoint(target) => target.distance_to_destination,
            SubMode::Loiter => self.loiter.distance_to_destination(),
            _ => 0.0,
        }
    }

    /// True once the vehicle has arrived
    ///
    /// Only Waypoint has a destination to reach; every other submode
    /// reports true.
    pub fn reached_destination(&self) -> bool {
        match self.submode {
            SubMode::Waypoint(_) => self.nav.reached_destination(),
            _ => true,
        }
    }
}
