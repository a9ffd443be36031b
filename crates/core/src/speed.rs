//! Speed helpers shared by the attitude-target submodes
//!
//! The pilot may "nudge" a commanded speed upward by pushing the throttle
//! stick past half deflection in the direction of travel. The extra speed
//! is bounded by the vehicle's projected maximum speed, derived from the
//! cruise speed/throttle pair.

/// Upper bound on any projected vehicle speed (m/s)
const SPEED_MAX_LIMIT: f32 = 30.0;

/// Stick deflection (percent) below which no nudge is applied
const NUDGE_DEADBAND_PCT: i16 = 50;

/// Cruise calibration used for speed projection and throttle feed-forward
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CruiseConfig {
    /// Speed reached at cruise throttle (m/s)
    pub speed: f32,
    /// Throttle required to reach cruise speed (percent, 0-100)
    pub throttle_pct: f32,
    /// Explicit maximum speed (m/s), 0 = project from cruise values
    pub speed_max: f32,
}

impl Default for CruiseConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            throttle_pct: 50.0,
            speed_max: 0.0,
        }
    }
}

impl CruiseConfig {
    /// Cruise throttle as a 0-1 fraction
    pub fn throttle_fraction(&self) -> f32 {
        self.throttle_pct * 0.01
    }

    /// Projected maximum vehicle speed in m/s, limited to 30 m/s
    pub fn projected_speed_max(&self) -> f32 {
        let cruise_throttle = self.throttle_fraction();
        let speed_max = if !(0.05..=1.0).contains(&cruise_throttle) {
            self.speed
        } else if self.speed_max > 0.0 {
            self.speed_max
        } else {
            self.speed / cruise_throttle
        };
        speed_max.clamp(0.0, SPEED_MAX_LIMIT)
    }
}

/// Apply the pilot's throttle-stick nudge to `target_speed`
///
/// # Arguments
///
/// * `target_speed` - Commanded speed (m/s, negative for reverse)
/// * `reversed` - True if the vehicle is travelling backwards
/// * `pilot_throttle` - Throttle stick input (-100 to +100)
/// * `throttle_failsafe` - True while the RC/GCS throttle failsafe is active
/// * `cruise` - Cruise calibration
pub fn calc_speed_nudge(
    target_speed: f32,
    reversed: bool,
    pilot_throttle: i16,
    throttle_failsafe: bool,
    cruise: &CruiseConfig,
) -> f32 {
    if throttle_failsafe {
        return target_speed;
    }

    let pilot_throttle = pilot_throttle.clamp(-100, 100);
    if (!reversed && pilot_throttle <= NUDGE_DEADBAND_PCT)
        || (reversed && pilot_throttle >= -NUDGE_DEADBAND_PCT)
    {
        return target_speed;
    }

    if cruise.speed <= 0.0 || cruise.throttle_pct <= 0.0 {
        return target_speed;
    }

    let vehicle_speed_max = cruise.projected_speed_max();
    if libm::fabsf(target_speed) >= vehicle_speed_max {
        return target_speed;
    }

    let speed_increase_max = vehicle_speed_max - libm::fabsf(target_speed);
    let stick = pilot_throttle.unsigned_abs() as f32;
    let mut nudge = (stick - NUDGE_DEADBAND_PCT as f32) * 0.02 * speed_increase_max;
    if reversed {
        nudge = -nudge;
    }
    target_speed + nudge
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projected_speed_max_from_cruise() {
        let cruise = CruiseConfig::default();
        // 2 m/s at 50% throttle projects to 4 m/s at full throttle
        assert!((cruise.projected_speed_max() - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_projected_speed_max_explicit() {
        let cruise = CruiseConfig {
            speed_max: 3.0,
            ..CruiseConfig::default()
        };
        assert!((cruise.projected_speed_max() - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_projected_speed_max_bad_throttle_uses_cruise_speed() {
        let cruise = CruiseConfig {
            throttle_pct: 2.0,
            ..CruiseConfig::default()
        };
        assert!((cruise.projected_speed_max() - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_projected_speed_max_capped() {
        let cruise = CruiseConfig {
            speed: 20.0,
            throttle_pct: 10.0,
            speed_max: 0.0,
        };
        assert!((cruise.projected_speed_max() - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_nudge_inside_deadband() {
        let cruise = CruiseConfig::default();
        assert!((calc_speed_nudge(1.5, false, 50, false, &cruise) - 1.5).abs() < 0.001);
        assert!((calc_speed_nudge(-1.5, true, -50, false, &cruise) + 1.5).abs() < 0.001);
    }

    #[test]
    fn test_nudge_forward() {
        let cruise = CruiseConfig::default();
        // full stick: (100 - 50) * 0.02 = 1.0 of the remaining 3 m/s
        let speed = calc_speed_nudge(1.0, false, 100, false, &cruise);
        assert!((speed - 4.0).abs() < 0.001, "got {}", speed);

        let speed = calc_speed_nudge(1.0, false, 75, false, &cruise);
        assert!((speed - 2.5).abs() < 0.001, "got {}", speed);
    }

    #[test]
    fn test_nudge_reverse() {
        let cruise = CruiseConfig::default();
        let speed = calc_speed_nudge(-1.0, true, -100, false, &cruise);
        assert!((speed + 4.0).abs() < 0.001, "got {}", speed);
    }

    #[test]
    fn test_nudge_wrong_direction_ignored() {
        let cruise = CruiseConfig::default();
        // forward stick while reversing does not nudge
        let speed = calc_speed_nudge(-1.0, true, 100, false, &cruise);
        assert!((speed + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_nudge_disabled_in_failsafe() {
        let cruise = CruiseConfig::default();
        let speed = calc_speed_nudge(1.0, false, 100, true, &cruise);
        assert!((speed - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_nudge_requires_cruise_calibration() {
        let no_speed = CruiseConfig {
            speed: 0.0,
            ..CruiseConfig::default()
        };
        assert!((calc_speed_nudge(1.0, false, 100, false, &no_speed) - 1.0).abs() < 0.001);

        let no_throttle = CruiseConfig {
            throttle_pct: 0.0,
            ..CruiseConfig::default()
        };
        assert!((calc_speed_nudge(1.0, false, 100, false, &no_throttle) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_nudge_low_cruise_throttle_projects_cruise_speed() {
        // 3% cruise throttle is implausible, so the cruise speed is the max
        let cruise = CruiseConfig {
            throttle_pct: 3.0,
            ..CruiseConfig::default()
        };
        let speed = calc_speed_nudge(1.0, false, 100, false, &cruise);
        assert!((speed - 2.0).abs() < 0.001, "got {}", speed);
    }

    #[test]
    fn test_nudge_above_projected_max_unchanged() {
        let cruise = CruiseConfig::default();
        let speed = calc_speed_nudge(5.0, false, 100, false, &cruise);
        assert!((speed - 5.0).abs() < 0.001);
    }
}
