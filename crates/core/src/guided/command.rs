//! Command ingestion
//!
//! Each setter switches the submode and replaces its target in one step.
//! Streamed targets are stamped with the shared clock so the dispatcher can
//! expire them.

use super::submode::{
    HeadingTarget, SteeringThrottleTarget, SubMode, TargetStamp, TurnRateTarget, WaypointTarget,
};
use super::GuidedMode;
use crate::collaborators::GuidedTargetRecord;
use crate::error::GuidedError;
use crate::location::{wrap_180_cd, Location};

/// Clamp a normalised actuator command, treating NaN as neutral
fn sanitize_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

impl<'a> GuidedMode<'a> {
    /// Drive to `destination`, optionally blending toward `next_destination`
    ///
    /// On rejection by the navigator the active submode and target are left
    /// untouched.
    pub fn set_desired_location(
        &mut self,
        destination: Location,
        next_destination: Option<Location>,
    ) -> Result<(), GuidedError> {
        let strategy = self.params.nav_strategy();
        self.nav
            .set_desired_location(destination, next_destination, strategy)
            .map_err(|reason| {
                crate::log_warn!("Guided: destination rejected: {}", reason);
                GuidedError::DestinationRejected { reason }
            })?;

        let distance_to_destination = self
            .vehicle
            .current_location()
            .map(|current| current.distance_to(&destination))
            .unwrap_or(0.0);

        self.set_submode(SubMode::Waypoint(WaypointTarget {
            distance_to_destination,
            send_notification: true,
        }));

        let speed_max = self.nav.speed_max();
        self.write_target(
            [destination.lat as f32, destination.lng as f32, 0.0],
            [speed_max, 0.0, 0.0],
        );
        crate::log_debug!(
            "Guided: destination {} {} ({} m)",
            destination.lat,
            destination.lng,
            distance_to_destination
        );
        Ok(())
    }

    /// Hold `yaw_cd` (centi-degrees) at `speed` (m/s)
    pub fn set_desired_heading_and_speed(&mut self, yaw_cd: f32, speed: f32) {
        let stamp = TargetStamp::new(self.clock.now_ms());
        self.set_submode(SubMode::HeadingAndSpeed(HeadingTarget {
            yaw_cd,
            speed,
            stamp,
        }));

        self.write_target([yaw_cd, 0.0, 0.0], [speed, 0.0, 0.0]);
        crate::log_debug!("Guided: heading {} cd at {} m/s", yaw_cd, speed);
    }

    /// Adjust the heading target by `yaw_delta_cd` and set `speed`
    ///
    /// The delta is applied to the current heading target when one exists,
    /// otherwise to the vehicle's heading.
    pub fn set_desired_heading_delta_and_speed(&mut self, yaw_delta_cd: f32, speed: f32) {
        let base_cd = match self.submode {
            SubMode::HeadingAndSpeed(target) => target.yaw_cd,
            _ => self.vehicle.yaw_cd(),
        };
        self.set_desired_heading_and_speed(wrap_180_cd(base_cd + yaw_delta_cd), speed);
    }

    /// Turn at `turn_rate_cds` (centi-degrees/s) at `speed` (m/s)
    pub fn set_desired_turn_rate_and_speed(&mut self, turn_rate_cds: f32, speed: f32) {
        let stamp = TargetStamp::new(self.clock.now_ms());
        self.set_submode(SubMode::TurnRateAndSpeed(TurnRateTarget {
            rate_cds: turn_rate_cds,
            speed,
            stamp,
        }));

        self.write_target([turn_rate_cds, 0.0, 0.0], [speed, 0.0, 0.0]);
        crate::log_debug!("Guided: turn rate {} cd/s at {} m/s", turn_rate_cds, speed);
    }

    /// Pass `steering` and `throttle` (both -1.0 to +1.0) to the motors
    ///
    /// Out-of-range inputs are clamped.
    pub fn set_steering_and_throttle(&mut self, steering: f32, throttle: f32) {
        let steering = sanitize_unit(steering);
        let throttle = sanitize_unit(throttle);
        let stamp = TargetStamp::new(self.clock.now_ms());
        self.set_submode(SubMode::SteeringAndThrottle(SteeringThrottleTarget {
            steering,
            throttle,
            stamp,
        }));

        self.write_target([steering, throttle, 0.0], [0.0, 0.0, 0.0]);
        crate::log_debug!("Guided: steering {} throttle {}", steering, throttle);
    }

    /// Set the speed for the active submode (m/s)
    ///
    /// Only Waypoint and Loiter accept a speed change; the attitude submodes
    /// carry their speed in the target itself.
    pub fn set_desired_speed(&mut self, speed: f32) -> Result<(), GuidedError> {
        match self.submode {
            SubMode::Waypoint(_) => self
                .nav
                .set_speed_max(speed)
                .map_err(|reason| GuidedError::SpeedRejected { reason }),
            SubMode::Loiter => self
                .loiter
                .set_desired_speed(speed)
                .map_err(|reason| GuidedError::SpeedRejected { reason }),
            SubMode::HeadingAndSpeed(_)
            | SubMode::TurnRateAndSpeed(_)
            | SubMode::SteeringAndThrottle(_)
            | SubMode::Stop => Err(GuidedError::Unsupported {
                operation: "set_desired_speed",
                submode: self.submode.kind(),
            }),
        }
    }

    /// Destination the vehicle is driving to, if the submode has one
    pub fn desired_location(&self) -> Option<Location> {
        match self.submode {
            SubMode::Waypoint(_) => {
                if self.nav.is_destination_valid() {
                    Some(self.nav.oa_destination())
                } else {
                    None
                }
            }
            SubMode::Loiter => self.loiter.desired_location(),
            SubMode::HeadingAndSpeed(_)
            | SubMode::TurnRateAndSpeed(_)
            | SubMode::SteeringAndThrottle(_)
            | SubMode::Stop => None,
        }
    }

    fn write_target(&mut self, pos_target: [f32; 3], vel_target: [f32; 3]) {
        let record = GuidedTargetRecord {
            submode: self.submode.kind(),
            pos_target,
            vel_target,
        };
        self.logger.write_guided_target(&record);
    }
}
