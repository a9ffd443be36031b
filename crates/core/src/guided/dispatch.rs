//! Per-period submode execution

use super::submode::{SubMode, WaypointTarget};
use super::GuidedMode;
use crate::collaborators::Severity;
use crate::speed::calc_speed_nudge;

/// Actuator steering range in centi-degrees for a normalised output of 1.0
const STEERING_SCALE_CD: f32 = 4500.0;

/// Throttle percentage for a normalised output of 1.0
const THROTTLE_SCALE_PCT: f32 = 100.0;

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

impl<'a> GuidedMode<'a> {
    /// Run the active submode for one control period
    ///
    /// Called from the control loop at a fixed rate. Target expiry is
    /// checked here, so it is detected at most one period late.
    pub fn tick(&mut self) {
        let now_ms = self.clock.now_ms();

        match self.submode {
            SubMode::Waypoint(target) => self.update_waypoint(target),

            SubMode::HeadingAndSpeed(mut target) => {
                if target.stamp.expire_if_stale(now_ms) {
                    self.warn_target_timeout();
                }
                if target.stamp.is_valid() {
                    self.calc_steering_to_heading(target.yaw_cd);
                    let speed = self.speed_nudge(target.speed, target.speed < 0.0);
                    self.calc_throttle(speed);
                } else {
                    self.loiter_or_stop();
                }
            }

            SubMode::TurnRateAndSpeed(mut target) => {
                if target.stamp.expire_if_stale(now_ms) {
                    self.warn_target_timeout();
                }
                if target.stamp.is_valid() {
                    self.calc_steering_from_turn_rate(target.rate_cds * 0.01 * DEG_TO_RAD);
                    let speed = self.speed_nudge(target.speed, target.speed < 0.0);
                    self.calc_throttle(speed);
                } else {
                    self.loiter_or_stop();
                }
            }

            SubMode::Loiter => self.loiter.update(),

            SubMode::SteeringAndThrottle(mut target) => {
                if target.stamp.expire_if_stale(now_ms) {
                    self.warn_target_timeout();
                }
                if target.stamp.is_valid() {
                    self.motors
                        .set_steering(target.steering * STEERING_SCALE_CD, false);
                    self.motors
                        .set_throttle(target.throttle * THROTTLE_SCALE_PCT);
                } else {
                    self.loiter_or_stop();
                }
            }

            SubMode::Stop => self.stop_vehicle(),
        }
    }

    fn update_waypoint(&mut self, mut target: WaypointTarget) {
        if let Some(current) = self.vehicle.current_location() {
            target.distance_to_destination = current.distance_to(&self.nav.destination());
        }

        if !self.nav.reached_destination() {
            self.submode = SubMode::Waypoint(target);
            self.navigate_to_waypoint();
            return;
        }

        if target.send_notification {
            target.send_notification = false;
            self.gcs.send_mission_item_reached(0);
            crate::log_info!(
                "Guided: destination reached ({} m)",
                target.distance_to_destination
            );
        }
        self.submode = SubMode::Waypoint(target);

        self.loiter_or_stop();
    }

    fn navigate_to_waypoint(&mut self) {
        self.nav.update(self.dt);

        let speed = self.speed_nudge(self.nav.desired_speed(), self.nav.reversed());
        self.calc_throttle(speed);

        let turn_rate_rads = self.nav.turn_rate_rads();
        self.calc_steering_from_turn_rate(turn_rate_rads);
    }

    fn warn_target_timeout(&mut self) {
        crate::log_warn!("Guided: target not received last 3secs, stopping");
        self.gcs
            .send_text(Severity::Warning, "target not received last 3secs, stopping");
    }

    /// Hold position: boats loiter if they can, everything else enters Stop
    pub(super) fn loiter_or_stop(&mut self) {
        if self.vehicle.is_boat() && self.start_loiter() {
            return;
        }
        self.start_stop();
        self.stop_vehicle();
    }

    /// Switch to the Loiter submode if loiter mode accepts entry
    pub(super) fn start_loiter(&mut self) -> bool {
        match self.loiter.enter() {
            Ok(()) => {
                self.set_submode(SubMode::Loiter);
                true
            }
            Err(_reason) => {
                crate::log_debug!("Guided: loiter unavailable: {}", _reason);
                false
            }
        }
    }

    pub(super) fn start_stop(&mut self) {
        self.set_submode(SubMode::Stop);
    }

    /// Command the motors to bring the vehicle to rest
    pub(super) fn stop_vehicle(&mut self) {
        let limits = self.motors.limits();
        let throttle = self
            .attitude
            .throttle_out_stop(limits, &self.params.cruise, self.dt);
        self.motors.set_throttle(throttle * THROTTLE_SCALE_PCT);
        self.motors.set_steering(0.0, false);
    }

    fn speed_nudge(&self, target_speed: f32, reversed: bool) -> f32 {
        calc_speed_nudge(
            target_speed,
            reversed,
            self.vehicle.pilot_throttle(),
            self.vehicle.throttle_failsafe(),
            &self.params.cruise,
        )
    }

    fn calc_throttle(&mut self, target_speed: f32) {
        let limits = self.motors.limits();
        let speed = self
            .attitude
            .desired_speed_accel_limited(target_speed, self.dt);

        let throttle = if libm::fabsf(speed) < f32::EPSILON {
            self.attitude
                .throttle_out_stop(limits, &self.params.cruise, self.dt)
        } else {
            self.attitude
                .throttle_out_speed(speed, limits, &self.params.cruise, self.dt)
        };
        self.motors.set_throttle(throttle * THROTTLE_SCALE_PCT);
    }

    fn calc_steering_to_heading(&mut self, yaw_cd: f32) {
        let limits = self.motors.limits();
        let steering =
            self.attitude
                .steering_out_heading(yaw_cd * 0.01 * DEG_TO_RAD, 0.0, limits, self.dt);
        self.motors.set_steering(steering * STEERING_SCALE_CD, true);
    }

    fn calc_steering_from_turn_rate(&mut self, rate_rads: f32) {
        let limits = self.motors.limits();
        let steering = self.attitude.steering_out_rate(rate_rads, limits, self.dt);
        self.motors.set_steering(steering * STEERING_SCALE_CD, true);
    }
}
