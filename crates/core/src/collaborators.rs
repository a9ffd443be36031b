//! Collaborator interfaces consumed by the guided core
//!
//! Everything outside the guided state machine (waypoint navigation,
//! loiter mode, attitude controller, motor output, vehicle state, GCS
//! messaging and onboard target logging) is reached through these traits.
//! Implementations are injected into [`GuidedMode`](crate::guided::GuidedMode)
//! at construction time, so the core can be exercised on the host with
//! recording mocks.
//!
//! All calls are expected to be non-blocking and bounded in time; they are
//! made synchronously from the 50 Hz control loop.

use bitflags::bitflags;

use crate::guided::SubModeKind;
use crate::location::Location;
use crate::speed::CruiseConfig;

/// Path generation strategy used by the waypoint navigator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavStrategy {
    /// S-curve path planning; supports object avoidance, slow to re-target
    SCurves,
    /// Position controller input shaping; fast re-targeting, no avoidance
    PositionControl,
}

/// Waypoint navigation library
pub trait WaypointNavigator {
    /// Reset the navigator on guided mode entry
    fn init(&mut self);

    /// Set a new destination
    ///
    /// Returns `Err` if the destination is rejected for `strategy`
    /// (e.g. invalid position or EKF origin not set).
    fn set_desired_location(
        &mut self,
        destination: Location,
        next_destination: Option<Location>,
        strategy: NavStrategy,
    ) -> Result<(), &'static str>;

    /// Advance the path by one control period
    fn update(&mut self, dt: f32);

    /// True once the vehicle has reached or passed the destination
    fn reached_destination(&self) -> bool;

    /// Current destination
    fn destination(&self) -> Location;

    /// Destination adjusted by object avoidance
    fn oa_destination(&self) -> Location;

    /// True if a destination has been accepted
    fn is_destination_valid(&self) -> bool;

    /// Cap the navigation speed (m/s)
    fn set_speed_max(&mut self, speed: f32) -> Result<(), &'static str>;

    /// Current navigation speed cap (m/s)
    fn speed_max(&self) -> f32;

    /// Desired speed along the path for this period (m/s)
    fn desired_speed(&self) -> f32;

    /// True if the path is being driven backwards
    fn reversed(&self) -> bool;

    /// Desired turn rate for this period (rad/s)
    fn turn_rate_rads(&self) -> f32;

    /// Bearing to the next waypoint (degrees)
    fn wp_bearing_deg(&self) -> f32;

    /// Bearing the vehicle is being steered along (degrees)
    fn nav_bearing_deg(&self) -> f32;

    /// Cross track error (metres)
    fn crosstrack_error(&self) -> f32;

    /// Desired lateral acceleration (m/s/s)
    fn lat_accel(&self) -> f32;
}

/// Loiter mode, used as the safe hold for boats
pub trait LoiterMode {
    /// Try to start loitering at the current position
    fn enter(&mut self) -> Result<(), &'static str>;

    /// Run one loiter control period
    fn update(&mut self);

    /// Set the loiter reposition speed (m/s)
    fn set_desired_speed(&mut self, speed: f32) -> Result<(), &'static str>;

    /// Current loiter point, if one is set
    fn desired_location(&self) -> Option<Location>;

    /// Bearing to the loiter point (degrees)
    fn wp_bearing_deg(&self) -> f32;

    /// Bearing the vehicle is being steered along (degrees)
    fn nav_bearing_deg(&self) -> f32;

    /// Cross track error (metres)
    fn crosstrack_error(&self) -> f32;

    /// Desired lateral acceleration (m/s/s)
    fn desired_lat_accel(&self) -> f32;

    /// Distance to the loiter point (metres)
    fn distance_to_destination(&self) -> f32;
}

bitflags! {
    /// Actuator saturation flags reported by the motor layer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MotorLimits: u8 {
        /// Steering is at its left limit
        const STEER_LEFT = 0b0001;
        /// Steering is at its right limit
        const STEER_RIGHT = 0b0010;
        /// Throttle is at its lower limit
        const THROTTLE_LOWER = 0b0100;
        /// Throttle is at its upper limit
        const THROTTLE_UPPER = 0b1000;
    }
}

/// Steering and speed controllers
///
/// Steering outputs are normalised to -1.0..=1.0, throttle outputs to
/// -1.0..=1.0. The guided core scales them to actuator units.
pub trait AttitudeController {
    /// Steering required to hold `heading_rad`
    ///
    /// `rate_max_rads` of 0 uses the controller's default turn rate limit.
    fn steering_out_heading(
        &mut self,
        heading_rad: f32,
        rate_max_rads: f32,
        limits: MotorLimits,
        dt: f32,
    ) -> f32;

    /// Steering required to achieve `rate_rads`
    fn steering_out_rate(&mut self, rate_rads: f32, limits: MotorLimits, dt: f32) -> f32;

    /// Target speed after applying the acceleration limit
    fn desired_speed_accel_limited(&mut self, speed: f32, dt: f32) -> f32;

    /// Throttle required to achieve `speed`
    fn throttle_out_speed(
        &mut self,
        speed: f32,
        limits: MotorLimits,
        cruise: &CruiseConfig,
        dt: f32,
    ) -> f32;

    /// Throttle required to bring the vehicle to a stop
    fn throttle_out_stop(&mut self, limits: MotorLimits, cruise: &CruiseConfig, dt: f32) -> f32;
}

/// Motor and servo output layer
pub trait MotorOutput {
    /// Set steering in centi-degree units (-4500 to +4500)
    ///
    /// `apply_scaling` enables speed-dependent steering scaling; direct
    /// commands pass `false`.
    fn set_steering(&mut self, steering: f32, apply_scaling: bool);

    /// Set throttle in percent (-100 to +100)
    fn set_throttle(&mut self, throttle_pct: f32);

    /// Current actuator saturation flags
    fn limits(&self) -> MotorLimits;
}

/// Vehicle-level state consulted by the guided core
pub trait VehicleState {
    /// True if the frame is a boat (able to hold position by loitering)
    fn is_boat(&self) -> bool;

    /// Current position estimate, if available
    fn current_location(&self) -> Option<Location>;

    /// Current heading in centi-degrees (0 to 36000)
    fn yaw_cd(&self) -> f32;

    /// Pilot throttle stick input (-100 to +100)
    fn pilot_throttle(&self) -> i16;

    /// True while the RC/GCS throttle failsafe is active
    fn throttle_failsafe(&self) -> bool;
}

/// Status text severity (MAV_SEVERITY)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

/// Ground station messaging
///
/// Fire-and-forget: delivery failures are not reported back.
pub trait GcsNotifier {
    /// Send a STATUSTEXT
    fn send_text(&mut self, severity: Severity, text: &str);

    /// Send MISSION_ITEM_REACHED for `seq`
    fn send_mission_item_reached(&mut self, seq: u16);
}

/// Guided target record for the onboard log
///
/// Field meaning depends on the submode: position target holds
/// (lat, lng, 0) for waypoints, (yaw cd, 0, 0) or (rate cd/s, 0, 0) for
/// attitude targets and (steering, throttle, 0) for direct commands. The
/// velocity target holds the speed in its first element.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GuidedTargetRecord {
    /// Submode the target belongs to
    pub submode: SubModeKind,
    /// Position-like target
    pub pos_target: [f32; 3],
    /// Velocity-like target
    pub vel_target: [f32; 3],
}

/// Onboard log writer
pub trait TargetLogger {
    /// Record a newly accepted guided target
    fn write_guided_target(&mut self, record: &GuidedTargetRecord);
}
