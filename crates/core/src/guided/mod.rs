//! Guided Mode
//!
//! Externally commanded driving for rovers and boats. A GCS, companion
//! computer or an overseeing Auto mode selects one of six submodes by
//! sending a command; the guided core then drives that submode every
//! control period until another command supersedes it.
//!
//! # Submodes
//!
//! - **Waypoint**: drive to a destination with the waypoint navigator
//! - **HeadingAndSpeed**: hold a heading at a speed (streamed, 3 s timeout)
//! - **TurnRateAndSpeed**: turn at a rate at a speed (streamed, 3 s timeout)
//! - **Loiter**: hold position with loiter mode
//! - **SteeringAndThrottle**: direct actuator commands (streamed, 3 s timeout)
//! - **Stop**: stop as quickly as possible
//!
//! When a streamed target expires, or a waypoint is reached, the vehicle
//! holds position: boats try to loiter, everything else stops.
//!
//! # Limits
//!
//! An optional time/distance envelope ([`LimitEnvelope`]) is tracked for
//! the supervising mode, which polls [`GuidedMode::limit_breached`].
//!
//! # References
//!
//! - ArduPilot Guided Mode: https://ardupilot.org/rover/docs/guided-mode.html

mod command;
mod dispatch;
mod limit;
mod submode;
mod telemetry;

#[cfg(test)]
mod test_support;

pub use limit::LimitEnvelope;
pub use submode::{
    HeadingTarget, SteeringThrottleTarget, SubMode, SubModeKind, TargetStamp, TurnRateTarget,
    WaypointTarget, TARGET_TIMEOUT_MS,
};

use crate::collaborators::{
    AttitudeController, GcsNotifier, LoiterMode, MotorOutput, TargetLogger, VehicleState,
    WaypointNavigator,
};
use crate::mode::Mode;
use crate::parameters::GuidedParams;
use crate::traits::TimeSource;

/// Control period assumed until the mode manager reports one (50 Hz)
const DEFAULT_DT: f32 = 0.02;

/// Collaborators injected into [`GuidedMode`]
pub struct GuidedDeps<'a> {
    /// Waypoint navigation library
    pub nav: &'a mut dyn WaypointNavigator,
    /// Loiter mode used for position holding
    pub loiter: &'a mut dyn LoiterMode,
    /// Steering and speed controllers
    pub attitude: &'a mut dyn AttitudeController,
    /// Motor output layer
    pub motors: &'a mut dyn MotorOutput,
    /// Vehicle class, position and pilot input
    pub vehicle: &'a dyn VehicleState,
    /// Ground station messaging
    pub gcs: &'a mut dyn GcsNotifier,
    /// Onboard target log
    pub logger: &'a mut dyn TargetLogger,
    /// Monotonic clock shared with command timestamping
    pub clock: &'a dyn TimeSource,
}

/// Guided Mode
pub struct GuidedMode<'a> {
    nav: &'a mut dyn WaypointNavigator,
    loiter: &'a mut dyn LoiterMode,
    attitude: &'a mut dyn AttitudeController,
    motors: &'a mut dyn MotorOutput,
    vehicle: &'a dyn VehicleState,
    gcs: &'a mut dyn GcsNotifier,
    logger: &'a mut dyn TargetLogger,
    clock: &'a dyn TimeSource,
    params: GuidedParams,
    /// Active submode and its target
    submode: SubMode,
    limit: LimitEnvelope,
    /// Control period (seconds)
    dt: f32,
}

impl<'a> GuidedMode<'a> {
    /// Create Guided mode
    ///
    /// The mode starts in `Stop` until [`Mode::enter`] picks the initial
    /// submode.
    pub fn new(deps: GuidedDeps<'a>, params: GuidedParams) -> Self {
        Self {
            nav: deps.nav,
            loiter: deps.loiter,
            attitude: deps.attitude,
            motors: deps.motors,
            vehicle: deps.vehicle,
            gcs: deps.gcs,
            logger: deps.logger,
            clock: deps.clock,
            params,
            submode: SubMode::Stop,
            limit: LimitEnvelope::new(),
            dt: DEFAULT_DT,
        }
    }

    /// Active submode with its target
    pub fn submode(&self) -> &SubMode {
        &self.submode
    }

    /// Active submode tag
    pub fn submode_kind(&self) -> SubModeKind {
        self.submode.kind()
    }

    /// Current parameters
    pub fn params(&self) -> &GuidedParams {
        &self.params
    }

    /// Replace parameters (e.g. after a GCS parameter change)
    pub fn set_params(&mut self, params: GuidedParams) {
        self.params = params;
    }

    /// Configure the limit envelope. Zero or negative values disable a limit.
    pub fn limit_set(&mut self, timeout_ms: u32, horiz_max: f32) {
        self.limit.set(timeout_ms, horiz_max);
    }

    /// Disable both limits
    pub fn limit_clear(&mut self) {
        self.limit.clear();
    }

    /// Arm the limit envelope at the current time and position
    ///
    /// Only the supervising mode calls this; guided never arms it itself.
    pub fn limit_init_time_and_location(&mut self) {
        let now_ms = self.clock.now_ms();
        let location = self.vehicle.current_location();
        if location.is_none() {
            crate::log_warn!("Guided: limit armed without position, distance limit inactive");
        }
        self.limit.arm(now_ms, location);
    }

    /// True if the armed limit envelope has been exceeded
    pub fn limit_breached(&self) -> bool {
        self.limit
            .is_breached(self.clock.now_ms(), self.vehicle.current_location())
    }

    /// Limit envelope state
    pub fn limit(&self) -> &LimitEnvelope {
        &self.limit
    }

    /// Switch submode, logging tag changes
    fn set_submode(&mut self, submode: SubMode) {
        let old = self.submode.kind();
        let new = submode.kind();
        self.submode = submode;
        if old != new {
            crate::log_info!("Guided: submode {} -> {}", old.name(), new.name());
        }
    }
}

impl<'a> Mode for GuidedMode<'a> {
    fn enter(&mut self) -> Result<(), &'static str> {
        // Initial submode: boats hold position, everything else stops
        if !(self.vehicle.is_boat() && self.start_loiter()) {
            self.start_stop();
        }

        self.nav.init();

        crate::log_info!("Guided mode entered ({})", self.submode.kind().name());
        Ok(())
    }

    fn update(&mut self, dt: f32) -> Result<(), &'static str> {
        if dt > 0.0 {
            self.dt = dt;
        }
        self.tick();
        Ok(())
    }

    fn exit(&mut self) -> Result<(), &'static str> {
        crate::log_info!("Exiting Guided mode");
        self.stop_vehicle();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Guided"
    }
}
