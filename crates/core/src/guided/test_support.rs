//! Recording collaborators for guided mode tests
//!
//! Every mock shares one [`Record`], so a test can script collaborator
//! responses and inspect the calls made to them through a single handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{GuidedDeps, GuidedMode};
use crate::collaborators::{
    AttitudeController, GcsNotifier, GuidedTargetRecord, LoiterMode, MotorLimits, MotorOutput,
    NavStrategy, Severity, TargetLogger, VehicleState, WaypointNavigator,
};
use crate::location::Location;
use crate::parameters::GuidedParams;
use crate::speed::CruiseConfig;
use crate::traits::MockTime;

/// Scripted responses and recorded calls
#[derive(Debug)]
pub struct Record {
    // Navigator
    pub nav_accept: bool,
    pub nav_speed_ok: bool,
    pub nav_reached: bool,
    pub nav_destination: Option<Location>,
    pub nav_next: Option<Location>,
    pub nav_strategy: Option<NavStrategy>,
    pub nav_oa_destination: Option<Location>,
    pub nav_speed_max: f32,
    pub nav_speed: f32,
    pub nav_turn_rate: f32,
    pub nav_wp_bearing: f32,
    pub nav_nav_bearing: f32,
    pub nav_xtrack: f32,
    pub nav_lat_accel: f32,
    pub nav_init_calls: usize,
    pub nav_update_calls: usize,

    // Loiter
    pub loiter_enter_ok: bool,
    pub loiter_enter_calls: usize,
    pub loiter_update_calls: usize,
    pub loiter_speed: Option<f32>,
    pub loiter_distance: f32,
    pub loiter_point: Option<Location>,

    // Attitude controller
    pub heading_requests: Vec<f32>,
    pub rate_requests: Vec<f32>,
    pub speed_requests: Vec<f32>,
    pub stop_requests: usize,
    pub last_dt: Option<f32>,

    // Motors
    pub steering: Vec<(f32, bool)>,
    pub throttle: Vec<f32>,

    // GCS and log
    pub texts: Vec<(Severity, String)>,
    pub reached: Vec<u16>,
    pub targets: Vec<GuidedTargetRecord>,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            nav_accept: true,
            nav_speed_ok: true,
            nav_reached: false,
            nav_destination: None,
            nav_next: None,
            nav_strategy: None,
            nav_oa_destination: None,
            nav_speed_max: 2.0,
            nav_speed: 1.0,
            nav_turn_rate: 0.0,
            nav_wp_bearing: 0.0,
            nav_nav_bearing: 0.0,
            nav_xtrack: 0.0,
            nav_lat_accel: 0.0,
            nav_init_calls: 0,
            nav_update_calls: 0,
            loiter_enter_ok: true,
            loiter_enter_calls: 0,
            loiter_update_calls: 0,
            loiter_speed: None,
            loiter_distance: 0.0,
            loiter_point: None,
            heading_requests: Vec::new(),
            rate_requests: Vec::new(),
            speed_requests: Vec::new(),
            stop_requests: 0,
            last_dt: None,
            steering: Vec::new(),
            throttle: Vec::new(),
            texts: Vec::new(),
            reached: Vec::new(),
            targets: Vec::new(),
        }
    }
}

type Shared = Rc<RefCell<Record>>;

pub struct MockNav(Shared);

impl WaypointNavigator for MockNav {
    fn init(&mut self) {
        self.0.borrow_mut().nav_init_calls += 1;
    }

    fn set_desired_location(
        &mut self,
        destination: Location,
        next_destination: Option<Location>,
        strategy: NavStrategy,
    ) -> Result<(), &'static str> {
        let mut rec = self.0.borrow_mut();
        rec.nav_strategy = Some(strategy);
        if !rec.nav_accept {
            return Err("origin not set");
        }
        rec.nav_destination = Some(destination);
        rec.nav_next = next_destination;
        Ok(())
    }

    fn update(&mut self, _dt: f32) {
        self.0.borrow_mut().nav_update_calls += 1;
    }

    fn reached_destination(&self) -> bool {
        self.0.borrow().nav_reached
    }

    fn destination(&self) -> Location {
        self.0.borrow().nav_destination.unwrap_or_default()
    }

    fn oa_destination(&self) -> Location {
        let rec = self.0.borrow();
        rec.nav_oa_destination
            .or(rec.nav_destination)
            .unwrap_or_default()
    }

    fn is_destination_valid(&self) -> bool {
        self.0.borrow().nav_destination.is_some()
    }

    fn set_speed_max(&mut self, speed: f32) -> Result<(), &'static str> {
        let mut rec = self.0.borrow_mut();
        if !rec.nav_speed_ok {
            return Err("speed out of range");
        }
        rec.nav_speed_max = speed;
        Ok(())
    }

    fn speed_max(&self) -> f32 {
        self.0.borrow().nav_speed_max
    }

    fn desired_speed(&self) -> f32 {
        self.0.borrow().nav_speed
    }

    fn reversed(&self) -> bool {
        self.0.borrow().nav_speed < 0.0
    }

    fn turn_rate_rads(&self) -> f32 {
        self.0.borrow().nav_turn_rate
    }

    fn wp_bearing_deg(&self) -> f32 {
        self.0.borrow().nav_wp_bearing
    }

    fn nav_bearing_deg(&self) -> f32 {
        self.0.borrow().nav_nav_bearing
    }

    fn crosstrack_error(&self) -> f32 {
        self.0.borrow().nav_xtrack
    }

    fn lat_accel(&self) -> f32 {
        self.0.borrow().nav_lat_accel
    }
}

pub struct MockLoiter(Shared);

impl LoiterMode for MockLoiter {
    fn enter(&mut self) -> Result<(), &'static str> {
        let mut rec = self.0.borrow_mut();
        rec.loiter_enter_calls += 1;
        if rec.loiter_enter_ok {
            Ok(())
        } else {
            Err("no position estimate")
        }
    }

    fn update(&mut self) {
        self.0.borrow_mut().loiter_update_calls += 1;
    }

    fn set_desired_speed(&mut self, speed: f32) -> Result<(), &'static str> {
        self.0.borrow_mut().loiter_speed = Some(speed);
        Ok(())
    }

    fn desired_location(&self) -> Option<Location> {
        self.0.borrow().loiter_point
    }

    fn wp_bearing_deg(&self) -> f32 {
        90.0
    }

    fn nav_bearing_deg(&self) -> f32 {
        90.0
    }

    fn crosstrack_error(&self) -> f32 {
        0.0
    }

    fn desired_lat_accel(&self) -> f32 {
        0.0
    }

    fn distance_to_destination(&self) -> f32 {
        self.0.borrow().loiter_distance
    }
}

/// Fixed-output controller: 0.5 steering, 0.25 throttle, no accel limit
pub struct MockAttitude(Shared);

impl AttitudeController for MockAttitude {
    fn steering_out_heading(
        &mut self,
        heading_rad: f32,
        _rate_max_rads: f32,
        _limits: MotorLimits,
        dt: f32,
    ) -> f32 {
        let mut rec = self.0.borrow_mut();
        rec.heading_requests.push(heading_rad);
        rec.last_dt = Some(dt);
        0.5
    }

    fn steering_out_rate(&mut self, rate_rads: f32, _limits: MotorLimits, dt: f32) -> f32 {
        let mut rec = self.0.borrow_mut();
        rec.rate_requests.push(rate_rads);
        rec.last_dt = Some(dt);
        0.5
    }

    fn desired_speed_accel_limited(&mut self, speed: f32, dt: f32) -> f32 {
        let mut rec = self.0.borrow_mut();
        rec.speed_requests.push(speed);
        rec.last_dt = Some(dt);
        speed
    }

    fn throttle_out_speed(
        &mut self,
        _speed: f32,
        _limits: MotorLimits,
        _cruise: &CruiseConfig,
        dt: f32,
    ) -> f32 {
        self.0.borrow_mut().last_dt = Some(dt);
        0.25
    }

    fn throttle_out_stop(&mut self, _limits: MotorLimits, _cruise: &CruiseConfig, dt: f32) -> f32 {
        let mut rec = self.0.borrow_mut();
        rec.stop_requests += 1;
        rec.last_dt = Some(dt);
        0.0
    }
}

pub struct MockMotors(Shared);

impl MotorOutput for MockMotors {
    fn set_steering(&mut self, steering: f32, apply_scaling: bool) {
        self.0.borrow_mut().steering.push((steering, apply_scaling));
    }

    fn set_throttle(&mut self, throttle_pct: f32) {
        self.0.borrow_mut().throttle.push(throttle_pct);
    }

    fn limits(&self) -> MotorLimits {
        MotorLimits::empty()
    }
}

pub struct MockGcs(Shared);

impl GcsNotifier for MockGcs {
    fn send_text(&mut self, severity: Severity, text: &str) {
        self.0.borrow_mut().texts.push((severity, text.to_string()));
    }

    fn send_mission_item_reached(&mut self, seq: u16) {
        self.0.borrow_mut().reached.push(seq);
    }
}

pub struct MockLogger(Shared);

impl TargetLogger for MockLogger {
    fn write_guided_target(&mut self, record: &GuidedTargetRecord) {
        self.0.borrow_mut().targets.push(*record);
    }
}

/// Vehicle state settable through shared references
pub struct MockVehicle {
    pub is_boat: Cell<bool>,
    pub location: Cell<Option<Location>>,
    pub yaw_cd: Cell<f32>,
    pub pilot_throttle: Cell<i16>,
    pub throttle_failsafe: Cell<bool>,
}

impl MockVehicle {
    pub fn rover() -> Self {
        Self {
            is_boat: Cell::new(false),
            location: Cell::new(Some(Location::from_degrees(35.0, 139.0))),
            yaw_cd: Cell::new(0.0),
            pilot_throttle: Cell::new(0),
            throttle_failsafe: Cell::new(false),
        }
    }

    pub fn boat() -> Self {
        let vehicle = Self::rover();
        vehicle.is_boat.set(true);
        vehicle
    }
}

impl VehicleState for MockVehicle {
    fn is_boat(&self) -> bool {
        self.is_boat.get()
    }

    fn current_location(&self) -> Option<Location> {
        self.location.get()
    }

    fn yaw_cd(&self) -> f32 {
        self.yaw_cd.get()
    }

    fn pilot_throttle(&self) -> i16 {
        self.pilot_throttle.get()
    }

    fn throttle_failsafe(&self) -> bool {
        self.throttle_failsafe.get()
    }
}

/// The full set of recording collaborators
pub struct Mocks {
    rec: Shared,
    nav: MockNav,
    loiter: MockLoiter,
    attitude: MockAttitude,
    motors: MockMotors,
    gcs: MockGcs,
    logger: MockLogger,
}

impl Mocks {
    pub fn new() -> Self {
        let rec: Shared = Rc::new(RefCell::new(Record::default()));
        Self {
            nav: MockNav(rec.clone()),
            loiter: MockLoiter(rec.clone()),
            attitude: MockAttitude(rec.clone()),
            motors: MockMotors(rec.clone()),
            gcs: MockGcs(rec.clone()),
            logger: MockLogger(rec.clone()),
            rec,
        }
    }

    /// Handle to the shared record
    pub fn record(&self) -> Shared {
        self.rec.clone()
    }

    /// Guided mode wired to these mocks with default parameters
    pub fn guided<'a>(
        &'a mut self,
        vehicle: &'a MockVehicle,
        clock: &'a MockTime,
    ) -> GuidedMode<'a> {
        let deps = GuidedDeps {
            nav: &mut self.nav,
            loiter: &mut self.loiter,
            attitude: &mut self.attitude,
            motors: &mut self.motors,
            vehicle,
            gcs: &mut self.gcs,
            logger: &mut self.logger,
            clock,
        };
        GuidedMode::new(deps, GuidedParams::default())
    }
}

