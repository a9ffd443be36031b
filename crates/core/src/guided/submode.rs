//! Guided submodes and their targets
//!
//! Each submode variant owns the target it acts on, so switching submode
//! replaces the tag and the target in one assignment and a stale target
//! from a previous submode can never be read.

/// A target expires when not refreshed for this long (milliseconds)
pub const TARGET_TIMEOUT_MS: u32 = 3000;

/// Freshness of an externally streamed target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetStamp {
    time_ms: u32,
    valid: bool,
}

impl TargetStamp {
    /// A valid target received at `now_ms`
    pub fn new(now_ms: u32) -> Self {
        Self {
            time_ms: now_ms,
            valid: true,
        }
    }

    /// Time the target was received (milliseconds)
    pub fn time_ms(&self) -> u32 {
        self.time_ms
    }

    /// True until the target has expired
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Invalidate the target if it is older than [`TARGET_TIMEOUT_MS`]
    ///
    /// Returns true only on the call that expires it.
    pub fn expire_if_stale(&mut self, now_ms: u32) -> bool {
        if self.valid && now_ms.wrapping_sub(self.time_ms) > TARGET_TIMEOUT_MS {
            self.valid = false;
            return true;
        }
        false
    }
}

/// Waypoint submode state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaypointTarget {
    /// Distance from the vehicle to the destination (metres)
    pub distance_to_destination: f32,
    /// Send MISSION_ITEM_REACHED on arrival (cleared once sent)
    pub send_notification: bool,
}

/// Heading hold target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadingTarget {
    /// Desired heading (centi-degrees)
    pub yaw_cd: f32,
    /// Desired speed (m/s, negative drives backwards)
    pub speed: f32,
    pub stamp: TargetStamp,
}

/// Turn rate target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnRateTarget {
    /// Desired turn rate (centi-degrees/s)
    pub rate_cds: f32,
    /// Desired speed (m/s, negative drives backwards)
    pub speed: f32,
    pub stamp: TargetStamp,
}

/// Direct actuator target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringThrottleTarget {
    /// Steering, -1.0 (full left) to +1.0 (full right)
    pub steering: f32,
    /// Throttle, -1.0 (full reverse) to +1.0 (full forward)
    pub throttle: f32,
    pub stamp: TargetStamp,
}

/// Active guided submode with its target
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubMode {
    /// Drive to a destination with the waypoint navigator
    Waypoint(WaypointTarget),
    /// Hold a heading at a speed
    HeadingAndSpeed(HeadingTarget),
    /// Turn at a rate at a speed
    TurnRateAndSpeed(TurnRateTarget),
    /// Hold position with loiter mode
    Loiter,
    /// Pass steering and throttle straight to the motors
    SteeringAndThrottle(SteeringThrottleTarget),
    /// Stop as quickly as possible
    Stop,
}

impl SubMode {
    /// Tag of this submode
    pub fn kind(&self) -> SubModeKind {
        match self {
            SubMode::Waypoint(_) => SubModeKind::Waypoint,
            SubMode::HeadingAndSpeed(_) => SubModeKind::HeadingAndSpeed,
            SubMode::TurnRateAndSpeed(_) => SubModeKind::TurnRateAndSpeed,
            SubMode::Loiter => SubModeKind::Loiter,
            SubMode::SteeringAndThrottle(_) => SubModeKind::SteeringAndThrottle,
            SubMode::Stop => SubModeKind::Stop,
        }
    }

    /// Freshness of the streamed target, for submodes that have one
    pub fn stamp(&self) -> Option<TargetStamp> {
        match self {
            SubMode::HeadingAndSpeed(t) => Some(t.stamp),
            SubMode::TurnRateAndSpeed(t) => Some(t.stamp),
            SubMode::SteeringAndThrottle(t) => Some(t.stamp),
            SubMode::Waypoint(_) | SubMode::Loiter | SubMode::Stop => None,
        }
    }
}

/// Submode tag without target data
///
/// Discriminants match the submode byte of the onboard guided target log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SubModeKind {
    Waypoint = 0,
    HeadingAndSpeed = 1,
    TurnRateAndSpeed = 2,
    Loiter = 3,
    SteeringAndThrottle = 4,
    Stop = 5,
}

impl SubModeKind {
    /// Name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SubModeKind::Waypoint => "Waypoint",
            SubModeKind::HeadingAndSpeed => "HeadingAndSpeed",
            SubModeKind::TurnRateAndSpeed => "TurnRateAndSpeed",
            SubModeKind::Loiter => "Loiter",
            SubModeKind::SteeringAndThrottle => "SteeringAndThrottle",
            SubModeKind::Stop => "Stop",
        }
    }
}
