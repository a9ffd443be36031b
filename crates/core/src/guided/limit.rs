//! Guided limit envelope
//!
//! An overseeing mode (Auto running a `NAV_GUIDED_ENABLE` mission item)
//! hands control to Guided with an optional time and distance budget. The
//! envelope only reports a breach; acting on it is the caller's job.

use crate::location::Location;

/// Time and horizontal distance limits measured from an armed origin
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LimitEnvelope {
    /// Time budget in milliseconds, 0 = disabled
    timeout_ms: u32,
    /// Maximum distance from the origin in metres, <= 0 = disabled
    horiz_max: f32,
    /// Time the envelope was armed
    start_time_ms: Option<u32>,
    /// Position the envelope was armed at
    start_loc: Option<Location>,
}

impl LimitEnvelope {
    /// Envelope with both limits disabled and no origin
    pub const fn new() -> Self {
        Self {
            timeout_ms: 0,
            horiz_max: 0.0,
            start_time_ms: None,
            start_loc: None,
        }
    }

    /// Configure the limits. Zero or negative values disable a limit.
    pub fn set(&mut self, timeout_ms: u32, horiz_max: f32) {
        self.timeout_ms = timeout_ms;
        self.horiz_max = horiz_max;
    }

    /// Disable both limits. The armed origin is kept.
    pub fn clear(&mut self) {
        self.timeout_ms = 0;
        self.horiz_max = 0.0;
    }

    /// Record the time and position limits are measured from
    pub fn arm(&mut self, now_ms: u32, location: Option<Location>) {
        self.start_time_ms = Some(now_ms);
        self.start_loc = location;
    }

    /// True if either enabled limit has been exceeded
    ///
    /// A limit cannot be breached before the envelope has been armed, and
    /// the distance limit is not evaluated while either position is unknown.
    pub fn is_breached(&self, now_ms: u32, current: Option<Location>) -> bool {
        if self.timeout_ms > 0 {
            if let Some(start) = self.start_time_ms {
                if now_ms.wrapping_sub(start) > self.timeout_ms {
                    return true;
                }
            }
        }

        if self.horiz_max > 0.0 {
            if let (Some(origin), Some(current)) = (self.start_loc, current) {
                return current.distance_to(&origin) > self.horiz_max;
            }
        }

        false
    }

    /// Configured time limit (milliseconds)
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Configured distance limit (metres)
    pub fn horiz_max(&self) -> f32 {
        self.horiz_max
    }

    /// Armed origin position
    pub fn start_location(&self) -> Option<Location> {
        self.start_loc
    }
}
