//! Monotonic millisecond clock abstraction.
//!
//! Command timestamps and the staleness check share one clock, so every
//! target stamp and every comparison goes through the same `TimeSource`.
//! Timestamps are `u32` milliseconds and wrap after ~49 days; all elapsed
//! time arithmetic uses wrapping subtraction.

use core::cell::Cell;

/// Monotonic time source for the control loop.
///
/// # Example
///
/// ```
/// use guided_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let stamp = time.now_ms();
/// time.advance_ms(250);
/// assert_eq!(time.elapsed_ms(stamp), 250);
/// ```
pub trait TimeSource {
    /// Milliseconds since system start.
    fn now_ms(&self) -> u32;

    /// Milliseconds elapsed since `stamp_ms`, robust to counter wrap.
    fn elapsed_ms(&self, stamp_ms: u32) -> u32 {
        self.now_ms().wrapping_sub(stamp_ms)
    }
}

/// Controllable clock for host tests and simulation.
#[derive(Debug, Default)]
pub struct MockTime {
    current_ms: Cell<u32>,
}

impl MockTime {
    /// Creates a clock at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock at `ms`.
    pub fn with_initial(ms: u32) -> Self {
        Self {
            current_ms: Cell::new(ms),
        }
    }

    /// Sets the absolute time.
    pub fn set_ms(&self, ms: u32) {
        self.current_ms.set(ms);
    }

    /// Advances the clock, wrapping like the hardware counter.
    pub fn advance_ms(&self, ms: u32) {
        self.current_ms.set(self.current_ms.get().wrapping_add(ms));
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u32 {
        self.current_ms.get()
    }
}
