//! Platform-agnostic trait abstractions.
//!
//! Platform implementations (Embassy timers, SITL clocks) live outside this
//! crate. Mock implementations are always available for host testing.

pub mod time;

pub use time::{MockTime, TimeSource};
