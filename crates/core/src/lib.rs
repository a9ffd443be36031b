//! guided_core - Guided mode command and control for ground vehicles
//!
//! This crate contains the platform-agnostic Guided mode state machine
//! for rovers and boats, testable on host without embassy or hardware.
//!
//! # Design Principles
//!
//! - **Pure no_std**: No std library dependencies outside tests
//! - **Trait abstractions**: Navigation, control, motors, GCS and logging
//!   are injected via traits
//! - **Single clock**: Command timestamps and staleness checks share one
//!   [`traits::TimeSource`]
//!
//! # Modules
//!
//! - [`guided`]: Guided mode submodes, command ingestion and dispatch
//! - [`collaborators`]: Interfaces to navigation, loiter, controllers and GCS
//! - [`mode`]: Mode lifecycle trait
//! - [`parameters`]: Parameter store and guided parameter definitions
//! - [`location`]: Geographic positions and heading arithmetic
//! - [`speed`]: Cruise calibration and pilot speed nudge
//! - [`traits`]: Platform-agnostic trait abstractions (TimeSource)
//! - [`error`]: Guided command errors

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod logging;

pub mod collaborators;
pub mod error;
pub mod guided;
pub mod location;
pub mod mode;
pub mod parameters;
pub mod speed;
pub mod traits;

pub use error::GuidedError;
pub use guided::{GuidedDeps, GuidedMode, SubMode, SubModeKind};
pub use location::Location;
pub use mode::Mode;
