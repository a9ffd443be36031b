//! Guided Mode Parameter Definitions
//!
//! # Parameters
//!
//! - `GUID_OPTIONS` - Guided mode option bitmask (**visible in GCS**)
//! - `CRUISE_SPEED` - Speed reached at cruise throttle, m/s (**visible in GCS**)
//! - `CRUISE_THROTTLE` - Throttle percentage needed for cruise speed (**visible in GCS**)
//! - `SPEED_MAX` - Maximum vehicle speed, m/s, 0 = project from cruise (**visible in GCS**)
//!
//! # ArduPilot Compatibility
//!
//! Names, units and the `GUID_OPTIONS` bit layout follow ArduPilot Rover:
//! - https://ardupilot.org/rover/docs/parameters.html

use bitflags::bitflags;

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::collaborators::NavStrategy;
use crate::speed::CruiseConfig;

const DEFAULT_OPTIONS: i32 = 0;
const DEFAULT_CRUISE_SPEED: f32 = 2.0;
const DEFAULT_CRUISE_THROTTLE: f32 = 50.0;
const DEFAULT_SPEED_MAX: f32 = 0.0;

const MAX_CRUISE_SPEED: f32 = 100.0;
const MAX_SPEED_MAX: f32 = 30.0;

bitflags! {
    /// `GUID_OPTIONS` bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GuidedOptions: u32 {
        /// Navigate with S-curves (object avoidance) instead of
        /// position controller input shaping (fast target updates)
        const SCURVES_USED_FOR_NAVIGATION = 1 << 6;
    }
}

/// Guided mode parameters loaded from parameter store
#[derive(Debug, Clone)]
pub struct GuidedParams {
    /// Option bitmask (ArduPilot: GUID_OPTIONS)
    pub options: GuidedOptions,
    /// Cruise calibration (ArduPilot: CRUISE_SPEED, CRUISE_THROTTLE, SPEED_MAX)
    pub cruise: CruiseConfig,
}

impl Default for GuidedParams {
    fn default() -> Self {
        Self {
            options: GuidedOptions::from_bits_truncate(DEFAULT_OPTIONS as u32),
            cruise: CruiseConfig {
                speed: DEFAULT_CRUISE_SPEED,
                throttle_pct: DEFAULT_CRUISE_THROTTLE,
                speed_max: DEFAULT_SPEED_MAX,
            },
        }
    }
}

impl GuidedParams {
    /// Register guided parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "GUID_OPTIONS",
            ParamValue::Int(DEFAULT_OPTIONS),
            ParamFlags::empty(),
        )?;
        store.register(
            "CRUISE_SPEED",
            ParamValue::Float(DEFAULT_CRUISE_SPEED),
            ParamFlags::empty(),
        )?;
        store.register(
            "CRUISE_THROTTLE",
            ParamValue::Float(DEFAULT_CRUISE_THROTTLE),
            ParamFlags::empty(),
        )?;
        store.register(
            "SPEED_MAX",
            ParamValue::Float(DEFAULT_SPEED_MAX),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load guided parameters, clamping out-of-range values
    pub fn from_store(store: &ParameterStore) -> Self {
        let options = match store.get("GUID_OPTIONS") {
            Some(ParamValue::Int(v)) => GuidedOptions::from_bits_truncate(*v as u32),
            _ => GuidedOptions::from_bits_truncate(DEFAULT_OPTIONS as u32),
        };

        let speed = read_f32(store, "CRUISE_SPEED", DEFAULT_CRUISE_SPEED).clamp(0.0, MAX_CRUISE_SPEED);
        let throttle_pct =
            read_f32(store, "CRUISE_THROTTLE", DEFAULT_CRUISE_THROTTLE).clamp(0.0, 100.0);
        let speed_max = read_f32(store, "SPEED_MAX", DEFAULT_SPEED_MAX).clamp(0.0, MAX_SPEED_MAX);

        Self {
            options,
            cruise: CruiseConfig {
                speed,
                throttle_pct,
                speed_max,
            },
        }
    }

    /// Navigation strategy selected by `GUID_OPTIONS`
    pub fn nav_strategy(&self) -> NavStrategy {
        if self
            .options
            .contains(GuidedOptions::SCURVES_USED_FOR_NAVIGATION)
        {
            NavStrategy::SCurves
        } else {
            NavStrategy::PositionControl
        }
    }
}

fn read_f32(store: &ParameterStore, name: &str, default: f32) -> f32 {
    match store.get(name) {
        Some(ParamValue::Float(v)) if !v.is_nan() => *v,
        Some(ParamValue::Int(v)) => *v as f32,
        _ => default,
    }
}
