//! Parameter management types
//!
//! Flash persistence and the MAVLink parameter protocol live outside this
//! crate; this module only provides the store and the guided parameter
//! definitions.

pub mod error;
pub mod guided;
pub mod storage;

pub use error::ParameterError;
pub use guided::{GuidedOptions, GuidedParams};
pub use storage::{ParamFlags, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN};
