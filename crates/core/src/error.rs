//! Guided mode error types
//!
//! All guided failures are local and recoverable: the caller gets a
//! status back and the active submode is left untouched.

use core::fmt;

use crate::guided::SubModeKind;

/// Errors returned by the guided command interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuidedError {
    /// The navigation library refused the destination
    DestinationRejected {
        /// Reason reported by the navigator
        reason: &'static str,
    },
    /// The active controller refused the speed change
    SpeedRejected {
        /// Reason reported by the controller
        reason: &'static str,
    },
    /// The operation has no meaning in the active submode
    Unsupported {
        /// Rejected operation
        operation: &'static str,
        /// Submode that was active
        submode: SubModeKind,
    },
}

impl fmt::Display for GuidedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuidedError::DestinationRejected { reason } => {
                write!(f, "Destination rejected: {}", reason)
            }
            GuidedError::SpeedRejected { reason } => write!(f, "Speed rejected: {}", reason),
            GuidedError::Unsupported { operation, submode } => {
                write!(f, "{} not supported in {} submode", operation, submode.name())
            }
        }
    }
}
