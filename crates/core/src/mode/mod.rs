//! Control mode lifecycle
//!
//! The vehicle's mode manager drives every control mode through the
//! [`Mode`] trait. Guided mode implements it in [`crate::guided`].

mod traits;

pub use traits::Mode;
