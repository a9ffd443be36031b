//! Parameter store
//!
//! Fixed-capacity name/value store for the guided configuration. Values
//! are registered with defaults once at boot and may then be changed by a
//! GCS parameter protocol handler living outside this crate.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length (MAVLink param_id)
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 32;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter cannot be modified after registration
        const READ_ONLY = 0b00000001;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

type Key = String<PARAM_NAME_LEN>;

fn make_key(name: &str) -> Result<Key, ParameterError> {
    let mut key = Key::new();
    key.push_str(name)
        .map_err(|_| ParameterError::UnknownParameter)?;
    Ok(key)
}

/// Parameter store
pub struct ParameterStore {
    values: FnvIndexMap<Key, ParamValue, MAX_PARAMS>,
    flags: FnvIndexMap<Key, ParamFlags, MAX_PARAMS>,
}

impl ParameterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            values: FnvIndexMap::new(),
            flags: FnvIndexMap::new(),
        }
    }

    /// Get a parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = make_key(name).ok()?;
        self.values.get(&key)
    }

    /// Change a registered parameter
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = make_key(name)?;

        if !self.values.contains_key(&key) {
            return Err(ParameterError::UnknownParameter);
        }

        if let Some(flags) = self.flags.get(&key) {
            if flags.contains(ParamFlags::READ_ONLY) {
                return Err(ParameterError::ReadOnly);
            }
        }

        self.values
            .insert(key, value)
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Register a parameter with its default value
    ///
    /// Registering an existing name keeps the current value.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = make_key(name)?;

        if self.values.contains_key(&key) {
            return Ok(());
        }

        self.values
            .insert(key.clone(), default_value)
            .map_err(|_| ParameterError::StoreFull)?;
        self.flags
            .insert(key, flags)
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    /// Number of registered parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
