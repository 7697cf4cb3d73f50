//! In-memory Parameter Storage
//!
//! Named, typed parameters with per-parameter flags. Names follow the
//! MAVLink 16-character limit so the store can back a PARAM_* protocol
//! handler directly.
//!
//! # Example
//!
//! ```
//! use sub_mission::parameters::{ParamFlags, ParamValue, ParameterStore};
//!
//! let mut store = ParameterStore::new();
//! store
//!     .register("MIS_RESTART", ParamValue::Int(0), ParamFlags::empty())
//!     .unwrap();
//!
//! store.set("MIS_RESTART", ParamValue::Int(1)).unwrap();
//! assert_eq!(store.get("MIS_RESTART"), Some(&ParamValue::Int(1)));
//! ```

use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

use super::error::{ParameterError, Result};

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
const MAX_PARAMS: usize = 32;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter is read-only (cannot be modified via PARAM_SET)
        const READ_ONLY = 0b00000001;
    }
}

/// Parameter value types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Boolean parameter
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit floating point
    Float(f32),
}

impl ParamValue {
    /// Value as a float, converting integers and booleans
    pub fn as_f32(&self) -> f32 {
        match self {
            ParamValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            ParamValue::Int(i) => *i as f32,
            ParamValue::Float(f) => *f,
        }
    }

    /// Value as an integer, truncating floats
    pub fn as_i32(&self) -> i32 {
        match self {
            ParamValue::Bool(b) => *b as i32,
            ParamValue::Int(i) => *i,
            ParamValue::Float(f) => *f as i32,
        }
    }
}

/// Parameter store
pub struct ParameterStore {
    parameters: FnvIndexMap<String<PARAM_NAME_LEN>, (ParamValue, ParamFlags), MAX_PARAMS>,
}

impl ParameterStore {
    /// Create a new empty parameter store
    pub fn new() -> Self {
        Self {
            parameters: FnvIndexMap::new(),
        }
    }

    fn key(name: &str) -> Result<String<PARAM_NAME_LEN>> {
        let mut key = String::new();
        key.push_str(name).map_err(|_| ParameterError::NameTooLong)?;
        Ok(key)
    }

    /// Get parameter value
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        let key = Self::key(name).ok()?;
        self.parameters.get(&key).map(|(value, _)| value)
    }

    /// Set parameter value
    ///
    /// Fails for unregistered or read-only parameters.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let key = Self::key(name)?;
        let entry = self
            .parameters
            .get_mut(&key)
            .ok_or(ParameterError::Unknown)?;

        if entry.1.contains(ParamFlags::READ_ONLY) {
            return Err(ParameterError::ReadOnly);
        }

        entry.0 = value;
        Ok(())
    }

    /// Register a new parameter with default value and flags
    ///
    /// Registering an existing name keeps its current value.
    pub fn register(
        &mut self,
        name: &str,
        default_value: ParamValue,
        flags: ParamFlags,
    ) -> Result<()> {
        let key = Self::key(name)?;

        if self.parameters.contains_key(&key) {
            return Ok(());
        }

        self.parameters
            .insert(key, (default_value, flags))
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
