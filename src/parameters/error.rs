//! Parameter store errors

use core::fmt;

/// Parameter store error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// Name longer than the 16-character MAVLink limit
    NameTooLong,
    /// No room for another parameter
    StoreFull,
    /// Parameter was never registered
    Unknown,
    /// Parameter is read-only
    ReadOnly,
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::NameTooLong => write!(f, "Parameter name too long"),
            ParameterError::StoreFull => write!(f, "Parameter store full"),
            ParameterError::Unknown => write!(f, "Unknown parameter"),
            ParameterError::ReadOnly => write!(f, "Parameter is read-only"),
        }
    }
}

/// Parameter store result
pub type Result<T> = core::result::Result<T, ParameterError>;
