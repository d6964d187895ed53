//! Error types shared across the Floe workspace.
//!
//! Configuration failures are fatal at assembly and always name the
//! offending key. Update failures propagate out of the driver loop; no
//! error is silently swallowed inside a timestep.

use std::error::Error;
use std::fmt;

use crate::id::ArrayId;

/// A missing or invalid configuration parameter.
///
/// Fatal at assembly: the model does not start and the diagnostic names
/// the offending key.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A required key is absent from the store.
    MissingKey {
        /// The dotted key that was looked up.
        key: String,
    },
    /// A key is present but holds a value of the wrong type.
    WrongType {
        /// The dotted key that was looked up.
        key: String,
        /// Type the caller asked for.
        expected: &'static str,
        /// Type actually stored.
        found: &'static str,
    },
    /// A numeric value lies outside its permitted range.
    OutOfRange {
        /// The dotted key that was looked up.
        key: String,
        /// The value found in the store.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { key } => write!(f, "configuration key '{key}' is missing"),
            Self::WrongType {
                key,
                expected,
                found,
            } => {
                write!(
                    f,
                    "configuration key '{key}' has type {found}, expected {expected}"
                )
            }
            Self::OutOfRange {
                key,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "configuration key '{key}' = {value} is outside [{min}, {max}]"
                )
            }
        }
    }
}

impl Error for ConfigError {}

/// A failure inside a component's `update`.
///
/// Wrapped by the engine with the failing component's name and propagated
/// out of the driver loop.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateError {
    /// The update could not complete.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A non-finite value was produced in an output array.
    NonFinite {
        /// The array containing the bad value.
        id: ArrayId,
        /// Flat index of the first offending cell.
        index: usize,
    },
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "update failed: {reason}"),
            Self::NonFinite { id, index } => {
                write!(f, "non-finite value in {id} at cell {index}")
            }
        }
    }
}

impl Error for UpdateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages_name_the_key() {
        let err = ConfigError::MissingKey {
            key: "ocean.sst".into(),
        };
        assert!(err.to_string().contains("ocean.sst"));

        let err = ConfigError::OutOfRange {
            key: "model.step".into(),
            value: -1.0,
            min: 0.0,
            max: 86400.0,
        };
        assert!(err.to_string().contains("model.step"));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn update_error_names_the_array() {
        let err = UpdateError::NonFinite {
            id: ArrayId::shared("iceThickness"),
            index: 42,
        };
        assert!(err.to_string().contains("shared:iceThickness"));
    }
}
