//! Registry error types. All are assembly-time structural errors: fatal,
//! no recovery attempted, the model does not start.

use std::error::Error;
use std::fmt;

use floe_core::ConfigError;

/// Errors from module resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum ModuleError {
    /// No configuration key is present for the interface and no default
    /// implementation was registered.
    NotConfigured {
        /// Interface type name.
        interface: String,
        /// The configuration key that was consulted.
        key: String,
    },
    /// The configured name does not match any registered implementation.
    UnknownImplementation {
        /// Interface type name.
        interface: String,
        /// The name found in the configuration.
        name: String,
        /// Names of the registered implementations.
        available: Vec<String>,
    },
    /// The interface type was never bound to a configuration key.
    UnboundInterface {
        /// Interface type name.
        interface: String,
    },
    /// The interface's configuration key holds a value of the wrong type.
    Config {
        /// Interface type name.
        interface: String,
        /// The underlying configuration error.
        source: ConfigError,
    },
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured { interface, key } => {
                write!(
                    f,
                    "no implementation configured for {interface} (key '{key}') and no default registered"
                )
            }
            Self::UnknownImplementation {
                interface,
                name,
                available,
            } => {
                write!(
                    f,
                    "unknown implementation '{name}' for {interface}; available: {}",
                    available.join(", ")
                )
            }
            Self::UnboundInterface { interface } => {
                write!(f, "interface {interface} is not bound to a configuration key")
            }
            Self::Config { interface, source } => {
                write!(f, "bad configuration for {interface}: {source}")
            }
        }
    }
}

impl Error for ModuleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config { source, .. } => Some(source),
            _ => None,
        }
    }
}
