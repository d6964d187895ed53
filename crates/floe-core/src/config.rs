//! The process-wide configuration store.
//!
//! [`ConfigStore`] is a key→value registry queried by dotted, namespaced
//! keys (`"model.step"`, `"grid.nx"`). It is handed explicitly to every
//! component at configuration time; nothing in Floe reads configuration
//! through ambient global state, which keeps assembly deterministic and
//! components testable in isolation.
//!
//! How the store is populated (command line, configuration files) is out
//! of scope for the kernel; tests and embedders build one with
//! [`ConfigStore::with`].

use indexmap::IndexMap;

use crate::error::ConfigError;

/// A configuration value: a scalar or a short numeric sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// Floating-point scalar.
    Real(f64),
    /// Integer scalar.
    Integer(i64),
    /// String value (also used for enumerated choices).
    Str(String),
    /// Boolean switch.
    Switch(bool),
    /// Short sequence of reals.
    Reals(Vec<f64>),
}

impl ConfigValue {
    /// Human-readable type name for error messages.
    fn type_name(&self) -> &'static str {
        match self {
            Self::Real(_) => "real",
            Self::Integer(_) => "integer",
            Self::Str(_) => "string",
            Self::Switch(_) => "switch",
            Self::Reals(_) => "real list",
        }
    }
}

/// Key→value registry of model parameters.
///
/// Keys are dotted strings. Lookups are O(1); iteration order is insertion
/// order (`IndexMap`), which keeps configuration dumps deterministic.
#[derive(Clone, Debug, Default)]
pub struct ConfigStore {
    values: IndexMap<String, ConfigValue>,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a value.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) {
        self.values.insert(key.into(), value);
    }

    /// Chainable insert, for building stores in tests and embedders.
    pub fn with(mut self, key: impl Into<String>, value: ConfigValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Raw lookup, `MissingKey` if absent.
    pub fn get(&self, key: &str) -> Result<&ConfigValue, ConfigError> {
        self.values.get(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
        })
    }

    /// Floating-point scalar. Integer values are widened to `f64`.
    pub fn real(&self, key: &str) -> Result<f64, ConfigError> {
        match self.get(key)? {
            ConfigValue::Real(v) => Ok(*v),
            ConfigValue::Integer(v) => Ok(*v as f64),
            other => Err(self.wrong_type(key, "real", other)),
        }
    }

    /// Integer scalar.
    pub fn integer(&self, key: &str) -> Result<i64, ConfigError> {
        match self.get(key)? {
            ConfigValue::Integer(v) => Ok(*v),
            other => Err(self.wrong_type(key, "integer", other)),
        }
    }

    /// String value.
    pub fn string(&self, key: &str) -> Result<&str, ConfigError> {
        match self.get(key)? {
            ConfigValue::Str(v) => Ok(v.as_str()),
            other => Err(self.wrong_type(key, "string", other)),
        }
    }

    /// Boolean switch.
    pub fn switch(&self, key: &str) -> Result<bool, ConfigError> {
        match self.get(key)? {
            ConfigValue::Switch(v) => Ok(*v),
            other => Err(self.wrong_type(key, "switch", other)),
        }
    }

    /// Short sequence of reals.
    pub fn reals(&self, key: &str) -> Result<&[f64], ConfigError> {
        match self.get(key)? {
            ConfigValue::Reals(v) => Ok(v.as_slice()),
            other => Err(self.wrong_type(key, "real list", other)),
        }
    }

    /// Floating-point scalar with a default for an absent key.
    ///
    /// A present key of the wrong type is still an error.
    pub fn real_or(&self, key: &str, default: f64) -> Result<f64, ConfigError> {
        if self.contains(key) {
            self.real(key)
        } else {
            Ok(default)
        }
    }

    /// Integer scalar with a default for an absent key.
    pub fn integer_or(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        if self.contains(key) {
            self.integer(key)
        } else {
            Ok(default)
        }
    }

    /// String value with a default for an absent key.
    pub fn string_or<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str, ConfigError> {
        if self.contains(key) {
            self.string(key)
        } else {
            Ok(default)
        }
    }

    /// Floating-point scalar constrained to an inclusive range.
    pub fn real_in_range(&self, key: &str, min: f64, max: f64) -> Result<f64, ConfigError> {
        let value = self.real(key)?;
        if value < min || value > max || !value.is_finite() {
            return Err(ConfigError::OutOfRange {
                key: key.to_string(),
                value,
                min,
                max,
            });
        }
        Ok(value)
    }

    fn wrong_type(&self, key: &str, expected: &'static str, found: &ConfigValue) -> ConfigError {
        ConfigError::WrongType {
            key: key.to_string(),
            expected,
            found: found.type_name(),
        }
    }
}
