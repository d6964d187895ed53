//! Per-interface implementation table.

use std::any::type_name;

use floe_core::ConfigStore;
use indexmap::IndexMap;

use crate::error::ModuleError;

/// The implementation table for one polymorphic interface `I`.
///
/// Holds the registered `(name, factory)` pairs, an optional default
/// name, and the memoized instance. Instantiation is lazy: nothing is
/// constructed until the first [`get`](Module::get).
pub struct Module<I: ?Sized + 'static> {
    config_key: String,
    factories: IndexMap<String, fn() -> Box<I>>,
    default: Option<String>,
    instance: Option<Box<I>>,
}

impl<I: ?Sized + 'static> Module<I> {
    /// Create an empty table bound to a configuration key.
    pub fn new(config_key: impl Into<String>) -> Self {
        Self {
            config_key: config_key.into(),
            factories: IndexMap::new(),
            default: None,
            instance: None,
        }
    }

    /// The configuration key consulted to select the implementation.
    pub fn config_key(&self) -> &str {
        &self.config_key
    }

    /// Register an implementation under a name.
    ///
    /// Re-registering a name replaces the factory (and is only sensible
    /// before the first `get`).
    pub fn implementation(&mut self, name: impl Into<String>, factory: fn() -> Box<I>) {
        self.factories.insert(name.into(), factory);
    }

    /// Set the implementation used when the configuration key is absent.
    pub fn set_default(&mut self, name: impl Into<String>) {
        self.default = Some(name.into());
    }

    /// Registered implementation names, in registration order.
    pub fn available(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// The single configured implementation.
    ///
    /// The first call reads the configuration key (or falls back to the
    /// default), constructs the implementation, and memoizes it; later
    /// calls return the same instance.
    pub fn get(&mut self, config: &ConfigStore) -> Result<&mut I, ModuleError> {
        if self.instance.is_none() {
            self.instance = Some(self.construct(config)?);
        }
        Ok(self
            .instance
            .as_mut()
            .expect("memoized above")
            .as_mut())
    }

    /// Transfer ownership of the configured implementation to the caller.
    ///
    /// Used during assembly when the model takes ownership of a
    /// component. A later `get` constructs a fresh instance.
    pub fn take(&mut self, config: &ConfigStore) -> Result<Box<I>, ModuleError> {
        if self.instance.is_none() {
            self.instance = Some(self.construct(config)?);
        }
        Ok(self.instance.take().expect("memoized above"))
    }

    fn construct(&self, config: &ConfigStore) -> Result<Box<I>, ModuleError> {
        let name = if config.contains(&self.config_key) {
            config
                .string(&self.config_key)
                .map_err(|source| ModuleError::Config {
                    interface: type_name::<I>().to_string(),
                    source,
                })?
                .to_string()
        } else {
            self.default.clone().ok_or_else(|| ModuleError::NotConfigured {
                interface: type_name::<I>().to_string(),
                key: self.config_key.clone(),
            })?
        };
        let factory = self
            .factories
            .get(&name)
            .ok_or_else(|| ModuleError::UnknownImplementation {
                interface: type_name::<I>().to_string(),
                name: name.clone(),
                available: self.available(),
            })?;
        Ok(factory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::ConfigValue;

    trait Law: std::fmt::Debug {
        fn base(&self) -> f64;
        fn calls(&mut self) -> u32;
    }

    #[derive(Debug)]
    struct Constant(f64, u32);
    impl Law for Constant {
        fn base(&self) -> f64 {
            self.0
        }
        fn calls(&mut self) -> u32 {
            self.1 += 1;
            self.1
        }
    }

    fn table() -> Module<dyn Law> {
        let mut m: Module<dyn Law> = Module::new("ocean.law");
        m.implementation("zero", || Box::new(Constant(0.0, 0)));
        m.implementation("one", || Box::new(Constant(1.0, 0)));
        m
    }

    #[test]
    fn configured_name_selects_implementation() {
        let config = ConfigStore::new().with("ocean.law", ConfigValue::Str("one".into()));
        let mut m = table();
        assert_eq!(m.get(&config).unwrap().base(), 1.0);
    }

    #[test]
    fn memoized_instance_is_stable() {
        let config = ConfigStore::new().with("ocean.law", ConfigValue::Str("zero".into()));
        let mut m = table();
        // The counter accumulates across get calls, so all three hit
        // the same instance.
        assert_eq!(m.get(&config).unwrap().calls(), 1);
        assert_eq!(m.get(&config).unwrap().calls(), 2);
        assert_eq!(m.get(&config).unwrap().calls(), 3);

        // Taking hands that instance over; the next get constructs a
        // fresh one.
        let mut boxed = m.take(&config).unwrap();
        assert_eq!(boxed.calls(), 4);
        assert_eq!(m.get(&config).unwrap().calls(), 1);
    }

    #[test]
    fn default_applies_when_key_absent() {
        let config = ConfigStore::new();
        let mut m = table();
        m.set_default("one");
        assert_eq!(m.get(&config).unwrap().base(), 1.0);
    }

    #[test]
    fn not_configured_without_key_or_default() {
        let config = ConfigStore::new();
        let mut m = table();
        let err = m.get(&config).unwrap_err();
        assert!(matches!(err, ModuleError::NotConfigured { .. }));
        assert!(err.to_string().contains("ocean.law"));
    }

    #[test]
    fn unknown_implementation_lists_available() {
        let config = ConfigStore::new().with("ocean.law", ConfigValue::Str("cubic".into()));
        let mut m = table();
        match m.get(&config).unwrap_err() {
            ModuleError::UnknownImplementation {
                name, available, ..
            } => {
                assert_eq!(name, "cubic");
                assert_eq!(available, vec!["zero".to_string(), "one".to_string()]);
            }
            other => panic!("expected UnknownImplementation, got {other:?}"),
        }
    }

    #[test]
    fn wrong_key_type_is_a_config_error() {
        let config = ConfigStore::new().with("ocean.law", ConfigValue::Real(1.0));
        let mut m = table();
        assert!(matches!(
            m.get(&config).unwrap_err(),
            ModuleError::Config { .. }
        ));
    }
}
