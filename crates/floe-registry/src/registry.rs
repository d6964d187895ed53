//! Heterogeneous registry of per-interface module tables.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use floe_core::ConfigStore;

use crate::error::ModuleError;
use crate::module::Module;

/// The single place where interface types are resolved to concrete
/// implementations.
///
/// A registry holds one [`Module`] table per interface type, looked up by
/// `TypeId`. Interfaces are bound once at startup; the binding (which
/// implementations exist, under which names) is immutable after
/// assembly by convention; nothing enforces this beyond the assembler
/// not touching the registry afterwards.
///
/// # Example
///
/// ```
/// use floe_core::{ConfigStore, ConfigValue};
/// use floe_registry::ModuleRegistry;
///
/// trait Albedo { fn value(&self) -> f64; }
/// struct Flat;
/// impl Albedo for Flat { fn value(&self) -> f64 { 0.6 } }
///
/// let mut registry = ModuleRegistry::new();
/// registry.bind_interface::<dyn Albedo>("ice.albedo");
/// registry.implementation::<dyn Albedo>("flat", || Box::new(Flat)).unwrap();
///
/// let config = ConfigStore::new().with("ice.albedo", ConfigValue::Str("flat".into()));
/// assert_eq!(registry.get::<dyn Albedo>(&config).unwrap().value(), 0.6);
/// ```
#[derive(Default)]
pub struct ModuleRegistry {
    tables: HashMap<TypeId, Box<dyn Any>>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an interface type to the configuration key that selects its
    /// implementation. Rebinding replaces the table.
    pub fn bind_interface<I: ?Sized + 'static>(&mut self, config_key: &str) {
        self.tables
            .insert(TypeId::of::<I>(), Box::new(Module::<I>::new(config_key)));
    }

    /// Register an implementation of a bound interface under a name.
    pub fn implementation<I: ?Sized + 'static>(
        &mut self,
        name: &str,
        factory: fn() -> Box<I>,
    ) -> Result<(), ModuleError> {
        self.table_mut::<I>()?.implementation(name, factory);
        Ok(())
    }

    /// Set the implementation used when the interface's key is absent.
    pub fn set_default<I: ?Sized + 'static>(&mut self, name: &str) -> Result<(), ModuleError> {
        self.table_mut::<I>()?.set_default(name);
        Ok(())
    }

    /// The single configured implementation of `I`.
    ///
    /// Lazy and memoized: the first call constructs, later calls return
    /// the same instance.
    pub fn get<I: ?Sized + 'static>(
        &mut self,
        config: &ConfigStore,
    ) -> Result<&mut I, ModuleError> {
        self.table_mut::<I>()?.get(config)
    }

    /// Transfer ownership of the configured implementation of `I`.
    pub fn take<I: ?Sized + 'static>(
        &mut self,
        config: &ConfigStore,
    ) -> Result<Box<I>, ModuleError> {
        self.table_mut::<I>()?.take(config)
    }

    fn table_mut<I: ?Sized + 'static>(&mut self) -> Result<&mut Module<I>, ModuleError> {
        self.tables
            .get_mut(&TypeId::of::<I>())
            .and_then(|table| table.downcast_mut::<Module<I>>())
            .ok_or_else(|| ModuleError::UnboundInterface {
                interface: type_name::<I>().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::ConfigValue;

    trait Greeting: std::fmt::Debug {
        fn text(&self) -> &str;
    }
    #[derive(Debug)]
    struct Terse;
    impl Greeting for Terse {
        fn text(&self) -> &str {
            "hi"
        }
    }

    trait Farewell {
        fn text(&self) -> &str;
    }
    struct Formal;
    impl Farewell for Formal {
        fn text(&self) -> &str {
            "goodbye"
        }
    }

    #[test]
    fn interfaces_are_independent() {
        let mut registry = ModuleRegistry::new();
        registry.bind_interface::<dyn Greeting>("modules.greeting");
        registry.bind_interface::<dyn Farewell>("modules.farewell");
        registry
            .implementation::<dyn Greeting>("terse", || Box::new(Terse))
            .unwrap();
        registry
            .implementation::<dyn Farewell>("formal", || Box::new(Formal))
            .unwrap();

        let config = ConfigStore::new()
            .with("modules.greeting", ConfigValue::Str("terse".into()))
            .with("modules.farewell", ConfigValue::Str("formal".into()));

        assert_eq!(registry.get::<dyn Greeting>(&config).unwrap().text(), "hi");
        assert_eq!(
            registry.get::<dyn Farewell>(&config).unwrap().text(),
            "goodbye"
        );
    }

    #[test]
    fn unbound_interface_is_an_error() {
        let mut registry = ModuleRegistry::new();
        let config = ConfigStore::new();
        let err = registry.get::<dyn Greeting>(&config).unwrap_err();
        assert!(matches!(err, ModuleError::UnboundInterface { .. }));
    }

    #[test]
    fn take_hands_over_ownership() {
        let mut registry = ModuleRegistry::new();
        registry.bind_interface::<dyn Greeting>("modules.greeting");
        registry
            .implementation::<dyn Greeting>("terse", || Box::new(Terse))
            .unwrap();
        let config = ConfigStore::new().with("modules.greeting", ConfigValue::Str("terse".into()));

        let boxed: Box<dyn Greeting> = registry.take::<dyn Greeting>(&config).unwrap();
        assert_eq!(boxed.text(), "hi");
    }
}
