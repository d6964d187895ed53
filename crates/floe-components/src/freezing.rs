//! The freezing-point interface and its registered implementations.
//!
//! The showcase for the module registry: two interchangeable laws bound
//! under `ocean.freezing_point`, selected by configuration at assembly.

use floe_registry::ModuleRegistry;

/// Freezing point of seawater as a function of salinity.
pub trait FreezingPoint {
    /// Freezing temperature in Kelvin at the given salinity (psu),
    /// at surface pressure.
    fn freezing_point(&self, salinity: f64) -> f64;
}

/// Linear law: depression proportional to salinity.
pub struct LinearFreezing;

impl FreezingPoint for LinearFreezing {
    fn freezing_point(&self, salinity: f64) -> f64 {
        273.15 - 0.055 * salinity
    }
}

/// UNESCO (Millero 1978) polynomial law at zero pressure.
pub struct UnescoFreezing;

impl FreezingPoint for UnescoFreezing {
    fn freezing_point(&self, salinity: f64) -> f64 {
        let s = salinity;
        273.15 - 0.0575 * s + 1.710523e-3 * s.powf(1.5) - 2.154996e-4 * s * s
    }
}

/// Bind the interface and register both laws, with `linear` as the
/// default when `ocean.freezing_point` is absent.
pub fn register(registry: &mut ModuleRegistry) {
    registry.bind_interface::<dyn FreezingPoint>("ocean.freezing_point");
    registry
        .implementation::<dyn FreezingPoint>("linear", || Box::new(LinearFreezing))
        .expect("interface bound above");
    registry
        .implementation::<dyn FreezingPoint>("unesco", || Box::new(UnescoFreezing))
        .expect("interface bound above");
    registry
        .set_default::<dyn FreezingPoint>("linear")
        .expect("interface bound above");
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::{ConfigStore, ConfigValue};

    #[test]
    fn fresh_water_freezes_at_zero_celsius() {
        assert_eq!(LinearFreezing.freezing_point(0.0), 273.15);
        assert_eq!(UnescoFreezing.freezing_point(0.0), 273.15);
    }

    #[test]
    fn laws_agree_to_first_order_at_ocean_salinity() {
        let linear = LinearFreezing.freezing_point(35.0);
        let unesco = UnescoFreezing.freezing_point(35.0);
        assert!((linear - unesco).abs() < 0.2, "{linear} vs {unesco}");
        // Both depress the freezing point below fresh water.
        assert!(linear < 273.15);
        assert!(unesco < 273.15);
    }

    #[test]
    fn configuration_selects_the_law() {
        let mut registry = ModuleRegistry::new();
        register(&mut registry);

        let config = ConfigStore::new().with("ocean.freezing_point", ConfigValue::Str("unesco".into()));
        let law = registry.take::<dyn FreezingPoint>(&config).unwrap();
        assert_eq!(law.freezing_point(0.0), 273.15);

        // Absent key falls back to the linear default.
        let mut registry = ModuleRegistry::new();
        register(&mut registry);
        let law = registry.take::<dyn FreezingPoint>(&ConfigStore::new()).unwrap();
        assert_eq!(law.freezing_point(10.0), 273.15 - 0.55);
    }
}
