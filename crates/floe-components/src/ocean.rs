//! Background ocean state.

use floe_component::{Component, Requirement, Sharing, StepContext, Supply};
use floe_core::{ConfigError, ConfigStore, DimTag, UpdateError};
use floe_store::{shape, ArrayStore, StoreError, WriteRef};

use crate::fields;
use crate::freezing::FreezingPoint;

/// Supplies constant background sea surface temperature and salinity,
/// plus the freezing temperature from the configured law.
///
/// A background below the freezing temperature is the supercooling that
/// drives [`IceGrowth`](crate::IceGrowth); the ocean reports it as-is
/// rather than clamping, leaving the thermodynamic response to the ice.
/// The law is resolved through the module registry at construction and
/// owned by the component thereafter.
pub struct OceanBackground {
    law: Box<dyn FreezingPoint>,
    nx: usize,
    ny: usize,
    sst0: f64,
    sss0: f64,
    sst: Option<WriteRef>,
    sss: Option<WriteRef>,
    tfz: Option<WriteRef>,
}

impl OceanBackground {
    /// Create the component around an already-selected freezing-point
    /// law.
    pub fn new(law: Box<dyn FreezingPoint>) -> Self {
        Self {
            law,
            nx: 0,
            ny: 0,
            sst0: 0.0,
            sss0: 0.0,
            sst: None,
            sss: None,
            tfz: None,
        }
    }
}

impl Component for OceanBackground {
    fn name(&self) -> &str {
        "ocean_background"
    }

    fn configure(&mut self, config: &ConfigStore) -> Result<(), ConfigError> {
        self.nx = config.integer("grid.nx")? as usize;
        self.ny = config.integer("grid.ny")? as usize;
        self.sst0 = config.real_or("ocean.sst", 271.35)?;
        self.sss0 = if config.contains("ocean.sss") {
            config.real_in_range("ocean.sss", 0.0, 45.0)?
        } else {
            32.0
        };
        Ok(())
    }

    fn supplies(&self) -> Vec<Supply> {
        let layout = Some(shape(&[self.nx, self.ny]));
        vec![
            Supply {
                id: fields::sst(),
                tag: DimTag::Horizontal,
                shape: layout.clone(),
                sharing: Sharing::Shared,
            },
            Supply {
                id: fields::sss(),
                tag: DimTag::Horizontal,
                shape: layout.clone(),
                sharing: Sharing::Shared,
            },
            Supply {
                id: fields::freezing_temp(),
                tag: DimTag::Horizontal,
                shape: layout,
                sharing: Sharing::Shared,
            },
        ]
    }

    fn requires(&self) -> Vec<Requirement> {
        vec![]
    }

    fn register_supplied(&mut self, store: &mut ArrayStore) -> Result<(), StoreError> {
        let layout = shape(&[self.nx, self.ny]);
        for id in [fields::sst(), fields::sss(), fields::freezing_temp()] {
            store.declare(id, DimTag::Horizontal, layout.clone())?;
        }
        self.sst = Some(store.bind_write(&fields::sst(), self.name())?);
        self.sss = Some(store.bind_write(&fields::sss(), self.name())?);
        self.tfz = Some(store.bind_write(&fields::freezing_temp(), self.name())?);
        Ok(())
    }

    fn bind_required(&mut self, _store: &mut ArrayStore) -> Result<(), StoreError> {
        Ok(())
    }

    fn update(&mut self, ctx: &StepContext<'_>) -> Result<(), UpdateError> {
        let tf = self.law.freezing_point(self.sss0);
        let store = ctx.store();
        store
            .write(self.sss.as_ref().ok_or_else(unbound)?)
            .fill(self.sss0);
        store
            .write(self.tfz.as_ref().ok_or_else(unbound)?)
            .fill(tf);
        store
            .write(self.sst.as_ref().ok_or_else(unbound)?)
            .fill(self.sst0);
        Ok(())
    }
}

fn unbound() -> UpdateError {
    UpdateError::ExecutionFailed {
        reason: "ocean arrays not bound".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freezing::LinearFreezing;
    use floe_core::{ConfigValue, TimestepTime};

    fn config() -> ConfigStore {
        ConfigStore::new()
            .with("grid.nx", ConfigValue::Integer(3))
            .with("grid.ny", ConfigValue::Integer(2))
            .with("ocean.sst", ConfigValue::Real(270.0))
            .with("ocean.sss", ConfigValue::Real(30.0))
    }

    #[test]
    fn supplies_background_state_and_freezing_temperature() {
        let mut ocean = OceanBackground::new(Box::new(LinearFreezing));
        ocean.configure(&config()).unwrap();

        let mut store = ArrayStore::new();
        ocean.register_supplied(&mut store).unwrap();
        ocean
            .update(&StepContext::new(&store, TimestepTime::new(0.0, 1.0)))
            .unwrap();

        let tf = 273.15 - 0.055 * 30.0;
        // 270.0 sits below freezing and is reported as-is.
        assert_eq!(store.snapshot(&fields::sst()).unwrap().at(0, 0), 270.0);
        assert_eq!(store.snapshot(&fields::freezing_temp()).unwrap().at(2, 1), tf);
        assert_eq!(store.snapshot(&fields::sss()).unwrap().at(1, 0), 30.0);
    }

    #[test]
    fn out_of_range_salinity_is_rejected() {
        let config = config().with("ocean.sss", ConfigValue::Real(99.0));
        let mut ocean = OceanBackground::new(Box::new(LinearFreezing));
        assert!(ocean.configure(&config).is_err());
    }
}
