//! Trivial thermodynamic ice growth.

use floe_component::{Component, Requirement, Sharing, StepContext, Supply};
use floe_core::{ConfigError, ConfigStore, DimTag, UpdateError};
use floe_store::{shape, ArrayStore, ReadRef, StoreError, WriteRef};

use crate::fields;

/// Grows or melts ice toward the freezing deficit of the surface water.
///
/// Each step, per cell:
///
/// ```text
/// h   += rate * dt * (freezingTemp - sst)    (clamped at 0)
/// conc = h / (h + h_ref)
/// ```
///
/// so ice grows while the surface is below freezing and melts above it.
/// No real thermodynamics; the component exists to consume the ocean's
/// supplies and feed the diagnostic path.
pub struct IceGrowth {
    nx: usize,
    ny: usize,
    /// Metres of ice per second per Kelvin of freezing deficit.
    rate: f64,
    /// Thickness at which concentration reaches one half.
    h_ref: f64,
    sst: Option<ReadRef>,
    tfz: Option<ReadRef>,
    thickness: Option<WriteRef>,
    concentration: Option<WriteRef>,
}

impl IceGrowth {
    /// Create the component with unconfigured defaults.
    pub fn new() -> Self {
        Self {
            nx: 0,
            ny: 0,
            rate: 0.0,
            h_ref: 0.0,
            sst: None,
            tfz: None,
            thickness: None,
            concentration: None,
        }
    }
}

impl Default for IceGrowth {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for IceGrowth {
    fn name(&self) -> &str {
        "ice_growth"
    }

    fn configure(&mut self, config: &ConfigStore) -> Result<(), ConfigError> {
        self.nx = config.integer("grid.nx")? as usize;
        self.ny = config.integer("grid.ny")? as usize;
        self.rate = config.real_or("ice.growth_rate", 1.0e-7)?;
        self.h_ref = config.real_or("ice.reference_thickness", 0.1)?;
        Ok(())
    }

    fn supplies(&self) -> Vec<Supply> {
        let layout = Some(shape(&[self.nx, self.ny]));
        vec![
            Supply {
                id: fields::ice_thickness(),
                tag: DimTag::Horizontal,
                shape: layout.clone(),
                sharing: Sharing::Shared,
            },
            Supply {
                id: fields::ice_concentration(),
                tag: DimTag::Horizontal,
                shape: layout,
                sharing: Sharing::Shared,
            },
        ]
    }

    fn requires(&self) -> Vec<Requirement> {
        vec![
            Requirement::read(fields::sst()),
            Requirement::read(fields::freezing_temp()),
        ]
    }

    fn register_supplied(&mut self, store: &mut ArrayStore) -> Result<(), StoreError> {
        let layout = shape(&[self.nx, self.ny]);
        store.declare(fields::ice_thickness(), DimTag::Horizontal, layout.clone())?;
        store.declare(fields::ice_concentration(), DimTag::Horizontal, layout)?;
        self.thickness = Some(store.bind_write(&fields::ice_thickness(), self.name())?);
        self.concentration = Some(store.bind_write(&fields::ice_concentration(), self.name())?);
        Ok(())
    }

    fn bind_required(&mut self, store: &mut ArrayStore) -> Result<(), StoreError> {
        self.sst = Some(store.bind_read(&fields::sst(), self.name())?);
        self.tfz = Some(store.bind_read(&fields::freezing_temp(), self.name())?);
        Ok(())
    }

    fn update(&mut self, ctx: &StepContext<'_>) -> Result<(), UpdateError> {
        let store = ctx.store();
        let dt = ctx.dt();
        let (sst, tfz, thickness, concentration) = match (
            &self.sst,
            &self.tfz,
            &self.thickness,
            &self.concentration,
        ) {
            (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
            _ => {
                return Err(UpdateError::ExecutionFailed {
                    reason: "ice arrays not bound".to_string(),
                })
            }
        };

        let sst = store.read(sst);
        let tfz = store.read(tfz);
        let mut h = store.write(thickness);
        let mut conc = store.write(concentration);
        for i in 0..h.len() {
            let deficit = tfz.as_slice()[i] - sst.as_slice()[i];
            let grown = (h.as_slice()[i] + self.rate * dt * deficit).max(0.0);
            h.as_mut_slice()[i] = grown;
            conc.as_mut_slice()[i] = grown / (grown + self.h_ref);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::{ArrayId, ConfigValue, TimestepTime};

    fn configured() -> (IceGrowth, ArrayStore) {
        let config = ConfigStore::new()
            .with("grid.nx", ConfigValue::Integer(2))
            .with("grid.ny", ConfigValue::Integer(2))
            .with("ice.growth_rate", ConfigValue::Real(1.0e-6));
        let mut ice = IceGrowth::new();
        ice.configure(&config).unwrap();

        let mut store = ArrayStore::new();
        for id in [fields::sst(), fields::freezing_temp()] {
            store.declare(id, DimTag::Horizontal, shape(&[2, 2])).unwrap();
        }
        ice.register_supplied(&mut store).unwrap();
        ice.bind_required(&mut store).unwrap();
        (ice, store)
    }

    fn fill(store: &ArrayStore, id: &ArrayId, value: f64) {
        let mut data = store.snapshot(id).unwrap();
        data.fill(value);
        store.load(id, &data).unwrap();
    }

    #[test]
    fn ice_grows_below_freezing_and_melts_above() {
        let (mut ice, store) = configured();
        fill(&store, &fields::freezing_temp(), 271.4);
        fill(&store, &fields::sst(), 270.4); // 1 K below freezing

        let step = TimestepTime::new(0.0, 3600.0);
        ice.update(&StepContext::new(&store, step)).unwrap();
        let h1 = store.snapshot(&fields::ice_thickness()).unwrap().at(0, 0);
        assert!((h1 - 3.6e-3).abs() < 1e-12, "grew {h1}");

        // Warm water melts it back to zero, never negative.
        fill(&store, &fields::sst(), 280.0);
        ice.update(&StepContext::new(&store, TimestepTime::new(3600.0, 3600.0)))
            .unwrap();
        let h2 = store.snapshot(&fields::ice_thickness()).unwrap().at(0, 0);
        assert_eq!(h2, 0.0);
        assert_eq!(store.snapshot(&fields::ice_concentration()).unwrap().at(0, 0), 0.0);
    }

    #[test]
    fn concentration_stays_in_unit_interval() {
        let (mut ice, store) = configured();
        fill(&store, &fields::freezing_temp(), 271.4);
        fill(&store, &fields::sst(), 250.0); // extreme deficit

        let mut t = 0.0;
        for _ in 0..1000 {
            ice.update(&StepContext::new(&store, TimestepTime::new(t, 3600.0)))
                .unwrap();
            t += 3600.0;
        }
        let conc = store.snapshot(&fields::ice_concentration()).unwrap().at(0, 0);
        assert!(conc > 0.9 && conc < 1.0, "conc {conc}");
    }
}
