//! Surface heat budget under the wait discipline.

use floe_component::{Component, Requirement, Sharing, StepContext, Supply};
use floe_core::{ConfigError, ConfigStore, DimTag, UpdateError};
use floe_store::{shape, ArrayStore, ReadRef, StoreError, WriteRef};

use crate::fields;

/// Supplies `heatBudget` with [`Sharing::SupplyAndWait`]: components
/// reading the budget are scheduled before this one and therefore see
/// the previous step's value.
///
/// The budget itself is a bulk exchange toward a configured reference
/// temperature, `q = c * (sst - t_ref)`, in W m^-2.
pub struct HeatBudget {
    nx: usize,
    ny: usize,
    exchange_coeff: f64,
    reference_temp: f64,
    sst: Option<ReadRef>,
    out: Option<WriteRef>,
}

impl HeatBudget {
    /// Create the component with unconfigured defaults.
    pub fn new() -> Self {
        Self {
            nx: 0,
            ny: 0,
            exchange_coeff: 0.0,
            reference_temp: 0.0,
            sst: None,
            out: None,
        }
    }
}

impl Default for HeatBudget {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HeatBudget {
    fn name(&self) -> &str {
        "heat_budget"
    }

    fn configure(&mut self, config: &ConfigStore) -> Result<(), ConfigError> {
        self.nx = config.integer("grid.nx")? as usize;
        self.ny = config.integer("grid.ny")? as usize;
        self.exchange_coeff = config.real_or("heat.exchange_coeff", 15.0)?;
        self.reference_temp = config.real_or("heat.reference_temp", 271.35)?;
        Ok(())
    }

    fn supplies(&self) -> Vec<Supply> {
        vec![Supply {
            id: fields::heat_budget(),
            tag: DimTag::Horizontal,
            shape: Some(shape(&[self.nx, self.ny])),
            sharing: Sharing::SupplyAndWait,
        }]
    }

    fn requires(&self) -> Vec<Requirement> {
        vec![Requirement::read(fields::sst())]
    }

    fn register_supplied(&mut self, store: &mut ArrayStore) -> Result<(), StoreError> {
        store.declare(
            fields::heat_budget(),
            DimTag::Horizontal,
            shape(&[self.nx, self.ny]),
        )?;
        self.out = Some(store.bind_write(&fields::heat_budget(), self.name())?);
        Ok(())
    }

    fn bind_required(&mut self, store: &mut ArrayStore) -> Result<(), StoreError> {
        self.sst = Some(store.bind_read(&fields::sst(), self.name())?);
        Ok(())
    }

    fn update(&mut self, ctx: &StepContext<'_>) -> Result<(), UpdateError> {
        let (sst, out) = match (&self.sst, &self.out) {
            (Some(sst), Some(out)) => (sst, out),
            _ => {
                return Err(UpdateError::ExecutionFailed {
                    reason: "heat budget arrays not bound".to_string(),
                })
            }
        };
        let store = ctx.store();
        let sst = store.read(sst);
        let mut budget = store.write(out);
        for i in 0..budget.len() {
            budget.as_mut_slice()[i] = self.exchange_coeff * (sst.as_slice()[i] - self.reference_temp);
        }
        Ok(())
    }
}
