//! On-request atmospheric forcing.

use floe_component::{Component, Request, Requirement, Sharing, StepContext, Supply};
use floe_core::{ConfigError, ConfigStore, DimTag, UpdateError};
use floe_store::{ArrayStore, Shape, StoreError, WriteRef};

use crate::fields;

/// Supplies `airTemp` under the request-and-supply discipline.
///
/// The array is declared only if some component requested it, and with
/// exactly the layout the request named. With no requester the
/// component assembles and its updates do nothing. The temperature is
/// a configured mean plus a diurnal sine.
pub struct AtmosphereForcing {
    mean: f64,
    diurnal_amplitude: f64,
    requested: Option<(DimTag, Shape)>,
    out: Option<WriteRef>,
}

impl AtmosphereForcing {
    /// Create the component; it declares nothing until requested.
    pub fn new() -> Self {
        Self {
            mean: 0.0,
            diurnal_amplitude: 0.0,
            requested: None,
            out: None,
        }
    }
}

impl Default for AtmosphereForcing {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AtmosphereForcing {
    fn name(&self) -> &str {
        "atmosphere_forcing"
    }

    fn configure(&mut self, config: &ConfigStore) -> Result<(), ConfigError> {
        self.mean = config.real_or("atmosphere.air_temp", 263.0)?;
        self.diurnal_amplitude = config.real_or("atmosphere.diurnal_amplitude", 5.0)?;
        Ok(())
    }

    fn supplies(&self) -> Vec<Supply> {
        vec![Supply {
            id: fields::air_temp(),
            tag: DimTag::Horizontal,
            shape: None,
            sharing: Sharing::RequestAndSupply,
        }]
    }

    fn requires(&self) -> Vec<Requirement> {
        vec![]
    }

    fn respond(&mut self, requests: &[Request]) {
        for request in requests {
            if request.id == fields::air_temp() {
                self.requested = Some((request.tag, request.shape.clone()));
            }
        }
    }

    fn register_supplied(&mut self, store: &mut ArrayStore) -> Result<(), StoreError> {
        if let Some((tag, layout)) = self.requested.clone() {
            store.declare(fields::air_temp(), tag, layout)?;
            self.out = Some(store.bind_write(&fields::air_temp(), self.name())?);
        }
        Ok(())
    }

    fn bind_required(&mut self, _store: &mut ArrayStore) -> Result<(), StoreError> {
        Ok(())
    }

    fn update(&mut self, ctx: &StepContext<'_>) -> Result<(), UpdateError> {
        let Some(out) = &self.out else {
            // Nothing requested the array; nothing to do.
            return Ok(());
        };
        let phase = ctx.time().start / 86_400.0 * std::f64::consts::TAU;
        let value = self.mean + self.diurnal_amplitude * phase.sin();
        ctx.store().write(out).fill(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::TimestepTime;
    use floe_store::shape;

    fn requested() -> Request {
        Request {
            id: fields::air_temp(),
            tag: DimTag::Horizontal,
            shape: shape(&[2, 2]),
            requester: "test".to_string(),
        }
    }

    #[test]
    fn declares_only_when_requested() {
        let mut atmos = AtmosphereForcing::new();
        atmos.configure(&ConfigStore::new()).unwrap();

        let mut store = ArrayStore::new();
        atmos.register_supplied(&mut store).unwrap();
        assert!(!store.contains(&fields::air_temp()));

        atmos.respond(&[requested()]);
        atmos.register_supplied(&mut store).unwrap();
        assert_eq!(
            store.layout_of(&fields::air_temp()),
            Some((DimTag::Horizontal, shape(&[2, 2])))
        );
    }

    #[test]
    fn diurnal_cycle_peaks_at_quarter_day() {
        let mut atmos = AtmosphereForcing::new();
        atmos.configure(&ConfigStore::new()).unwrap();
        atmos.respond(&[requested()]);

        let mut store = ArrayStore::new();
        atmos.register_supplied(&mut store).unwrap();

        let quarter_day = 21_600.0;
        atmos
            .update(&StepContext::new(&store, TimestepTime::new(quarter_day, 1.0)))
            .unwrap();
        let peak = store.snapshot(&fields::air_temp()).unwrap().at(0, 0);
        assert!((peak - 268.0).abs() < 1e-9, "peak {peak}");
    }

    #[test]
    fn unrequested_update_is_a_noop() {
        let mut atmos = AtmosphereForcing::new();
        atmos.configure(&ConfigStore::new()).unwrap();
        let store = ArrayStore::new();
        atmos
            .update(&StepContext::new(&store, TimestepTime::new(0.0, 1.0)))
            .unwrap();
    }
}
