//! Deterministic field perturbation.

use floe_component::{Component, Requirement, StepContext, Supply};
use floe_core::{ArrayId, ConfigError, ConfigStore, UpdateError};
use floe_store::{ArrayStore, StoreError, WriteRef};
use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Adds uniform noise to one array each step.
///
/// Takes read-write access to its target, becoming the array's
/// writer-of-record; the target must therefore have no other writer
/// (an externally declared array, or a supply whose component does not
/// bind write access itself).
///
/// Deterministic: the RNG is reseeded each step from
/// `seed XOR bits(time.start)`, so identical configuration and schedule
/// reproduce the identical noise sequence.
pub struct Perturbation {
    target: ArrayId,
    seed: u64,
    amplitude: f64,
    out: Option<WriteRef>,
}

impl Perturbation {
    /// Create a perturbation of the given array.
    pub fn new(target: ArrayId) -> Self {
        Self {
            target,
            seed: 0,
            amplitude: 0.0,
            out: None,
        }
    }
}

impl Component for Perturbation {
    fn name(&self) -> &str {
        "perturbation"
    }

    fn configure(&mut self, config: &ConfigStore) -> Result<(), ConfigError> {
        self.seed = config.integer_or("perturbation.seed", 0)? as u64;
        self.amplitude = config.real_or("perturbation.amplitude", 0.01)?;
        Ok(())
    }

    fn supplies(&self) -> Vec<Supply> {
        vec![]
    }

    fn requires(&self) -> Vec<Requirement> {
        vec![Requirement::write(self.target.clone())]
    }

    fn register_supplied(&mut self, _store: &mut ArrayStore) -> Result<(), StoreError> {
        Ok(())
    }

    fn bind_required(&mut self, store: &mut ArrayStore) -> Result<(), StoreError> {
        self.out = Some(store.bind_write(&self.target, self.name())?);
        Ok(())
    }

    fn update(&mut self, ctx: &StepContext<'_>) -> Result<(), UpdateError> {
        let out = self.out.as_ref().ok_or_else(|| UpdateError::ExecutionFailed {
            reason: "perturbation target not bound".to_string(),
        })?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ ctx.time().start.to_bits());
        let mut array = ctx.store().write(out);
        for v in array.as_mut_slice() {
            *v += self.amplitude * (2.0 * rng.random::<f64>() - 1.0);
        }
        Ok(())
    }
}
