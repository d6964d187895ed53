//! The assembled model: components in dependency order over a shared
//! array store.

use floe_component::{Access, Component, DiagnosticOutput, StepContext};
use floe_core::{ArrayId, TimestepTime, UpdateError};
use floe_store::ArrayStore;

use crate::iterant::{IterateError, Iterant, Phase};

/// A fully assembled model, ready to iterate.
///
/// Produced by [`Assembler::assemble`](crate::Assembler::assemble);
/// cannot be constructed in a partially wired state. Components are held
/// in the topological update order the assembler computed, so each step
/// runs suppliers strictly before their requesters.
///
/// After each component's update the engine scans that component's
/// output arrays for non-finite values; the first offending cell fails
/// the step with [`UpdateError::NonFinite`] naming the array and index.
pub struct Model {
    components: Vec<Box<dyn Component>>,
    /// Per component, the declared arrays it writes: its supplies plus
    /// its read-write requirements, restricted to declared identities.
    outputs: Vec<Vec<ArrayId>>,
    store: ArrayStore,
    diagnostic_ids: Vec<ArrayId>,
    phase: Phase,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("components", &self.components.len())
            .field("outputs", &self.outputs)
            .field("store", &self.store)
            .field("diagnostic_ids", &self.diagnostic_ids)
            .field("phase", &self.phase)
            .finish()
    }
}

impl Model {
    pub(crate) fn new(components: Vec<Box<dyn Component>>, store: ArrayStore) -> Self {
        let diagnostic_ids = store.ids().cloned().collect();
        let outputs = components
            .iter()
            .map(|component| {
                let mut ids: Vec<ArrayId> =
                    component.supplies().into_iter().map(|s| s.id).collect();
                ids.extend(
                    component
                        .requires()
                        .into_iter()
                        .filter(|r| r.access == Access::ReadWrite)
                        .map(|r| r.id),
                );
                // Request-and-supply arrays nobody requested were never
                // declared; skip them.
                ids.retain(|id| store.contains(id));
                ids
            })
            .collect();
        Self {
            components,
            outputs,
            store,
            diagnostic_ids,
            phase: Phase::Unstarted,
        }
    }

    /// The shared array store.
    pub fn store(&self) -> &ArrayStore {
        &self.store
    }

    /// Mutable access to the store, for external collaborators loading
    /// initial state before the run starts.
    pub fn store_mut(&mut self) -> &mut ArrayStore {
        &mut self.store
    }

    /// Component names in update order.
    pub fn component_order(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Restrict diagnostic output to the given arrays.
    ///
    /// The default selection is every declared array, in declaration
    /// order.
    pub fn select_diagnostics(&mut self, ids: Vec<ArrayId>) {
        self.diagnostic_ids = ids;
    }

    /// Arrays currently selected for diagnostic output.
    pub fn diagnostics(&self) -> &[ArrayId] {
        &self.diagnostic_ids
    }

    /// Hand the selected arrays to a diagnostic sink for one completed
    /// timestep.
    ///
    /// Invoked by the driver loop after each successful step; components
    /// never call this themselves.
    pub fn write_diagnostics(
        &self,
        time: TimestepTime,
        sink: &mut dyn DiagnosticOutput,
    ) -> Result<(), UpdateError> {
        sink.write(time, &self.store, &self.diagnostic_ids)
    }
}

impl Iterant for Model {
    fn start(&mut self, _at: f64) -> Result<(), IterateError> {
        if self.phase != Phase::Unstarted {
            return Err(IterateError::AlreadyStarted);
        }
        self.phase = Phase::Running;
        Ok(())
    }

    fn step(&mut self, time: TimestepTime) -> Result<(), IterateError> {
        if self.phase != Phase::Running {
            return Err(IterateError::NotRunning);
        }
        for (component, outputs) in self.components.iter_mut().zip(&self.outputs) {
            let ctx = StepContext::new(&self.store, time);
            component
                .update(&ctx)
                .map_err(|reason| IterateError::Component {
                    name: component.name().to_string(),
                    reason,
                })?;
            for id in outputs {
                if let Ok(Some(index)) = self.store.first_non_finite(id) {
                    return Err(IterateError::Component {
                        name: component.name().to_string(),
                        reason: UpdateError::NonFinite {
                            id: id.clone(),
                            index,
                        },
                    });
                }
            }
        }
        Ok(())
    }

    fn stop(&mut self, _at: f64) {
        self.phase = Phase::Stopped;
    }
}
