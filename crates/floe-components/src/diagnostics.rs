//! Diagnostic output sinks.

use floe_component::DiagnosticOutput;
use floe_core::{ArrayId, TimestepTime, UpdateError};
use floe_store::{Array, ArrayStore};

/// One captured timestep: the interval and a copy of every selected
/// array.
pub struct Frame {
    /// The completed step's interval.
    pub time: TimestepTime,
    /// Selected arrays, in selection order.
    pub arrays: Vec<(ArrayId, Array)>,
}

impl Frame {
    /// The captured copy of one array, if it was selected.
    pub fn array(&self, id: &ArrayId) -> Option<&Array> {
        self.arrays.iter().find(|(a, _)| a == id).map(|(_, a)| a)
    }
}

/// Captures every frame in memory, for tests and interactive
/// inspection.
#[derive(Default)]
pub struct MemoryDiagnostics {
    frames: Vec<Frame>,
}

impl MemoryDiagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured frames, oldest first.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The most recent frame, if any step has completed.
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl DiagnosticOutput for MemoryDiagnostics {
    fn write(
        &mut self,
        time: TimestepTime,
        store: &ArrayStore,
        selected: &[ArrayId],
    ) -> Result<(), UpdateError> {
        let mut arrays = Vec::with_capacity(selected.len());
        for id in selected {
            let array = store
                .snapshot(id)
                .map_err(|e| UpdateError::ExecutionFailed {
                    reason: format!("diagnostic snapshot of {id}: {e}"),
                })?;
            arrays.push((id.clone(), array));
        }
        self.frames.push(Frame { time, arrays });
        Ok(())
    }
}

/// Discards everything. The sink for runs where only the final store
/// state matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDiagnostics;

impl DiagnosticOutput for NullDiagnostics {
    fn write(
        &mut self,
        _time: TimestepTime,
        _store: &ArrayStore,
        _selected: &[ArrayId],
    ) -> Result<(), UpdateError> {
        Ok(())
    }
}
