//! Execution context passed to components during a timestep.

use floe_core::TimestepTime;
use floe_store::ArrayStore;

/// Context handed to each component's `update` call.
///
/// Carries the array store (components access it through their cached
/// references) and the immutable timestep interval. Constructed by the
/// engine for every step; components never hold onto it.
pub struct StepContext<'a> {
    store: &'a ArrayStore,
    time: TimestepTime,
}

impl<'a> StepContext<'a> {
    /// Construct a context for one timestep.
    ///
    /// Typically called by the engine; tests build one around a
    /// hand-assembled store.
    pub fn new(store: &'a ArrayStore, time: TimestepTime) -> Self {
        Self { store, time }
    }

    /// The array store. Read through bound references with
    /// [`ArrayStore::read`], write with [`ArrayStore::write`].
    pub fn store(&self) -> &ArrayStore {
        self.store
    }

    /// This step's time interval.
    pub fn time(&self) -> TimestepTime {
        self.time
    }

    /// Length of this step's interval in seconds.
    pub fn dt(&self) -> f64 {
        self.time.step
    }
}
