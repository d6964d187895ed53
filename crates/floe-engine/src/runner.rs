//! The driver loop.

use std::error::Error;
use std::fmt;

use floe_component::DiagnosticOutput;
use floe_core::UpdateError;

use crate::iterant::{IterateError, Iterant};
use crate::model::Model;
use crate::schedule::{CancelFlag, Schedule};

/// A failure that terminated a run early.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The iterant tree failed to start or step.
    Iterate(IterateError),
    /// The diagnostic sink failed after a step.
    Diagnostics {
        /// The underlying write failure.
        reason: UpdateError,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iterate(source) => source.fmt(f),
            Self::Diagnostics { reason } => write!(f, "diagnostic output failed: {reason}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Iterate(source) => Some(source),
            Self::Diagnostics { reason } => Some(reason),
        }
    }
}

impl From<IterateError> for RunError {
    fn from(source: IterateError) -> Self {
        Self::Iterate(source)
    }
}

/// Drives an iterant tree over a [`Schedule`].
///
/// The loop is: `start` once, then one `step` per schedule interval with
/// the cancellation flag checked before each, then `stop` exactly once,
/// whether the loop completed, was cancelled, a step failed, or `start`
/// itself failed. A cancelled run keeps the writes of every completed
/// step; nothing is rolled back.
pub struct Runner {
    schedule: Schedule,
    cancel: CancelFlag,
}

impl Runner {
    /// Create a runner over a schedule with a fresh cancellation flag.
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            cancel: CancelFlag::new(),
        }
    }

    /// The schedule this runner drives.
    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// A handle that cancels the run between timesteps.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Run an iterant tree to completion, cancellation, or failure.
    ///
    /// Returns the number of steps that completed.
    pub fn run(&mut self, iterant: &mut dyn Iterant) -> Result<u64, RunError> {
        if let Err(err) = iterant.start(self.schedule.start) {
            iterant.stop(self.schedule.start);
            return Err(err.into());
        }
        let mut completed = 0u64;
        let mut now = self.schedule.start;
        for time in self.schedule.times() {
            if self.cancel.is_cancelled() {
                break;
            }
            if let Err(err) = iterant.step(time) {
                iterant.stop(now);
                return Err(err.into());
            }
            completed += 1;
            now = time.end();
        }
        iterant.stop(now);
        Ok(completed)
    }

    /// Run a [`Model`], handing the selected arrays to the diagnostic
    /// sink after each successful step.
    ///
    /// Diagnostics are driver-invoked only; a sink failure terminates
    /// the run like a step failure, with `stop` still guaranteed.
    pub fn run_model(
        &mut self,
        model: &mut Model,
        sink: &mut dyn DiagnosticOutput,
    ) -> Result<u64, RunError> {
        if let Err(err) = model.start(self.schedule.start) {
            model.stop(self.schedule.start);
            return Err(err.into());
        }
        let mut completed = 0u64;
        let mut now = self.schedule.start;
        for time in self.schedule.times() {
            if self.cancel.is_cancelled() {
                break;
            }
            if let Err(err) = model.step(time) {
                model.stop(now);
                return Err(err.into());
            }
            completed += 1;
            now = time.end();
            if let Err(reason) = model.write_diagnostics(time, sink) {
                model.stop(now);
                return Err(RunError::Diagnostics { reason });
            }
        }
        model.stop(now);
        Ok(completed)
    }
}
