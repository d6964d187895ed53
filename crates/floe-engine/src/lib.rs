//! Assembly and iteration for the Floe coupled-model kernel.
//!
//! [`Assembler`] performs the one-time startup phase: it configures the
//! components, routes supply requests, registers and binds every array,
//! and topologically orders updates (suppliers strictly before
//! requesters). The result is a [`Model`], an [`Iterant`] that runs each
//! component's update in dependency order per step. [`Runner`] drives an
//! iterant tree over the configured [`Schedule`], checking a cancellation
//! flag between timesteps and guaranteeing `stop()` runs exactly once,
//! even when a step fails.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod assembly;
pub mod iterant;
pub mod model;
pub mod runner;
pub mod schedule;

pub use assembly::{Assembler, AssemblyError};
pub use iterant::{IterateError, Iterant, Phase, Sequence};
pub use model::Model;
pub use runner::{RunError, Runner};
pub use schedule::{CancelFlag, Schedule};
