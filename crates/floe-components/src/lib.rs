//! Reference components for the Floe coupled-model kernel.
//!
//! Provides working components that exercise the full assembly and
//! iteration pipeline: a background ocean, trivial thermodynamic ice
//! growth, deterministic perturbation, on-request atmospheric forcing,
//! and a wait-discipline heat budget, plus the grid and diagnostics
//! collaborators. The physics is deliberately minimal; the point of
//! these components is the dataflow between them.
//!
//! # Pipeline order (each step, as the assembler schedules it)
//!
//! 1. [`OceanBackground`]: supplies `sst`, `sss`, `freezingTemp`
//! 2. [`AtmosphereForcing`]: supplies `airTemp` on request
//! 3. [`IceGrowth`]: reads `sst` and `freezingTemp`, supplies
//!    `iceThickness` and `iceConcentration`
//! 4. [`HeatBudget`]: reads `sst`; its `heatBudget` readers run a step
//!    ahead of it under the wait discipline

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod atmosphere;
pub mod diagnostics;
pub mod fields;
pub mod freezing;
pub mod grid;
pub mod heat;
pub mod ice;
pub mod ocean;
pub mod perturbation;

pub use atmosphere::AtmosphereForcing;
pub use diagnostics::{Frame, MemoryDiagnostics, NullDiagnostics};
pub use freezing::{FreezingPoint, LinearFreezing, UnescoFreezing};
pub use grid::PlanarGrid;
pub use heat::HeatBudget;
pub use ice::IceGrowth;
pub use ocean::OceanBackground;
pub use perturbation::Perturbation;
