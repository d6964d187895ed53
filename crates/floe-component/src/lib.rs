//! The [`Component`] trait and its declaration vocabulary.
//!
//! A component is one unit of simulation logic. It declares the arrays it
//! supplies and the arrays it requires; the assembler uses those
//! declarations to order updates (suppliers strictly before requesters)
//! and to enforce the single-writer discipline at bind time. Per step,
//! each component's [`update`](Component::update) is a pure function of
//! its bound inputs writing only its declared outputs.
//!
//! The crate also defines the fixed interfaces behind which the external
//! collaborators sit: [`Structure`] (the grid) and [`DiagnosticOutput`]
//! (periodic serialization).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod component;
pub mod context;
pub mod decl;
pub mod external;

pub use component::Component;
pub use context::StepContext;
pub use decl::{Access, Request, Requirement, Sharing, Supply};
pub use external::{DiagnosticOutput, GridDims, Structure};
