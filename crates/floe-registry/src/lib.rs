//! The configuration-driven module registry.
//!
//! Every polymorphic interface in a Floe model (grid structure,
//! freezing-point law, diagnostic output) is resolved through
//! [`ModuleRegistry`], and nowhere else. An interface is bound to a
//! configuration key; implementations register under string names; the
//! configured name selects which concrete type is constructed. The first
//! `get` constructs and memoizes the instance, subsequent `get`s return
//! the same one.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod module;
mod registry;

pub use error::ModuleError;
pub use module::Module;
pub use registry::ModuleRegistry;
