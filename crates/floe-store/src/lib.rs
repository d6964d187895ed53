//! The semantic array store: named, multi-dimensional field data shared
//! between components by access-controlled references.
//!
//! [`ArrayStore`] owns every model array, keyed by [`ArrayId`]
//! (category + name). Components declare the arrays they supply at
//! assembly, then bind [`ReadRef`]/[`WriteRef`] handles to the arrays they
//! require. Resolution happens once at bind time; per-step access goes
//! through the cached handle, not a name lookup.
//!
//! The write discipline is structural, not lock-based: at most one
//! component may be writer-of-record for an identity, enforced when the
//! reference binds. The single-threaded, dependency-ordered execution
//! model makes runtime locking unnecessary.
//!
//! [`ArrayId`]: floe_core::ArrayId

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod error;
pub mod refs;
pub mod store;

pub use array::{shape, Array, Shape};
pub use error::StoreError;
pub use refs::{AccessMode, ArrayRef, ReadOnly, ReadRef, ReadWrite, WriteRef};
pub use store::ArrayStore;
