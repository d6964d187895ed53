//! Supply and requirement declarations.
//!
//! These are assembly-time metadata: the assembler queries them once to
//! build the dependency graph, validate the request/supply protocol, and
//! install access lists. They are never consulted per step.

use floe_core::{ArrayId, DimTag};
use floe_store::Shape;

/// Declared access mode of a requirement.
///
/// This is the runtime half of the access story; the references a
/// component actually holds carry the mode in their type
/// ([`ReadRef`](floe_store::ReadRef) / [`WriteRef`](floe_store::WriteRef))
/// and are checked when they bind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Immutable view; any number may coexist.
    ReadOnly,
    /// Mutable view; registers the holder as writer-of-record.
    ReadWrite,
}

/// Sharing discipline of a supplied array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sharing {
    /// Visible read-only to any number of downstream components.
    Shared,
    /// Visible only to the enumerated components; binding by anyone else
    /// fails with `AccessDenied`.
    SemiShared {
        /// Component names permitted to bind.
        readers: Vec<String>,
    },
    /// Declared only in response to a request: a downstream component
    /// requests the array (with a layout) before assembly completes, and
    /// the supplier guarantees it exists with a matching layout by bind
    /// time. Unanswered requests fail assembly.
    RequestAndSupply,
    /// The supplier's update runs only after all known requesters have
    /// completed theirs in the same timestep. Enforced by dependency
    /// ordering at assembly, not by a runtime barrier: the usual
    /// supplier→requester edges are inverted for these arrays, so
    /// requesters observe the previous step's value.
    SupplyAndWait,
}

/// One array a component declares as output.
#[derive(Clone, Debug)]
pub struct Supply {
    /// Identity of the supplied array.
    pub id: ArrayId,
    /// Semantic layout tag.
    pub tag: DimTag,
    /// Dimension sizes. `None` for [`Sharing::RequestAndSupply`], whose
    /// layout comes from the request.
    pub shape: Option<Shape>,
    /// Sharing discipline.
    pub sharing: Sharing,
}

/// One array a component declares as input.
#[derive(Clone, Debug)]
pub struct Requirement {
    /// Identity of the required array.
    pub id: ArrayId,
    /// Access mode the component will bind with.
    pub access: Access,
    /// For arrays supplied under [`Sharing::RequestAndSupply`]: the
    /// layout this component is requesting. `None` for plain
    /// requirements.
    pub request: Option<(DimTag, Shape)>,
}

impl Requirement {
    /// A plain read-only requirement.
    pub fn read(id: ArrayId) -> Self {
        Self {
            id,
            access: Access::ReadOnly,
            request: None,
        }
    }

    /// A read-write requirement on an array supplied elsewhere.
    pub fn write(id: ArrayId) -> Self {
        Self {
            id,
            access: Access::ReadWrite,
            request: None,
        }
    }

    /// A read-only requirement that also issues a request for the array
    /// to exist with the given layout.
    pub fn requesting(id: ArrayId, tag: DimTag, shape: Shape) -> Self {
        Self {
            id,
            access: Access::ReadOnly,
            request: Some((tag, shape)),
        }
    }
}

/// A request assembled from a [`Requirement::requesting`] declaration,
/// presented to every component before arrays are registered.
#[derive(Clone, Debug)]
pub struct Request {
    /// Identity being requested.
    pub id: ArrayId,
    /// Requested layout tag.
    pub tag: DimTag,
    /// Requested dimension sizes.
    pub shape: Shape,
    /// Name of the requesting component, for diagnostics.
    pub requester: String,
}
