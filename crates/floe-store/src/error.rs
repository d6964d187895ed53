//! Store-specific error types.
//!
//! All of these are binding-time or assembly-time misuse and are fatal:
//! they are surfaced immediately rather than silently ignored.

use std::error::Error;
use std::fmt;

use floe_core::{ArrayId, DimTag};

use crate::array::Shape;

/// Errors from array store operations.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreError {
    /// An identity was declared twice with incompatible layouts.
    DuplicateArray {
        /// The contested identity.
        id: ArrayId,
    },
    /// A shape's rank does not match its dimension tag.
    BadShape {
        /// The identity being declared or resized.
        id: ArrayId,
        /// The declared tag.
        tag: DimTag,
        /// The offending shape.
        shape: Shape,
    },
    /// Resize attempted after a reference has bound to the array.
    ArrayLocked {
        /// The locked identity.
        id: ArrayId,
    },
    /// Lookup of an identity with no declaration in the store.
    ///
    /// During assembly this is retried once after all components have
    /// registered, to allow declaration-order independence; the assembler
    /// reports the post-retry failure as `UnresolvedArray`.
    UnknownArray {
        /// The missing identity.
        id: ArrayId,
    },
    /// A second component attempted to bind read-write access to an
    /// identity that already has a writer-of-record.
    WriteConflict {
        /// The contested identity.
        id: ArrayId,
        /// The component already registered as writer.
        first_writer: String,
        /// The component whose bind was rejected.
        second_writer: String,
    },
    /// A component not on an array's access list attempted to bind.
    AccessDenied {
        /// The restricted identity.
        id: ArrayId,
        /// The component whose bind was rejected.
        component: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateArray { id } => {
                write!(f, "array {id} already declared with an incompatible layout")
            }
            Self::BadShape { id, tag, shape } => {
                write!(
                    f,
                    "array {id}: shape {shape:?} has wrong rank for {tag} (expected {})",
                    tag.rank()
                )
            }
            Self::ArrayLocked { id } => {
                write!(f, "array {id} is locked: references have already bound")
            }
            Self::UnknownArray { id } => write!(f, "array {id} has not been declared"),
            Self::WriteConflict {
                id,
                first_writer,
                second_writer,
            } => {
                write!(
                    f,
                    "write conflict on {id}: '{first_writer}' is writer-of-record, \
                     '{second_writer}' also requested read-write access"
                )
            }
            Self::AccessDenied { id, component } => {
                write!(f, "component '{component}' is not on the access list of {id}")
            }
        }
    }
}

impl Error for StoreError {}
