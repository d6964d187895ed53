//! Access-controlled references: cached handles to arrays in the store.
//!
//! A reference is resolved once, at bind time, and carries its access
//! mode in the type. [`ReadRef`] can only read; [`WriteRef`] grants
//! mutable access and registered its component as the array's
//! writer-of-record when it bound.

use std::fmt;
use std::marker::PhantomData;

use floe_core::ArrayId;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::ReadOnly {}
    impl Sealed for super::ReadWrite {}
}

/// Type-level access mode tag. Sealed: the only modes are [`ReadOnly`]
/// and [`ReadWrite`].
pub trait AccessMode: sealed::Sealed + 'static {
    /// Label used in `Debug` output.
    const LABEL: &'static str;
}

/// Marker for read-only access.
#[derive(Clone, Copy, Debug)]
pub struct ReadOnly;

/// Marker for read-write access.
#[derive(Clone, Copy, Debug)]
pub struct ReadWrite;

impl AccessMode for ReadOnly {
    const LABEL: &'static str = "ro";
}

impl AccessMode for ReadWrite {
    const LABEL: &'static str = "rw";
}

/// A lightweight handle to an array in the store.
///
/// Holds the identity and the resolved slot index; it does not own the
/// array and is only valid for the store that issued it. Cloning a
/// reference does not change the write discipline (the writer-of-record
/// was fixed when the reference bound).
pub struct ArrayRef<A: AccessMode> {
    id: ArrayId,
    slot: usize,
    _access: PhantomData<A>,
}

/// A read-only reference.
pub type ReadRef = ArrayRef<ReadOnly>;

/// A read-write reference.
pub type WriteRef = ArrayRef<ReadWrite>;

impl<A: AccessMode> ArrayRef<A> {
    pub(crate) fn bound(id: ArrayId, slot: usize) -> Self {
        Self {
            id,
            slot,
            _access: PhantomData,
        }
    }

    /// The identity this reference resolves to.
    pub fn id(&self) -> &ArrayId {
        &self.id
    }

    pub(crate) fn slot(&self) -> usize {
        self.slot
    }
}

impl<A: AccessMode> Clone for ArrayRef<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            slot: self.slot,
            _access: PhantomData,
        }
    }
}

impl<A: AccessMode> fmt::Debug for ArrayRef<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArrayRef<{}>({})", A::LABEL, self.id)
    }
}
