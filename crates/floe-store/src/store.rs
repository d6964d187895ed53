//! The array store: declaration, binding, and handle-based access.

use std::cell::{Ref, RefCell, RefMut};

use floe_core::{ArrayId, DimTag};
use indexmap::IndexMap;

use crate::array::{Array, Shape};
use crate::error::StoreError;
use crate::refs::{AccessMode, ArrayRef, ReadRef, WriteRef};

/// One declared array plus its binding metadata.
#[derive(Debug)]
struct Slot {
    cell: RefCell<Array>,
    /// Set on the first bind; resizing a locked slot is a usage error.
    locked: bool,
    /// Writer-of-record, set by the first read-write bind.
    writer: Option<String>,
    /// SemiShared access list. `None` means unrestricted.
    readers: Option<Vec<String>>,
}

/// Owns every model array, keyed by identity.
///
/// Slots are never removed before teardown, so the slot index cached in
/// an [`ArrayRef`] stays valid for the life of the store. Iteration order
/// is declaration order (`IndexMap`), which keeps diagnostics and
/// serialization deterministic.
///
/// Per-step access goes through [`read`](ArrayStore::read) and
/// [`write`](ArrayStore::write) with a bound reference. The slots use
/// `RefCell`: the bind-time single-writer discipline and the sequential
/// schedule already exclude cross-component aliasing, so the runtime
/// borrow only backstops in-update misuse (holding a read and a write
/// guard to the same identity simultaneously), which panics.
#[derive(Debug, Default)]
pub struct ArrayStore {
    index: IndexMap<ArrayId, usize>,
    slots: Vec<Slot>,
}

impl ArrayStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new array and reserve zero-filled backing storage sized
    /// to the shape's product.
    ///
    /// Re-declaring an identity with the identical tag and shape is a
    /// no-op; an incompatible layout fails with
    /// [`StoreError::DuplicateArray`]. A shape whose rank does not match
    /// the tag fails with [`StoreError::BadShape`]. There is no implicit
    /// growth.
    pub fn declare(&mut self, id: ArrayId, tag: DimTag, shape: Shape) -> Result<(), StoreError> {
        if shape.len() != tag.rank() {
            return Err(StoreError::BadShape { id, tag, shape });
        }
        if let Some(&slot) = self.index.get(&id) {
            let existing = self.slots[slot].cell.borrow();
            if existing.tag() == tag && *existing.shape() == shape {
                return Ok(());
            }
            return Err(StoreError::DuplicateArray { id });
        }
        self.slots.push(Slot {
            cell: RefCell::new(Array::new(tag, shape)),
            locked: false,
            writer: None,
            readers: None,
        });
        self.index.insert(id, self.slots.len() - 1);
        Ok(())
    }

    /// Replace an array's shape, zero-filling the new buffer.
    ///
    /// Permitted only before any reference has bound; afterwards the slot
    /// is locked and this fails with [`StoreError::ArrayLocked`].
    pub fn resize(&mut self, id: &ArrayId, shape: Shape) -> Result<(), StoreError> {
        let slot = self.lookup(id)?;
        if self.slots[slot].locked {
            return Err(StoreError::ArrayLocked { id: id.clone() });
        }
        let mut array = self.slots[slot].cell.borrow_mut();
        if shape.len() != array.tag().rank() {
            return Err(StoreError::BadShape {
                id: id.clone(),
                tag: array.tag(),
                shape,
            });
        }
        array.reshape(shape);
        Ok(())
    }

    /// Install a SemiShared access list: only the named components (and
    /// the writer-of-record) may bind to this array afterwards.
    pub fn restrict(&mut self, id: &ArrayId, readers: Vec<String>) -> Result<(), StoreError> {
        let slot = self.lookup(id)?;
        self.slots[slot].readers = Some(readers);
        Ok(())
    }

    /// Whether an identity has been declared.
    pub fn contains(&self, id: &ArrayId) -> bool {
        self.index.contains_key(id)
    }

    /// Tag and shape of a declared array, if present.
    pub fn layout_of(&self, id: &ArrayId) -> Option<(DimTag, Shape)> {
        let &slot = self.index.get(id)?;
        let array = self.slots[slot].cell.borrow();
        Some((array.tag(), array.shape().clone()))
    }

    /// The component registered as writer-of-record, if any.
    pub fn writer_of(&self, id: &ArrayId) -> Option<String> {
        let &slot = self.index.get(id)?;
        self.slots[slot].writer.clone()
    }

    /// All declared identities, in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &ArrayId> {
        self.index.keys()
    }

    /// Bind a read-only reference for a component.
    ///
    /// Fails with [`StoreError::UnknownArray`] if nothing was declared
    /// under the identity, or [`StoreError::AccessDenied`] if the array
    /// carries an access list that does not name the component. Binding
    /// locks the array against resizing.
    pub fn bind_read(&mut self, id: &ArrayId, component: &str) -> Result<ReadRef, StoreError> {
        let slot = self.lookup(id)?;
        self.check_access(slot, id, component)?;
        self.slots[slot].locked = true;
        Ok(ArrayRef::bound(id.clone(), slot))
    }

    /// Bind a read-write reference and register the component as the
    /// array's writer-of-record.
    ///
    /// A second read-write bind from a different component fails with
    /// [`StoreError::WriteConflict`]; the same component may rebind
    /// freely. Access lists apply to writers as well as readers.
    pub fn bind_write(&mut self, id: &ArrayId, component: &str) -> Result<WriteRef, StoreError> {
        let slot = self.lookup(id)?;
        self.check_access(slot, id, component)?;
        match &self.slots[slot].writer {
            Some(existing) if existing != component => {
                return Err(StoreError::WriteConflict {
                    id: id.clone(),
                    first_writer: existing.clone(),
                    second_writer: component.to_string(),
                });
            }
            Some(_) => {}
            None => self.slots[slot].writer = Some(component.to_string()),
        }
        self.slots[slot].locked = true;
        Ok(ArrayRef::bound(id.clone(), slot))
    }

    /// Read access through any bound reference.
    ///
    /// # Panics
    /// If a write guard to the same identity is currently held (in-update
    /// aliasing misuse), or if the reference came from a different store.
    pub fn read<A: AccessMode>(&self, r: &ArrayRef<A>) -> Ref<'_, Array> {
        self.slots[r.slot()].cell.borrow()
    }

    /// Mutable access through a bound read-write reference.
    ///
    /// # Panics
    /// If any other guard to the same identity is currently held, or if
    /// the reference came from a different store.
    pub fn write(&self, w: &WriteRef) -> RefMut<'_, Array> {
        self.slots[w.slot()].cell.borrow_mut()
    }

    /// Copy of an array's contents by identity, for external collaborators
    /// (diagnostics, restart export) that are not bound components.
    pub fn snapshot(&self, id: &ArrayId) -> Result<Array, StoreError> {
        let slot = self.lookup(id)?;
        Ok(self.slots[slot].cell.borrow().clone())
    }

    /// Overwrite an array's contents from externally produced data, by
    /// identity. The counterpart of [`snapshot`](ArrayStore::snapshot)
    /// for restart import and boundary forcing.
    ///
    /// The source must carry the declared tag and shape; a mismatch
    /// fails with [`StoreError::BadShape`].
    ///
    /// # Panics
    /// If any guard to the same identity is currently held.
    pub fn load(&self, id: &ArrayId, data: &Array) -> Result<(), StoreError> {
        let slot = self.lookup(id)?;
        let mut array = self.slots[slot].cell.borrow_mut();
        if data.tag() != array.tag() || data.shape() != array.shape() {
            return Err(StoreError::BadShape {
                id: id.clone(),
                tag: data.tag(),
                shape: data.shape().clone(),
            });
        }
        array.as_mut_slice().copy_from_slice(data.as_slice());
        Ok(())
    }

    /// Flat index of the first non-finite cell of an array, by identity.
    ///
    /// The engine scans each component's outputs with this after the
    /// component's update, enforcing the no-NaN contract.
    ///
    /// # Panics
    /// If any guard to the same identity is currently held.
    pub fn first_non_finite(&self, id: &ArrayId) -> Result<Option<usize>, StoreError> {
        let slot = self.lookup(id)?;
        Ok(self.slots[slot].cell.borrow().first_non_finite())
    }

    fn lookup(&self, id: &ArrayId) -> Result<usize, StoreError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| StoreError::UnknownArray { id: id.clone() })
    }

    fn check_access(&self, slot: usize, id: &ArrayId, component: &str) -> Result<(), StoreError> {
        if let Some(readers) = &self.slots[slot].readers {
            let is_writer = self.slots[slot].writer.as_deref() == Some(component);
            if !is_writer && !readers.iter().any(|r| r == component) {
                return Err(StoreError::AccessDenied {
                    id: id.clone(),
                    component: component.to_string(),
                });
            }
        }
        Ok(())
    }
}
