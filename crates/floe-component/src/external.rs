//! Fixed interfaces for the external collaborators.
//!
//! The kernel treats the grid structure and the diagnostic output purely
//! as array producers/consumers behind these traits. Concrete
//! implementations live outside the core and are selected through the
//! module registry.

use floe_core::{ArrayId, TimestepTime, UpdateError};
use floe_store::{Array, ArrayStore, StoreError};

/// Grid dimensions published by a [`Structure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    /// Cells in the x direction.
    pub nx: usize,
    /// Cells in the y direction.
    pub ny: usize,
    /// Vertical levels (1 for purely horizontal grids).
    pub nz: usize,
}

impl GridDims {
    /// Number of horizontal cells, `nx * ny`.
    pub fn horizontal_cells(&self) -> usize {
        self.nx * self.ny
    }
}

/// The grid structure collaborator.
///
/// Supplies and consumes raw field data through the array store, bound
/// the same way as any shared component. The kernel never interprets
/// grid geometry beyond the dimension sizes.
pub trait Structure {
    /// Dimensions of the grid this structure describes.
    fn grid_dimensions(&self) -> GridDims;

    /// Copy an array out of the store, using its identity as the
    /// serialization key.
    fn export_array(&self, store: &ArrayStore, id: &ArrayId) -> Result<Array, StoreError>;

    /// Copy externally produced data into a declared array.
    ///
    /// The source must match the declared tag and shape; a mismatch is
    /// a `BadShape` layout error.
    fn import_array(
        &mut self,
        store: &ArrayStore,
        id: &ArrayId,
        data: &Array,
    ) -> Result<(), StoreError>;
}

/// The diagnostic output collaborator.
///
/// Invoked by the driver after each step, never by components directly.
pub trait DiagnosticOutput {
    /// Serialize the selected arrays for one completed timestep.
    fn write(
        &mut self,
        time: TimestepTime,
        store: &ArrayStore,
        selected: &[ArrayId],
    ) -> Result<(), UpdateError>;
}
