//! Rectangular grid structure.

use floe_component::{GridDims, Structure};
use floe_core::{ArrayId, ConfigError, ConfigStore, ConfigValue};
use floe_store::{Array, ArrayStore, StoreError};

/// A planar nx x ny grid with optional vertical levels.
///
/// The reference [`Structure`]: publishes its dimensions and moves raw
/// field data in and out of the store by identity. Carries no geometry
/// beyond the sizes.
#[derive(Clone, Copy, Debug)]
pub struct PlanarGrid {
    dims: GridDims,
}

impl PlanarGrid {
    /// Build a grid from explicit dimensions.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            dims: GridDims { nx, ny, nz },
        }
    }

    /// Read dimensions from `grid.nx`, `grid.ny`, and optional `grid.nz`
    /// (default 1).
    pub fn from_config(config: &ConfigStore) -> Result<Self, ConfigError> {
        let nx = config.integer("grid.nx")? as usize;
        let ny = config.integer("grid.ny")? as usize;
        let nz = config.integer_or("grid.nz", 1)? as usize;
        Ok(Self::new(nx, ny, nz))
    }

    /// Publish the dimensions under `grid.nx`, `grid.ny`, and `grid.nz`.
    ///
    /// Components size their arrays from these keys in `configure`, so
    /// the grid writes them into the store the assembly will use rather
    /// than relying on the embedder to set them by hand.
    pub fn publish(&self, config: &mut ConfigStore) {
        config.insert("grid.nx", ConfigValue::Integer(self.dims.nx as i64));
        config.insert("grid.ny", ConfigValue::Integer(self.dims.ny as i64));
        config.insert("grid.nz", ConfigValue::Integer(self.dims.nz as i64));
    }
}

impl Structure for PlanarGrid {
    fn grid_dimensions(&self) -> GridDims {
        self.dims
    }

    fn export_array(&self, store: &ArrayStore, id: &ArrayId) -> Result<Array, StoreError> {
        store.snapshot(id)
    }

    fn import_array(
        &mut self,
        store: &ArrayStore,
        id: &ArrayId,
        data: &Array,
    ) -> Result<(), StoreError> {
        store.load(id, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::{ConfigValue, DimTag};
    use floe_store::shape;

    #[test]
    fn dimensions_from_config() {
        let config = ConfigStore::new()
            .with("grid.nx", ConfigValue::Integer(8))
            .with("grid.ny", ConfigValue::Integer(4));
        let grid = PlanarGrid::from_config(&config).unwrap();
        assert_eq!(grid.grid_dimensions(), GridDims { nx: 8, ny: 4, nz: 1 });
        assert_eq!(grid.grid_dimensions().horizontal_cells(), 32);
    }

    #[test]
    fn published_dimensions_round_trip() {
        let grid = PlanarGrid::new(6, 5, 2);
        let mut config = ConfigStore::new();
        grid.publish(&mut config);

        assert_eq!(config.integer("grid.nx").unwrap(), 6);
        let again = PlanarGrid::from_config(&config).unwrap();
        assert_eq!(again.grid_dimensions(), grid.grid_dimensions());
    }

    #[test]
    fn import_export_round_trip_by_identity() {
        let mut store = ArrayStore::new();
        let id = ArrayId::protected("forcing");
        store.declare(id.clone(), DimTag::Horizontal, shape(&[2, 3])).unwrap();

        let mut grid = PlanarGrid::new(2, 3, 1);
        let mut data = Array::new(DimTag::Horizontal, shape(&[2, 3]));
        data.set(1, 2, 7.5);
        grid.import_array(&store, &id, &data).unwrap();

        let exported = grid.export_array(&store, &id).unwrap();
        assert_eq!(exported.at(1, 2), 7.5);
    }
}
