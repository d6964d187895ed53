//! Dense numeric arrays with a shape and a semantic dimension tag.

use floe_core::DimTag;
use smallvec::SmallVec;

/// Ordered dimension sizes of an array. Rank is at most 3 in practice;
/// the inline capacity avoids a heap allocation per declaration.
pub type Shape = SmallVec<[usize; 4]>;

/// Build a [`Shape`] from a slice of dimension sizes.
pub fn shape(dims: &[usize]) -> Shape {
    SmallVec::from_slice(dims)
}

/// A dense, row-major numeric field with a fixed shape.
///
/// Storage is `f64` per cell. The shape is fixed once the array is sized;
/// resizing is mediated by the store and forbidden after any reference
/// has bound.
#[derive(Clone, Debug, PartialEq)]
pub struct Array {
    tag: DimTag,
    shape: Shape,
    data: Vec<f64>,
}

impl Array {
    /// Allocate a zero-filled array with the given tag and shape.
    ///
    /// The caller (the store's `declare`) is responsible for checking the
    /// shape's rank against the tag.
    pub fn new(tag: DimTag, shape: Shape) -> Self {
        let len = shape.iter().product();
        Self {
            tag,
            shape,
            data: vec![0.0; len],
        }
    }

    /// Semantic dimension tag.
    pub fn tag(&self) -> DimTag {
        self.tag
    }

    /// Ordered dimension sizes.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Total number of cells (product of the dimension sizes).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array has zero cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only view of the backing buffer, row-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable view of the backing buffer, row-major.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Fill every cell with a value.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Flat index of a 2D position.
    ///
    /// # Panics
    /// If the array is not rank 2 or an index is out of bounds.
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert_eq!(self.shape.len(), 2, "idx on a rank-{} array", self.shape.len());
        assert!(i < self.shape[0] && j < self.shape[1]);
        i * self.shape[1] + j
    }

    /// Flat index of a 3D position.
    ///
    /// # Panics
    /// If the array is not rank 3 or an index is out of bounds.
    pub fn idx3(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert_eq!(self.shape.len(), 3, "idx3 on a rank-{} array", self.shape.len());
        assert!(i < self.shape[0] && j < self.shape[1] && k < self.shape[2]);
        (i * self.shape[1] + j) * self.shape[2] + k
    }

    /// Value at a 2D position.
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.data[self.idx(i, j)]
    }

    /// Set the value at a 2D position.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let ix = self.idx(i, j);
        self.data[ix] = value;
    }

    /// Value at a 3D position.
    pub fn at3(&self, i: usize, j: usize, k: usize) -> f64 {
        self.data[self.idx3(i, j, k)]
    }

    /// Set the value at a 3D position.
    pub fn set3(&mut self, i: usize, j: usize, k: usize, value: f64) {
        let ix = self.idx3(i, j, k);
        self.data[ix] = value;
    }

    /// Flat index of the first non-finite cell, if any.
    ///
    /// The engine scans each component's outputs with this after the
    /// component's update, enforcing the no-NaN contract.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.data.iter().position(|v| !v.is_finite())
    }

    /// Replace the shape and reallocate the buffer, zero-filled.
    ///
    /// Only the store calls this, and only before any reference has bound.
    pub(crate) fn reshape(&mut self, shape: Shape) {
        let len = shape.iter().product();
        self.shape = shape;
        self.data = vec![0.0; len];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_is_zero_filled() {
        let a = Array::new(DimTag::Horizontal, shape(&[3, 4]));
        assert_eq!(a.len(), 12);
        assert!(a.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn row_major_2d() {
        let mut a = Array::new(DimTag::Horizontal, shape(&[2, 3]));
        a.set(1, 2, 7.0);
        assert_eq!(a.as_slice()[5], 7.0);
        assert_eq!(a.at(1, 2), 7.0);
    }

    #[test]
    fn row_major_3d() {
        let mut a = Array::new(DimTag::Vertical, shape(&[2, 2, 2]));
        a.set3(1, 0, 1, 3.0);
        assert_eq!(a.as_slice()[5], 3.0);
        assert_eq!(a.at3(1, 0, 1), 3.0);
    }

    #[test]
    fn non_finite_detection() {
        let mut a = Array::new(DimTag::Horizontal, shape(&[2, 2]));
        assert_eq!(a.first_non_finite(), None);
        a.as_mut_slice()[2] = f64::NAN;
        assert_eq!(a.first_non_finite(), Some(2));
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_index_panics() {
        let a = Array::new(DimTag::Horizontal, shape(&[2, 2]));
        a.at(2, 0);
    }

    proptest! {
        /// Every (i, j) maps to a distinct flat index and the mapping
        /// covers the whole buffer exactly once.
        #[test]
        fn index_bijection_2d(nx in 1usize..12, ny in 1usize..12) {
            let a = Array::new(DimTag::Horizontal, shape(&[nx, ny]));
            let mut seen = vec![false; a.len()];
            for i in 0..nx {
                for j in 0..ny {
                    let flat = a.idx(i, j);
                    prop_assert!(!seen[flat], "duplicate flat index {flat}");
                    seen[flat] = true;
                }
            }
            prop_assert!(seen.iter().all(|&s| s));
        }

        #[test]
        fn index_bijection_3d(nx in 1usize..6, ny in 1usize..6, nz in 1usize..6) {
            let a = Array::new(DimTag::Vertical, shape(&[nx, ny, nz]));
            let mut seen = vec![false; a.len()];
            for i in 0..nx {
                for j in 0..ny {
                    for k in 0..nz {
                        let flat = a.idx3(i, j, k);
                        prop_assert!(!seen[flat]);
                        seen[flat] = true;
                    }
                }
            }
            prop_assert!(seen.iter().all(|&s| s));
        }
    }
}
