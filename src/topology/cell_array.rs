//! Immutable CSR (Compressed Sparse Row) cell connectivity.
//!
//! A [`CellArray`] stores the ordered point list of every cell in two flat
//! arrays: `offsets` (length `num_cells + 1`) and `connectivity`. Both live in
//! `Arc<[_]>`, so cloning a cell array (and hence a mesh) shares the storage
//! instead of copying it. Point lists keep the order they were given in;
//! the bond rules in [`algs::bonds`](crate::algs::bonds) depend on slot order.

use std::sync::Arc;

use crate::mesh_error::MeshBondsError;
use crate::topology::point::{CellId, PointId};

/// Shared, read-only cell connectivity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellArray {
    /// CSR offsets into `connectivity` for each cell.
    offsets: Arc<[u32]>,
    /// Concatenated point lists.
    connectivity: Arc<[PointId]>,
}

impl Default for CellArray {
    fn default() -> Self {
        Self {
            offsets: Arc::from([0u32]),
            connectivity: Arc::from([]),
        }
    }
}

impl CellArray {
    /// Build a cell array from any sequence of point lists.
    ///
    /// # Example
    /// ```rust
    /// use mesh_bonds::topology::cell_array::CellArray;
    /// use mesh_bonds::topology::point::{CellId, PointId};
    /// let p = PointId::new;
    /// let cells = CellArray::from_cells([vec![p(0), p(1)], vec![p(1), p(2), p(3)]]).unwrap();
    /// assert_eq!(cells.len(), 2);
    /// assert_eq!(cells.cell_points(CellId::new(1)).unwrap(), &[p(1), p(2), p(3)]);
    /// ```
    pub fn from_cells<I, C>(cells: I) -> Result<Self, MeshBondsError>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[PointId]>,
    {
        let mut builder = CellArrayBuilder::new();
        for cell in cells {
            builder.push(cell.as_ref())?;
        }
        Ok(builder.build())
    }

    /// Build a cell array of two-point line cells.
    pub fn from_bonds<I>(bonds: I) -> Result<Self, MeshBondsError>
    where
        I: IntoIterator<Item = (PointId, PointId)>,
    {
        let mut builder = CellArrayBuilder::new();
        for (a, b) in bonds {
            builder.push(&[a, b])?;
        }
        Ok(builder.build())
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of point references over all cells.
    #[inline]
    pub fn connectivity_len(&self) -> usize {
        self.connectivity.len()
    }

    /// Ordered point list of cell `c`.
    pub fn cell_points(&self, c: CellId) -> Result<&[PointId], MeshBondsError> {
        let i = c.index();
        if i >= self.len() {
            return Err(MeshBondsError::CellOutOfRange {
                cell: c,
                num_cells: self.len(),
            });
        }
        Ok(self.slice(i))
    }

    /// Iterate over `(CellId, &[PointId])` in cell order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (CellId, &[PointId])> + '_ {
        (0..self.len()).map(move |i| (CellId::new(i as u32), self.slice(i)))
    }

    /// Returns `true` if both arrays point at the same shared storage.
    pub fn shares_storage_with(&self, other: &CellArray) -> bool {
        Arc::ptr_eq(&self.offsets, &other.offsets)
            && Arc::ptr_eq(&self.connectivity, &other.connectivity)
    }

    #[inline]
    fn slice(&self, i: usize) -> &[PointId] {
        let start = self.offsets[i] as usize;
        let end = self.offsets[i + 1] as usize;
        &self.connectivity[start..end]
    }
}

/// Incremental builder; [`CellArrayBuilder::build`] freezes it into a [`CellArray`].
#[derive(Clone, Debug)]
pub struct CellArrayBuilder {
    offsets: Vec<u32>,
    connectivity: Vec<PointId>,
}

impl Default for CellArrayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CellArrayBuilder {
    pub fn new() -> Self {
        Self {
            offsets: vec![0],
            connectivity: Vec::new(),
        }
    }

    /// Preallocate for `cells` cells holding `refs` point references in total.
    pub fn with_capacity(cells: usize, refs: usize) -> Self {
        let mut offsets = Vec::with_capacity(cells + 1);
        offsets.push(0);
        Self {
            offsets,
            connectivity: Vec::with_capacity(refs),
        }
    }

    /// Append a cell and return its id.
    pub fn push(&mut self, points: &[PointId]) -> Result<CellId, MeshBondsError> {
        let id = CellId::try_from(self.offsets.len() - 1)?;
        let end = self.connectivity.len() + points.len();
        let end = u32::try_from(end).map_err(|_| MeshBondsError::IndexOverflow(end))?;
        self.connectivity.extend_from_slice(points);
        self.offsets.push(end);
        Ok(id)
    }

    pub fn build(self) -> CellArray {
        CellArray {
            offsets: self.offsets.into(),
            connectivity: self.connectivity.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(i: u32) -> PointId {
        PointId::new(i)
    }

    #[test]
    fn empty_array_has_no_cells() {
        let cells = CellArray::default();
        assert!(cells.is_empty());
        assert_eq!(cells.connectivity_len(), 0);
        assert!(cells.cell_points(CellId::new(0)).is_err());
    }

    #[test]
    fn preserves_point_order_and_lengths() {
        let cells =
            CellArray::from_cells([vec![p(3), p(1)], vec![p(2)], vec![p(0), p(1), p(2), p(3)]])
                .unwrap();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells.connectivity_len(), 7);
        assert_eq!(cells.cell_points(CellId::new(0)).unwrap(), &[p(3), p(1)]);
        assert_eq!(cells.cell_points(CellId::new(1)).unwrap(), &[p(2)]);
        assert_eq!(cells.cell_points(CellId::new(2)).unwrap().len(), 4);
        let lens: Vec<usize> = cells.iter().map(|(_, pts)| pts.len()).collect();
        assert_eq!(lens, vec![2, 1, 4]);
    }

    #[test]
    fn out_of_range_cell_is_reported() {
        let cells = CellArray::from_bonds([(p(0), p(1))]).unwrap();
        assert_eq!(
            cells.cell_points(CellId::new(1)),
            Err(MeshBondsError::CellOutOfRange {
                cell: CellId::new(1),
                num_cells: 1
            })
        );
    }

    #[test]
    fn clones_share_storage() {
        let cells = CellArray::from_bonds([(p(0), p(1)), (p(1), p(2))]).unwrap();
        let copy = cells.clone();
        assert!(copy.shares_storage_with(&cells));
        let rebuilt = CellArray::from_bonds([(p(0), p(1)), (p(1), p(2))]).unwrap();
        assert_eq!(rebuilt, cells);
        assert!(!rebuilt.shares_storage_with(&cells));
    }

    #[test]
    fn builder_returns_sequential_ids() {
        let mut b = CellArrayBuilder::with_capacity(2, 4);
        assert_eq!(b.push(&[p(0), p(1)]).unwrap(), CellId::new(0));
        assert_eq!(b.push(&[p(1), p(2)]).unwrap(), CellId::new(1));
        assert_eq!(b.build().len(), 2);
    }
}
