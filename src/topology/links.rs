//! Point → cell incidence index ("links").
//!
//! [`CellLinks`] answers "which cells reference point `p`" in O(degree) by
//! walking a contiguous slice. It is built once from a [`CellArray`] with
//! the usual two-pass CSR construction: count degrees, prefix-sum into
//! offsets, then scatter cell ids. Cells are visited in ascending id order,
//! so every incidence list is sorted.
//!
//! A cell that names the same point more than once is listed once for it.

use std::sync::Arc;

use crate::mesh_error::MeshBondsError;
use crate::topology::cell_array::CellArray;
use crate::topology::point::{CellId, PointId};

/// Immutable point → incident-cells index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellLinks {
    offsets: Arc<[u32]>,
    cells: Arc<[CellId]>,
}

impl Default for CellLinks {
    fn default() -> Self {
        Self {
            offsets: Arc::from([0u32]),
            cells: Arc::from([]),
        }
    }
}

impl CellLinks {
    /// Build the incidence index for `num_points` points.
    ///
    /// Fails with [`MeshBondsError::PointOutOfRange`] if any cell references
    /// a point `>= num_points`.
    pub fn build(cells: &CellArray, num_points: usize) -> Result<Self, MeshBondsError> {
        // last cell recorded per point; skips repeats within one cell
        let mut last_cell: Vec<Option<CellId>> = vec![None; num_points];

        // 1) degree counts
        let mut degree = vec![0u32; num_points];
        for (c, pts) in cells.iter() {
            for &q in pts {
                let seen = last_cell
                    .get_mut(q.index())
                    .ok_or(MeshBondsError::PointOutOfRange {
                        cell: c,
                        point: q,
                        num_points,
                    })?;
                if *seen == Some(c) {
                    continue;
                }
                *seen = Some(c);
                degree[q.index()] += 1;
            }
        }

        // 2) prefix sums
        let mut offsets = vec![0u32; num_points + 1];
        for i in 0..num_points {
            offsets[i + 1] = offsets[i] + degree[i];
        }
        let total = offsets[num_points] as usize;

        // 3) scatter cell ids
        let mut incident = vec![CellId::new(0); total];
        let mut write = offsets.clone();
        last_cell.fill(None);
        for (c, pts) in cells.iter() {
            for &q in pts {
                let seen = &mut last_cell[q.index()];
                if *seen == Some(c) {
                    continue;
                }
                *seen = Some(c);
                let pos = write[q.index()] as usize;
                incident[pos] = c;
                write[q.index()] += 1;
            }
        }

        log::debug!(
            "Built cell links: {num_points} points, {} cells, {total} incidences",
            cells.len()
        );

        Ok(Self {
            offsets: offsets.into(),
            cells: incident.into(),
        })
    }

    /// Number of points covered by the index.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of (point, cell) incidences.
    #[inline]
    pub fn num_incidences(&self) -> usize {
        self.cells.len()
    }

    /// Cells incident on `p`, in ascending id order.
    pub fn point_cells(&self, p: PointId) -> Result<&[CellId], MeshBondsError> {
        let i = p.index();
        if i >= self.num_points() {
            return Err(MeshBondsError::PointIdOutOfRange {
                point: p,
                num_points: self.num_points(),
            });
        }
        let start = self.offsets[i] as usize;
        let end = self.offsets[i + 1] as usize;
        Ok(&self.cells[start..end])
    }

    /// Number of cells incident on `p`.
    #[inline]
    pub fn degree(&self, p: PointId) -> Result<usize, MeshBondsError> {
        self.point_cells(p).map(<[CellId]>::len)
    }
}
