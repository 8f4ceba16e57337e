//! `PolyMesh`: points, polygonal cells, and per-point attributes.
//!
//! This is the data object bond counting reads and produces. It holds
//! - optional point coordinates (a mesh with no point storage is valid and
//!   counts as empty),
//! - a [`CellArray`] with the ordered point list of every cell,
//! - a [`PointData`] collection of named per-point arrays,
//! - a lazily built [`CellLinks`] incidence index.
//!
//! `Clone` is a shallow copy: coordinates, connectivity, attribute values,
//! and an already built incidence index are shared through `Arc`.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::data::point_data::{DataArray, PointData};
use crate::mesh_error::MeshBondsError;
use crate::topology::cell_array::CellArray;
use crate::topology::links::CellLinks;
use crate::topology::point::{CellId, PointId};

/// Polygonal mesh whose 2-point cells are read as bonds between atoms.
#[derive(Clone, Debug, Default)]
pub struct PolyMesh {
    points: Option<Arc<[[f64; 3]]>>,
    cells: CellArray,
    point_data: PointData,
    links: OnceCell<Arc<CellLinks>>,
}

impl PolyMesh {
    /// Mesh with the given coordinates and cells.
    ///
    /// Cell references are not checked here; they are checked when the
    /// incidence index is built.
    pub fn new(points: Vec<[f64; 3]>, cells: CellArray) -> Self {
        Self {
            points: Some(points.into()),
            cells,
            point_data: PointData::default(),
            links: OnceCell::new(),
        }
    }

    /// Mesh with cells but no point storage.
    pub fn without_points(cells: CellArray) -> Self {
        Self {
            points: None,
            cells,
            point_data: PointData::default(),
            links: OnceCell::new(),
        }
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.as_ref().map_or(0, |p| p.len())
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn has_points(&self) -> bool {
        self.points.is_some()
    }

    /// Coordinates, if the mesh has point storage.
    pub fn points(&self) -> Option<&[[f64; 3]]> {
        self.points.as_deref()
    }

    pub fn point(&self, p: PointId) -> Result<[f64; 3], MeshBondsError> {
        self.points()
            .and_then(|pts| pts.get(p.index()).copied())
            .ok_or(MeshBondsError::PointIdOutOfRange {
                point: p,
                num_points: self.num_points(),
            })
    }

    #[inline]
    pub fn cells(&self) -> &CellArray {
        &self.cells
    }

    #[inline]
    pub fn point_data(&self) -> &PointData {
        &self.point_data
    }

    /// Mutable attribute access. Topology is unaffected, so the incidence
    /// index stays valid.
    #[inline]
    pub fn point_data_mut(&mut self) -> &mut PointData {
        &mut self.point_data
    }

    /// Attach a per-point array, replacing one with the same name.
    ///
    /// The array must have exactly one tuple per point.
    pub fn add_point_array(&mut self, array: DataArray) -> Result<(), MeshBondsError> {
        if array.num_tuples() != self.num_points() {
            return Err(MeshBondsError::ArrayLengthMismatch {
                name: array.name().to_string(),
                expected: self.num_points(),
                found: array.num_tuples(),
            });
        }
        if self.point_data.add_array(array).is_some() {
            log::debug!("Replaced existing point array");
        }
        Ok(())
    }

    /// Build the point → cell incidence index if it does not exist yet.
    ///
    /// Takes `&self`: the index is a cache over immutable topology and is
    /// shared by every shallow copy made afterwards.
    pub fn build_links(&self) -> Result<&CellLinks, MeshBondsError> {
        self.links
            .get_or_try_init(|| CellLinks::build(&self.cells, self.num_points()).map(Arc::new))
            .map(|l| &**l)
    }

    /// `true` once [`build_links`](Self::build_links) has succeeded.
    pub fn has_links(&self) -> bool {
        self.links.get().is_some()
    }

    /// Cells that reference point `p`.
    pub fn point_cells(&self, p: PointId) -> Result<&[CellId], MeshBondsError> {
        self.build_links()?.point_cells(p)
    }

    /// Ordered points of cell `c`.
    pub fn cell_points(&self, c: CellId) -> Result<&[PointId], MeshBondsError> {
        self.cells.cell_points(c)
    }

    /// Shallow copy that shares all storage with `self`.
    pub fn shallow_copy(&self) -> Self {
        self.clone()
    }

    /// Returns `true` if `self` and `other` share coordinate and cell storage.
    pub fn shares_topology_with(&self, other: &PolyMesh) -> bool {
        let same_points = match (&self.points, &other.points) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_points && self.cells.shares_storage_with(&other.cells)
    }
}
