//! MeshBondsError: Unified error type for mesh-bonds public APIs
//!
//! Every fallible operation in this crate returns this type instead of
//! panicking. An empty mesh is not an error; see
//! [`BondCounter::execute`](crate::algs::bonds::BondCounter::execute).

use thiserror::Error;

use crate::topology::point::{CellId, PointId};

/// Unified error type for mesh-bonds operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshBondsError {
    /// A cell references a point index that does not exist.
    #[error("Topology error: cell {cell} references point {point} but the mesh has {num_points} points")]
    PointOutOfRange {
        cell: CellId,
        point: PointId,
        num_points: usize,
    },
    /// A point query was issued for an index past the end of the point list.
    #[error("Topology error: point {point} is out of range (mesh has {num_points} points)")]
    PointIdOutOfRange { point: PointId, num_points: usize },
    /// A cell query was issued for an index past the end of the cell list.
    #[error("Topology error: cell {cell} is out of range (mesh has {num_cells} cells)")]
    CellOutOfRange { cell: CellId, num_cells: usize },
    /// An incident cell is not a two-point bond.
    #[error("Bond error: cell {cell} incident on point {point} has {len} points, expected 2")]
    MalformedBondCell {
        cell: CellId,
        point: PointId,
        len: usize,
    },
    /// A point attribute does not have one tuple per point.
    #[error("Data error: array `{name}` has {found} values, expected {expected}")]
    ArrayLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    /// Index space exhausted: ids are stored as `u32`.
    #[error("Index overflow: {0} entries do not fit in a 32-bit index")]
    IndexOverflow(usize),
}
