//! Small bonded-mesh generators: open chains, rings, and explicit bond lists.
//!
//! Generated points are laid out on the x axis (chains) or the unit circle
//! (rings); positions carry no meaning for bond counting.

use itertools::Itertools;

use crate::mesh::PolyMesh;
use crate::mesh_error::MeshBondsError;
use crate::topology::cell_array::CellArray;
use crate::topology::point::PointId;

fn point_ids(n: usize) -> Result<Vec<PointId>, MeshBondsError> {
    (0..n).map(PointId::try_from).collect()
}

/// Open chain `0 - 1 - ... - (n-1)` with `n - 1` line cells.
pub fn chain_mesh(n: usize) -> Result<PolyMesh, MeshBondsError> {
    let ids = point_ids(n)?;
    let cells = CellArray::from_bonds(ids.iter().copied().tuple_windows())?;
    let coords = (0..n).map(|i| [i as f64, 0.0, 0.0]).collect();
    Ok(PolyMesh::new(coords, cells))
}

/// Closed cycle where point `i` is bonded to `(i + 1) % n`.
///
/// `n = 2` yields two parallel cells between the same pair of points;
/// `n = 1` yields one self-bond.
pub fn ring_mesh(n: usize) -> Result<PolyMesh, MeshBondsError> {
    let ids = point_ids(n)?;
    let cells = CellArray::from_bonds(ids.iter().copied().circular_tuple_windows())?;
    let step = std::f64::consts::TAU / n.max(1) as f64;
    let coords = (0..n)
        .map(|i| {
            let t = step * i as f64;
            [t.cos(), t.sin(), 0.0]
        })
        .collect();
    Ok(PolyMesh::new(coords, cells))
}

/// `n` points joined by the given bonds, in order.
///
/// Bond endpoints are validated against `n`.
pub fn from_bonds<I>(n: usize, bonds: I) -> Result<PolyMesh, MeshBondsError>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let cells = CellArray::from_bonds(
        bonds
            .into_iter()
            .map(|(a, b)| (PointId::new(a), PointId::new(b))),
    )?;
    let mesh = PolyMesh::new(vec![[0.0; 3]; n], cells);
    mesh.build_links()?;
    Ok(mesh)
}
