//! Per-atom bond counting.
//!
//! For every point `p` of a [`PolyMesh`] this module walks the cells incident
//! on `p` (via the mesh's [`CellLinks`](crate::topology::links::CellLinks)
//! index), derives the "other" endpoint of each incident bond, and records
//! how many bonds `p` has. The result is attached to a shallow copy of the
//! input as a one-component `f32` point array named [`NUM_BONDS`].
//!
//! Counting keeps multiplicity: two distinct cells joining the same pair of
//! points are two bonds.
//!
//! # Endpoint rules
//! - [`EndpointRule::Legacy`] takes slot 0 of the cell's point list, or
//!   slot 1 if slot 0 is `p`. This is only correct for 2-point cells: for a
//!   longer polygon where `p` sits past slot 1 it still answers slot 0, and
//!   every incident cell counts as a bond.
//! - [`EndpointRule::Strict`] (default) only accepts cells with exactly two
//!   points. Other incident cells are not counted and are reported as
//!   [`MalformedCell`]s according to [`MalformedHandling`]. For meshes made
//!   of 2-point cells both rules give identical results.

use serde::{Deserialize, Serialize};

use crate::data::point_data::DataArray;
use crate::mesh::PolyMesh;
use crate::mesh_error::MeshBondsError;
use crate::topology::cell_type::CellType;
use crate::topology::point::{CellId, PointId};

/// Name of the point array produced by [`BondCounter`].
pub const NUM_BONDS: &str = "numBonds";

/// How the far endpoint of an incident cell is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointRule {
    /// Slot 0, or slot 1 when slot 0 is the query point. Cells with a single
    /// point yield the query point itself.
    ///
    /// The incidence index lists a cell once per distinct point, so a
    /// self-bond `(p, p)` counts as one bond for `p`. VTK-style links record
    /// one entry per occurrence and would count it twice.
    Legacy,
    /// Exactly two points required; anything else is malformed.
    #[default]
    Strict,
}

/// What to do with incident cells that are not 2-point bonds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MalformedHandling {
    /// Skip and report.
    Ignore,
    /// Skip, report, and log a warning.
    #[default]
    Warn,
    /// Abort with [`MeshBondsError::MalformedBondCell`].
    Error,
}

/// Options for [`BondCounter`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondCountOpts {
    pub endpoint: EndpointRule,
    pub malformed: MalformedHandling,
    /// Name of the output point array.
    pub array_name: String,
    /// Run the per-point loop on rayon when the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for BondCountOpts {
    fn default() -> Self {
        Self {
            endpoint: EndpointRule::default(),
            malformed: MalformedHandling::default(),
            array_name: NUM_BONDS.to_string(),
            parallel: true,
        }
    }
}

/// An incident cell that was not counted as a bond.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MalformedCell {
    pub cell: CellId,
    /// The point whose query hit the cell.
    pub point: PointId,
    /// Number of points in the cell.
    pub len: usize,
}

impl From<MalformedCell> for MeshBondsError {
    fn from(m: MalformedCell) -> Self {
        MeshBondsError::MalformedBondCell {
            cell: m.cell,
            point: m.point,
            len: m.len,
        }
    }
}

/// Neighbours of one point, with the bonds that reach them.
///
/// `points[i]` is reached through `bonds[i]`. Duplicates are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub points: Vec<PointId>,
    pub bonds: Vec<CellId>,
    pub malformed: Vec<MalformedCell>,
}

impl Neighbors {
    /// Bond count: number of counted incident cells.
    #[inline]
    pub fn count(&self) -> usize {
        self.points.len()
    }
}

/// Far endpoint of the incident cell `cell_pts` as seen from `p`.
///
/// Returns `None` if the rule rejects the cell.
pub fn other_endpoint(cell_pts: &[PointId], p: PointId, rule: EndpointRule) -> Option<PointId> {
    match rule {
        EndpointRule::Legacy => match cell_pts {
            [] => None,
            [first] => Some(*first),
            [first, second, ..] if *first == p => Some(*second),
            [first, ..] => Some(*first),
        },
        EndpointRule::Strict => {
            if !CellType::from_len(cell_pts.len()).is_bond() {
                return None;
            }
            match cell_pts {
                [a, b] if *a == p => Some(*b),
                [a, b] if *b == p => Some(*a),
                _ => None,
            }
        }
    }
}

/// Neighbour points of `p` together with the bond ids that reach them.
///
/// Builds the mesh's incidence index on first use.
pub fn connected_points_with_bonds(
    mesh: &PolyMesh,
    p: PointId,
    rule: EndpointRule,
) -> Result<Neighbors, MeshBondsError> {
    let incident = mesh.point_cells(p)?;
    let mut out = Neighbors {
        points: Vec::with_capacity(incident.len()),
        bonds: Vec::with_capacity(incident.len()),
        malformed: Vec::new(),
    };
    for &c in incident {
        let pts = mesh.cell_points(c)?;
        match other_endpoint(pts, p, rule) {
            Some(q) => {
                out.points.push(q);
                out.bonds.push(c);
            }
            None => out.malformed.push(MalformedCell {
                cell: c,
                point: p,
                len: pts.len(),
            }),
        }
    }
    Ok(out)
}

/// Neighbour points of `p`, one entry per counted bond.
pub fn connected_points(
    mesh: &PolyMesh,
    p: PointId,
    rule: EndpointRule,
) -> Result<Vec<PointId>, MeshBondsError> {
    connected_points_with_bonds(mesh, p, rule).map(|n| n.points)
}

/// Result of [`BondCounter::execute`].
#[derive(Clone, Debug)]
pub struct BondCountOutput {
    /// Shallow copy of the input carrying the bond count array.
    pub mesh: PolyMesh,
    /// Incident cells that were skipped, in point order.
    pub malformed: Vec<MalformedCell>,
}

/// Transform that attaches a per-point bond count array to a mesh.
#[derive(Clone, Debug, Default)]
pub struct BondCounter {
    opts: BondCountOpts,
}

impl BondCounter {
    pub fn new(opts: BondCountOpts) -> Self {
        Self { opts }
    }

    #[inline]
    pub fn opts(&self) -> &BondCountOpts {
        &self.opts
    }

    /// Count bonds for every point of `input`.
    ///
    /// A mesh with no points (or no point storage) is returned unchanged,
    /// without the count array. Otherwise the incidence index is built on
    /// `input` (and kept there), and the output is a shallow copy of `input`
    /// with the count array added, replacing any array of the same name.
    pub fn execute(&self, input: &PolyMesh) -> Result<BondCountOutput, MeshBondsError> {
        log::debug!("Counting bonds per atom");

        let num_points = input.num_points();
        if num_points == 0 {
            log::debug!("No data to count bonds for");
            return Ok(BondCountOutput {
                mesh: input.shallow_copy(),
                malformed: Vec::new(),
            });
        }

        input.build_links()?;
        let per_point = self.count_all(input, num_points)?;

        let mut counts = Vec::with_capacity(num_points);
        let mut malformed = Vec::new();
        for (count, bad) in per_point {
            counts.push(count as f32);
            malformed.extend(bad);
        }
        if !malformed.is_empty() {
            log::debug!("{} incident cells were not counted as bonds", malformed.len());
        }

        let mut mesh = input.shallow_copy();
        mesh.add_point_array(DataArray::scalars_f32(self.opts.array_name.clone(), counts))?;
        Ok(BondCountOutput { mesh, malformed })
    }

    /// Bond counts only, without building an output mesh.
    pub fn counts(&self, input: &PolyMesh) -> Result<Vec<u32>, MeshBondsError> {
        let num_points = input.num_points();
        if num_points == 0 {
            return Ok(Vec::new());
        }
        Ok(self
            .count_all(input, num_points)?
            .into_iter()
            .map(|(count, _)| count)
            .collect())
    }

    fn count_point(
        &self,
        mesh: &PolyMesh,
        i: usize,
    ) -> Result<(u32, Vec<MalformedCell>), MeshBondsError> {
        let p = PointId::try_from(i)?;
        let neigh = connected_points_with_bonds(mesh, p, self.opts.endpoint)?;
        for m in &neigh.malformed {
            match self.opts.malformed {
                MalformedHandling::Ignore => {}
                MalformedHandling::Warn => {
                    log::warn!(
                        "Cell {} incident on point {} has {} points; not counted as a bond",
                        m.cell,
                        m.point,
                        m.len
                    );
                }
                MalformedHandling::Error => return Err((*m).into()),
            }
        }
        let count = u32::try_from(neigh.count())
            .map_err(|_| MeshBondsError::IndexOverflow(neigh.count()))?;
        Ok((count, neigh.malformed))
    }

    #[cfg(feature = "rayon")]
    fn count_all(
        &self,
        mesh: &PolyMesh,
        num_points: usize,
    ) -> Result<Vec<(u32, Vec<MalformedCell>)>, MeshBondsError> {
        use rayon::prelude::*;
        if self.opts.parallel {
            // links must exist before the index is shared across threads
            mesh.build_links()?;
            let per_point: Vec<_> = (0..num_points)
                .into_par_iter()
                .map(|i| self.count_point(mesh, i))
                .collect();
            // first failure in point order, as in the serial loop
            per_point.into_iter().collect()
        } else {
            (0..num_points).map(|i| self.count_point(mesh, i)).collect()
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn count_all(
        &self,
        mesh: &PolyMesh,
        num_points: usize,
    ) -> Result<Vec<(u32, Vec<MalformedCell>)>, MeshBondsError> {
        (0..num_points).map(|i| self.count_point(mesh, i)).collect()
    }
}

/// Count bonds with default options and return the output mesh.
///
/// # Example
/// ```rust
/// use mesh_bonds::algs::bonds::{count_bonds, NUM_BONDS};
/// use mesh_bonds::mesh_generation::ring_mesh;
/// let ring = ring_mesh(4).unwrap();
/// let out = count_bonds(&ring).unwrap();
/// let counts = out.point_data().get(NUM_BONDS).unwrap().as_f32().unwrap();
/// assert_eq!(counts, &[2.0, 2.0, 2.0, 2.0]);
/// ```
pub fn count_bonds(input: &PolyMesh) -> Result<PolyMesh, MeshBondsError> {
    BondCounter::default().execute(input).map(|o| o.mesh)
}

/// CSR table of every point's neighbours and bond ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BondGraph {
    /// CSR offsets into `adjncy`/`bond_ids` for each point.
    pub xadj: Vec<usize>,
    /// Far endpoints, grouped by point.
    pub adjncy: Vec<PointId>,
    /// Cell reaching each entry of `adjncy`.
    pub bond_ids: Vec<CellId>,
    /// Incident cells rejected by the endpoint rule.
    pub malformed: Vec<MalformedCell>,
}

impl BondGraph {
    #[inline]
    pub fn num_points(&self) -> usize {
        self.xadj.len().saturating_sub(1)
    }

    #[inline]
    pub fn neighbors(&self, p: PointId) -> &[PointId] {
        let i = p.index();
        &self.adjncy[self.xadj[i]..self.xadj[i + 1]]
    }

    #[inline]
    pub fn bonds(&self, p: PointId) -> &[CellId] {
        let i = p.index();
        &self.bond_ids[self.xadj[i]..self.xadj[i + 1]]
    }

    #[inline]
    pub fn degree(&self, p: PointId) -> usize {
        let i = p.index();
        self.xadj[i + 1] - self.xadj[i]
    }
}

/// Neighbour table for all points of `mesh`.
pub fn bond_graph(mesh: &PolyMesh, rule: EndpointRule) -> Result<BondGraph, MeshBondsError> {
    let n = mesh.num_points();
    let links = mesh.build_links()?;
    let mut graph = BondGraph {
        xadj: Vec::with_capacity(n + 1),
        adjncy: Vec::with_capacity(links.num_incidences()),
        bond_ids: Vec::with_capacity(links.num_incidences()),
        malformed: Vec::new(),
    };
    graph.xadj.push(0);
    for i in 0..n {
        let neigh = connected_points_with_bonds(mesh, PointId::try_from(i)?, rule)?;
        graph.adjncy.extend(neigh.points);
        graph.bond_ids.extend(neigh.bonds);
        graph.malformed.extend(neigh.malformed);
        graph.xadj.push(graph.adjncy.len());
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::cell_array::CellArray;

    fn p(i: u32) -> PointId {
        PointId::new(i)
    }

    fn c(i: u32) -> CellId {
        CellId::new(i)
    }

    fn mesh_of(n: usize, cells: Vec<Vec<PointId>>) -> PolyMesh {
        PolyMesh::new(vec![[0.0; 3]; n], CellArray::from_cells(cells).unwrap())
    }

    fn counts_of(mesh: &PolyMesh) -> Vec<f32> {
        mesh.point_data()
            .get(NUM_BONDS)
            .unwrap()
            .as_f32()
            .unwrap()
            .to_vec()
    }

    #[test]
    fn other_endpoint_rules_agree_on_bonds() {
        for rule in [EndpointRule::Legacy, EndpointRule::Strict] {
            assert_eq!(other_endpoint(&[p(0), p(1)], p(0), rule), Some(p(1)));
            assert_eq!(other_endpoint(&[p(0), p(1)], p(1), rule), Some(p(0)));
            assert_eq!(other_endpoint(&[p(2), p(2)], p(2), rule), Some(p(2)));
        }
    }

    #[test]
    fn legacy_rule_misreads_long_cells() {
        let tri = [p(0), p(1), p(2)];
        assert_eq!(other_endpoint(&tri, p(0), EndpointRule::Legacy), Some(p(1)));
        assert_eq!(other_endpoint(&tri, p(1), EndpointRule::Legacy), Some(p(0)));
        // p(2) sits in slot 2, yet slot 0 is answered
        assert_eq!(other_endpoint(&tri, p(2), EndpointRule::Legacy), Some(p(0)));
        assert_eq!(other_endpoint(&[p(4)], p(4), EndpointRule::Legacy), Some(p(4)));
    }

    #[test]
    fn strict_rule_rejects_non_bonds() {
        assert_eq!(other_endpoint(&[p(0), p(1), p(2)], p(0), EndpointRule::Strict), None);
        assert_eq!(other_endpoint(&[p(0)], p(0), EndpointRule::Strict), None);
        assert_eq!(other_endpoint(&[], p(0), EndpointRule::Strict), None);
    }

    #[test]
    fn neighbors_keep_multiplicity_and_bond_ids() {
        let mesh = mesh_of(2, vec![vec![p(0), p(1)], vec![p(1), p(0)]]);
        let n = connected_points_with_bonds(&mesh, p(0), EndpointRule::Strict).unwrap();
        assert_eq!(n.points, vec![p(1), p(1)]);
        assert_eq!(n.bonds, vec![c(0), c(1)]);
        assert_eq!(n.count(), 2);
        assert!(n.malformed.is_empty());
    }

    #[test]
    fn strict_counter_reports_triangles() {
        let mesh = mesh_of(3, vec![vec![p(0), p(1)], vec![p(0), p(1), p(2)]]);
        let out = BondCounter::default().execute(&mesh).unwrap();
        assert_eq!(counts_of(&out.mesh), vec![1.0, 1.0, 0.0]);
        assert_eq!(out.malformed.len(), 3);
        assert_eq!(
            out.malformed[2],
            MalformedCell {
                cell: c(1),
                point: p(2),
                len: 3
            }
        );
    }

    #[test]
    fn legacy_counter_counts_every_incident_cell() {
        let mesh = mesh_of(3, vec![vec![p(0), p(1)], vec![p(0), p(1), p(2)]]);
        let counter = BondCounter::new(BondCountOpts {
            endpoint: EndpointRule::Legacy,
            ..BondCountOpts::default()
        });
        let out = counter.execute(&mesh).unwrap();
        assert_eq!(counts_of(&out.mesh), vec![2.0, 2.0, 1.0]);
        assert!(out.malformed.is_empty());
    }

    #[test]
    fn error_handling_aborts() {
        let mesh = mesh_of(3, vec![vec![p(0), p(1), p(2)]]);
        let counter = BondCounter::new(BondCountOpts {
            malformed: MalformedHandling::Error,
            ..BondCountOpts::default()
        });
        let err = counter.execute(&mesh).unwrap_err();
        assert_eq!(
            err,
            MeshBondsError::MalformedBondCell {
                cell: c(0),
                point: p(0),
                len: 3
            }
        );
    }

    #[test]
    fn error_is_reported_for_lowest_point() {
        let mesh = mesh_of(
            6,
            vec![
                vec![p(0), p(1)],
                vec![p(4), p(5), p(3)],
                vec![p(2), p(3), p(1)],
            ],
        );
        for parallel in [false, true] {
            let counter = BondCounter::new(BondCountOpts {
                malformed: MalformedHandling::Error,
                parallel,
                ..BondCountOpts::default()
            });
            assert_eq!(
                counter.counts(&mesh).unwrap_err(),
                MeshBondsError::MalformedBondCell {
                    cell: c(2),
                    point: p(1),
                    len: 3
                }
            );
        }
    }

    #[test]
    fn legacy_self_bond_counts_once() {
        let mesh = mesh_of(2, vec![vec![p(0), p(0)], vec![p(0), p(1)]]);
        let counter = BondCounter::new(BondCountOpts {
            endpoint: EndpointRule::Legacy,
            ..BondCountOpts::default()
        });
        assert_eq!(counter.counts(&mesh).unwrap(), vec![2, 1]);
        let n = connected_points(&mesh, p(0), EndpointRule::Legacy).unwrap();
        assert_eq!(n, vec![p(0), p(1)]);
    }

    #[test]
    fn custom_array_name() {
        let mesh = mesh_of(2, vec![vec![p(0), p(1)]]);
        let counter = BondCounter::new(BondCountOpts {
            array_name: "valence".into(),
            ..BondCountOpts::default()
        });
        let out = counter.execute(&mesh).unwrap();
        assert!(out.mesh.point_data().contains("valence"));
        assert!(!out.mesh.point_data().contains(NUM_BONDS));
    }

    #[test]
    fn counts_without_output_mesh() {
        let mesh = mesh_of(3, vec![vec![p(0), p(1)], vec![p(1), p(2)]]);
        assert_eq!(BondCounter::default().counts(&mesh).unwrap(), vec![1, 2, 1]);
        assert!(BondCounter::default().counts(&PolyMesh::default()).unwrap().is_empty());
    }

    #[test]
    fn bond_graph_layout() {
        let mesh = mesh_of(3, vec![vec![p(0), p(1)], vec![p(1), p(2)]]);
        let g = bond_graph(&mesh, EndpointRule::Strict).unwrap();
        assert_eq!(g.num_points(), 3);
        assert_eq!(g.xadj, vec![0, 1, 3, 4]);
        assert_eq!(g.neighbors(p(1)), &[p(0), p(2)]);
        assert_eq!(g.bonds(p(1)), &[c(0), c(1)]);
        assert_eq!(g.degree(p(2)), 1);
    }

    #[test]
    fn opts_serde_defaults() {
        let opts: BondCountOpts = serde_json::from_str(r#"{"endpoint":"Legacy"}"#).unwrap();
        assert_eq!(opts.endpoint, EndpointRule::Legacy);
        assert_eq!(opts.malformed, MalformedHandling::Warn);
        assert_eq!(opts.array_name, NUM_BONDS);
        assert!(opts.parallel);
        let json = serde_json::to_string(&BondCountOpts::default()).unwrap();
        let back: BondCountOpts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BondCountOpts::default());
    }
}
