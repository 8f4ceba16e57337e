#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-bonds
//!
//! mesh-bonds counts, for every point of a polygonal mesh, the number of
//! line cells (bonds) incident on it. Points are read as atoms and 2-point
//! cells as the bonds between them. The result is attached to a shallow
//! copy of the input as a one-component point array named `"numBonds"`.
//!
//! ## Features
//! - [`PolyMesh`](mesh::PolyMesh) with `Arc`-shared coordinates, CSR cell
//!   connectivity, and named point arrays
//! - A lazily built point → cell incidence index ([`CellLinks`](topology::links::CellLinks))
//! - [`BondCounter`](algs::bonds::BondCounter) with configurable endpoint and
//!   malformed-cell policies, plus neighbour / bond-id queries
//! - Optional `rayon` feature for a parallel per-point loop
//!
//! ## Usage
//! ```rust
//! use mesh_bonds::prelude::*;
//!
//! let chain = chain_mesh(4).unwrap();
//! let out = count_bonds(&chain).unwrap();
//! let counts = out.point_data().get(NUM_BONDS).unwrap().as_f32().unwrap();
//! assert_eq!(counts, &[1.0, 2.0, 2.0, 1.0]);
//! ```
//!
//! ## Logging
//! Diagnostics go through the `log` facade. The library installs no logger.

pub mod algs;
pub mod data;
pub mod mesh;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::bonds::{
        BondCountOpts, BondCountOutput, BondCounter, BondGraph, EndpointRule, MalformedCell,
        MalformedHandling, NUM_BONDS, Neighbors, bond_graph, connected_points,
        connected_points_with_bonds, count_bonds,
    };
    pub use crate::algs::filter::{MeshFilter, RemovePointArray, apply_filters};
    pub use crate::data::point_data::{ArrayValues, DataArray, PointData};
    pub use crate::mesh::PolyMesh;
    pub use crate::mesh_error::MeshBondsError;
    pub use crate::mesh_generation::{chain_mesh, from_bonds, ring_mesh};
    pub use crate::topology::cell_array::{CellArray, CellArrayBuilder};
    pub use crate::topology::cell_type::CellType;
    pub use crate::topology::links::CellLinks;
    pub use crate::topology::point::{CellId, PointId};
}
