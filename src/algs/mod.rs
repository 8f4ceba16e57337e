//! Re-export public algorithms.

pub mod bonds;
pub mod filter;

pub use bonds::{BondCounter, count_bonds};
pub use filter::{MeshFilter, apply_filters};
