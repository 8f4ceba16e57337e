//! Mesh topology: index types, cell connectivity, and the incidence index.
//!
//! - [`point`]: `PointId` / `CellId` handles
//! - [`cell_array`]: CSR "points of cell" storage
//! - [`links`]: CSR "cells of point" index
//! - [`cell_type`]: classification of cells by point count

pub mod cell_array;
pub mod cell_type;
pub mod links;
pub mod point;

pub use cell_array::{CellArray, CellArrayBuilder};
pub use cell_type::CellType;
pub use links::CellLinks;
pub use point::{CellId, PointId};
