//! Per-point attribute data.

pub mod point_data;

pub use point_data::{ArrayValues, DataArray, PointData};
