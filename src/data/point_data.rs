//! Named per-point attribute arrays.
//!
//! A [`DataArray`] is a flat buffer of `num_tuples * num_components` values
//! with a name. [`PointData`] keeps an ordered list of them, one tuple per
//! mesh point. Adding an array under a name that already exists replaces
//! the old array in place (last write wins).
//!
//! Array values sit behind `Arc`, so a shallow mesh copy shares them.

use std::sync::Arc;

use crate::mesh_error::MeshBondsError;

/// Typed value buffer of a [`DataArray`].
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayValues {
    Float32(Arc<[f32]>),
    Float64(Arc<[f64]>),
    Int32(Arc<[i32]>),
    Int64(Arc<[i64]>),
}

impl ArrayValues {
    pub fn len(&self) -> usize {
        match self {
            ArrayValues::Float32(v) => v.len(),
            ArrayValues::Float64(v) => v.len(),
            ArrayValues::Int32(v) => v.len(),
            ArrayValues::Int64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at flat position `i`, widened to `f64`.
    pub fn get_f64(&self, i: usize) -> Option<f64> {
        match self {
            ArrayValues::Float32(v) => v.get(i).map(|x| f64::from(*x)),
            ArrayValues::Float64(v) => v.get(i).copied(),
            ArrayValues::Int32(v) => v.get(i).map(|x| f64::from(*x)),
            ArrayValues::Int64(v) => v.get(i).map(|x| *x as f64),
        }
    }
}

/// A named attribute array.
#[derive(Clone, Debug, PartialEq)]
pub struct DataArray {
    name: String,
    num_components: usize,
    values: ArrayValues,
}

impl DataArray {
    /// Create an array; `values.len()` must be a multiple of `num_components`.
    pub fn new(
        name: impl Into<String>,
        num_components: usize,
        values: ArrayValues,
    ) -> Result<Self, MeshBondsError> {
        let name = name.into();
        let num_components = num_components.max(1);
        if values.len() % num_components != 0 {
            let expected = values.len().div_ceil(num_components) * num_components;
            return Err(MeshBondsError::ArrayLengthMismatch {
                name,
                expected,
                found: values.len(),
            });
        }
        Ok(Self {
            name,
            num_components,
            values,
        })
    }

    /// One-component `f32` array.
    pub fn scalars_f32(name: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            num_components: 1,
            values: ArrayValues::Float32(values.into()),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    #[inline]
    pub fn num_tuples(&self) -> usize {
        self.values.len() / self.num_components
    }

    #[inline]
    pub fn values(&self) -> &ArrayValues {
        &self.values
    }

    /// Borrow the values as `f32` if that is the stored type.
    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.values {
            ArrayValues::Float32(v) => Some(&v[..]),
            _ => None,
        }
    }

    /// First component of tuple `i`, widened to `f64`.
    pub fn scalar(&self, i: usize) -> Option<f64> {
        self.values.get_f64(i * self.num_components)
    }
}

/// Ordered collection of per-point arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointData {
    arrays: Vec<DataArray>,
}

impl PointData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of arrays.
    #[inline]
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Add `array`, replacing any array with the same name.
    ///
    /// Returns the replaced array, if any. The caller is responsible for the
    /// tuple count; [`PolyMesh::add_point_array`](crate::mesh::PolyMesh::add_point_array)
    /// checks it against the mesh.
    pub fn add_array(&mut self, array: DataArray) -> Option<DataArray> {
        match self.arrays.iter_mut().find(|a| a.name == array.name) {
            Some(slot) => Some(std::mem::replace(slot, array)),
            None => {
                self.arrays.push(array);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.arrays.iter().find(|a| a.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<DataArray> {
        let pos = self.arrays.iter().position(|a| a.name == name)?;
        Some(self.arrays.remove(pos))
    }

    /// Array names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.iter().map(|a| a.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataArray> {
        self.arrays.iter()
    }
}
