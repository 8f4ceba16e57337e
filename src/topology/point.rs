//! `PointId` and `CellId`: strong, zero-cost handles for mesh entities
//!
//! Points (atoms) and cells (bonds, polygons) are both addressed by dense
//! 0-based indices. Wrapping them in distinct newtypes keeps the two index
//! spaces from being mixed up in the incidence queries, which take one and
//! return the other.
//!
//! Both types are `repr(transparent)` over `u32`, so slices of ids have the
//! same layout as slices of `u32`.

use std::fmt;

use crate::mesh_error::MeshBondsError;

/// Index of a point (atom) in a [`PolyMesh`](crate::mesh::PolyMesh).
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct PointId(u32);

/// Index of a cell (bond, polyline, polygon) in a [`CellArray`](crate::topology::cell_array::CellArray).
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct CellId(u32);

impl PointId {
    /// Creates a new `PointId` from a raw index.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use mesh_bonds::topology::point::PointId;
    /// let p = PointId::new(3);
    /// assert_eq!(p.index(), 3);
    /// ```
    #[inline]
    pub const fn new(raw: u32) -> Self {
        PointId(raw)
    }

    /// Raw `u32` value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Index usable for slice access.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl CellId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        CellId(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for PointId {
    type Error = MeshBondsError;

    fn try_from(raw: usize) -> Result<Self, Self::Error> {
        u32::try_from(raw)
            .map(PointId)
            .map_err(|_| MeshBondsError::IndexOverflow(raw))
    }
}

impl TryFrom<usize> for CellId {
    type Error = MeshBondsError;

    fn try_from(raw: usize) -> Result<Self, Self::Error> {
        u32::try_from(raw)
            .map(CellId)
            .map_err(|_| MeshBondsError::IndexOverflow(raw))
    }
}

impl From<u32> for PointId {
    #[inline]
    fn from(raw: u32) -> Self {
        PointId(raw)
    }
}

impl From<u32> for CellId {
    #[inline]
    fn from(raw: u32) -> Self {
        CellId(raw)
    }
}

// -----------------------------------------------------------------------------
// Formatting traits
// -----------------------------------------------------------------------------

impl fmt::Debug for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PointId").field(&self.0).finish()
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CellId").field(&self.0).finish()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_index() {
        let p = PointId::new(42);
        assert_eq!(p.get(), 42);
        assert_eq!(p.index(), 42usize);
        let c = CellId::from(7u32);
        assert_eq!(c.index(), 7usize);
    }

    #[test]
    fn zero_is_a_valid_index() {
        assert_eq!(PointId::new(0).index(), 0);
        assert_eq!(CellId::try_from(0usize).unwrap(), CellId::new(0));
    }

    #[test]
    fn try_from_rejects_overflow() {
        let too_big = u32::MAX as usize + 1;
        assert_eq!(
            PointId::try_from(too_big),
            Err(MeshBondsError::IndexOverflow(too_big))
        );
        assert!(CellId::try_from(too_big).is_err());
    }

    #[test]
    fn debug_and_display() {
        let p = PointId::new(7);
        assert_eq!(format!("{:?}", p), "PointId(7)");
        assert_eq!(format!("{}", p), "7");
        let c = CellId::new(2);
        assert_eq!(format!("{:?}", c), "CellId(2)");
        assert_eq!(format!("{}", c), "2");
    }

    #[test]
    fn json_roundtrip() {
        let p = PointId::new(123);
        let s = serde_json::to_string(&p).unwrap();
        assert_eq!(s, "123");
        let p2: PointId = serde_json::from_str(&s).unwrap();
        assert_eq!(p2, p);
    }
}
