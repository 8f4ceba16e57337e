//! Cell type metadata for polygonal mesh cells.

/// Cell kinds a polygonal mesh can hold, classified by point count.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellType {
    /// Cell with no point references.
    Empty,
    /// 0D vertex.
    Vertex,
    /// 1D line; the only kind that represents a bond.
    Line,
    /// 2D triangle.
    Triangle,
    /// 2D quadrilateral.
    Quad,
    /// 2D polygon with more than four points.
    Polygon(usize),
}

impl CellType {
    /// Classify a cell from the length of its point list.
    pub fn from_len(len: usize) -> Self {
        match len {
            0 => CellType::Empty,
            1 => CellType::Vertex,
            2 => CellType::Line,
            3 => CellType::Triangle,
            4 => CellType::Quad,
            n => CellType::Polygon(n),
        }
    }

    #[inline]
    pub fn is_bond(self) -> bool {
        self == CellType::Line
    }
}
