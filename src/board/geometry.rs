//! Line/cell adjacency for the 4×4×4 cube
//!
//! A geometry is the fixed description of which 4-cell lines exist and, for
//! each cell, which lines pass through it. The standard Qubic geometry has
//! 76 lines: 48 axis-aligned, 24 plane diagonals and 4 space diagonals, and
//! every cell sits on between 3 and 7 of them.
//!
//! [`Geometry::standard`] builds the canonical cube; [`Geometry::from_lines`]
//! accepts externally supplied adjacency data, which is also how tests build
//! reduced boards.

use thiserror::Error;

use super::{Coord, CELL_COUNT, EDGE};

/// Errors from constructing a [`Geometry`] out of external line data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("line {line} contains out-of-bounds cell {cell}")]
    OutOfBounds { line: usize, cell: Coord },
    #[error("line {line} repeats a cell")]
    DuplicateCell { line: usize },
}

/// Immutable line/cell adjacency description.
#[derive(Debug, Clone)]
pub struct Geometry {
    lines: Vec<[Coord; 4]>,
    /// Per cell index, the indices of the lines passing through it.
    containing: Vec<Vec<u8>>,
}

impl Geometry {
    /// Build the standard 76-line Qubic geometry.
    pub fn standard() -> Self {
        let mut lines: Vec<[Coord; 4]> = Vec::with_capacity(super::LINE_COUNT);
        let r = 1..=EDGE as u8;

        // Axis-aligned: 16 per axis
        for a in r.clone() {
            for b in r.clone() {
                lines.push(std::array::from_fn(|i| Coord::new(i as u8 + 1, a, b)));
                lines.push(std::array::from_fn(|i| Coord::new(a, i as u8 + 1, b)));
                lines.push(std::array::from_fn(|i| Coord::new(a, b, i as u8 + 1)));
            }
        }

        // Plane diagonals: 2 per slice, 4 slices per orientation
        for a in r.clone() {
            lines.push(std::array::from_fn(|i| {
                Coord::new(i as u8 + 1, i as u8 + 1, a)
            }));
            lines.push(std::array::from_fn(|i| {
                Coord::new(i as u8 + 1, 4 - i as u8, a)
            }));
            lines.push(std::array::from_fn(|i| {
                Coord::new(i as u8 + 1, a, i as u8 + 1)
            }));
            lines.push(std::array::from_fn(|i| {
                Coord::new(i as u8 + 1, a, 4 - i as u8)
            }));
            lines.push(std::array::from_fn(|i| {
                Coord::new(a, i as u8 + 1, i as u8 + 1)
            }));
            lines.push(std::array::from_fn(|i| {
                Coord::new(a, i as u8 + 1, 4 - i as u8)
            }));
        }

        // Space diagonals
        lines.push(std::array::from_fn(|i| {
            let c = i as u8 + 1;
            Coord::new(c, c, c)
        }));
        lines.push(std::array::from_fn(|i| {
            let c = i as u8 + 1;
            Coord::new(4 - i as u8, c, c)
        }));
        lines.push(std::array::from_fn(|i| {
            let c = i as u8 + 1;
            Coord::new(c, 4 - i as u8, c)
        }));
        lines.push(std::array::from_fn(|i| {
            let c = i as u8 + 1;
            Coord::new(c, c, 4 - i as u8)
        }));

        Self::build(lines)
    }

    /// Build a geometry from externally supplied line data.
    ///
    /// Every cell must lie inside the cube and no line may repeat a cell.
    pub fn from_lines(lines: Vec<[Coord; 4]>) -> Result<Self, GeometryError> {
        for (li, line) in lines.iter().enumerate() {
            for (i, &cell) in line.iter().enumerate() {
                if !cell.in_bounds() {
                    return Err(GeometryError::OutOfBounds { line: li, cell });
                }
                if line[..i].contains(&cell) {
                    return Err(GeometryError::DuplicateCell { line: li });
                }
            }
        }
        Ok(Self::build(lines))
    }

    /// Assemble the per-cell adjacency lists. `lines` must already be valid.
    fn build(lines: Vec<[Coord; 4]>) -> Self {
        debug_assert!(lines.len() <= u8::MAX as usize);
        let mut containing = vec![Vec::new(); CELL_COUNT];
        for (li, line) in lines.iter().enumerate() {
            for cell in line {
                containing[cell.to_index()].push(li as u8);
            }
        }
        Self { lines, containing }
    }

    /// All lines, in construction order.
    #[inline]
    pub fn lines(&self) -> &[[Coord; 4]] {
        &self.lines
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Indices of the lines passing through a cell.
    #[inline]
    pub fn lines_through(&self, cell: Coord) -> &[u8] {
        &self.containing[cell.to_index()]
    }
}
