//! Rectangular cell ranges

use super::position::CellPosition;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A rectangle of cells described by two opposite corners
///
/// Ranges are *not* normalized: `start` is where a selection began and `end`
/// is where it was extended to, in any direction. Use [`top_left`](Self::top_left)
/// and [`bottom_right`](Self::bottom_right) (or [`cells`](Self::cells)) rather
/// than reading the corners directly when iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// Corner the range was anchored at
    pub start: CellPosition,
    /// Corner the range extends to
    pub end: CellPosition,
}

impl CellRange {
    /// Create a range from two corners (kept as given)
    pub const fn new(start: CellPosition, end: CellPosition) -> Self {
        Self { start, end }
    }

    /// Create a single-cell range
    pub const fn single(pos: CellPosition) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Create a range from row/column indices
    pub const fn from_indices(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self::new(
            CellPosition::new(start_row, start_col),
            CellPosition::new(end_row, end_col),
        )
    }

    /// Minimum row and column of the range
    pub fn top_left(&self) -> CellPosition {
        CellPosition::new(
            self.start.row.min(self.end.row),
            self.start.col.min(self.end.col),
        )
    }

    /// Maximum row and column of the range
    pub fn bottom_right(&self) -> CellPosition {
        CellPosition::new(
            self.start.row.max(self.end.row),
            self.start.col.max(self.end.col),
        )
    }

    /// The same rectangle with `start` at the top-left
    pub fn normalized(&self) -> Self {
        Self::new(self.top_left(), self.bottom_right())
    }

    /// Check if a cell is within the normalized bounds of this range
    pub fn contains(&self, pos: CellPosition) -> bool {
        let tl = self.top_left();
        let br = self.bottom_right();
        pos.row >= tl.row && pos.row <= br.row && pos.col >= tl.col && pos.col <= br.col
    }

    /// Whether both corners are the same cell
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Number of rows covered
    pub fn row_count(&self) -> u64 {
        u64::from(self.bottom_right().row - self.top_left().row) + 1
    }

    /// Number of columns covered
    pub fn col_count(&self) -> u64 {
        u64::from(self.bottom_right().col - self.top_left().col) + 1
    }

    /// Total number of cells covered
    pub fn cell_count(&self) -> u64 {
        self.row_count() * self.col_count()
    }

    /// Smallest range containing both `self` and `other`
    pub fn union(&self, other: &CellRange) -> CellRange {
        let (a, b) = (self.top_left(), other.top_left());
        let (c, d) = (self.bottom_right(), other.bottom_right());
        CellRange::from_indices(
            a.row.min(b.row),
            a.col.min(b.col),
            c.row.max(d.row),
            c.col.max(d.col),
        )
    }

    /// Intersection of two ranges, if they overlap
    pub fn intersect(&self, other: &CellRange) -> Option<CellRange> {
        let (a, b) = (self.top_left(), other.top_left());
        let (c, d) = (self.bottom_right(), other.bottom_right());
        let top = a.row.max(b.row);
        let left = a.col.max(b.col);
        let bottom = c.row.min(d.row);
        let right = c.col.min(d.col);
        (top <= bottom && left <= right)
            .then(|| CellRange::from_indices(top, left, bottom, right))
    }

    /// Iterate over all positions in the range, row by row
    pub fn cells(&self) -> CellRangeIterator {
        let top_left = self.top_left();
        CellRangeIterator {
            top_left,
            bottom_right: self.bottom_right(),
            next: Some(top_left),
        }
    }

    /// Parse `"A1:B10"` or a single reference `"C3"`
    ///
    /// Corners are kept in the order written.
    pub fn parse_a1(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((start, end)) => {
                let start = CellPosition::parse_a1(start)
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
                let end = CellPosition::parse_a1(end)
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
                Ok(Self::new(start, end))
            }
            None => CellPosition::parse_a1(s)
                .map(Self::single)
                .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e))),
        }
    }

    /// Format as `A1:B10`, or `A1` for a single cell
    pub fn to_a1(&self) -> String {
        if self.is_single() {
            self.start.to_a1()
        } else {
            format!("{}:{}", self.start.to_a1(), self.end.to_a1())
        }
    }
}

impl From<CellPosition> for CellRange {
    fn from(pos: CellPosition) -> Self {
        Self::single(pos)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_a1(s)
    }
}

/// Iterator over the positions of a range in row-major order
#[derive(Debug, Clone)]
pub struct CellRangeIterator {
    top_left: CellPosition,
    bottom_right: CellPosition,
    next: Option<CellPosition>,
}

impl Iterator for CellRangeIterator {
    type Item = CellPosition;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        self.next = if current.col < self.bottom_right.col {
            Some(CellPosition::new(current.row, current.col + 1))
        } else if current.row < self.bottom_right.row {
            Some(CellPosition::new(current.row + 1, self.top_left.col))
        } else {
            None
        };

        Some(current)
    }
}
