//! Grid values, grid data and the rectangle transforms operate on

use std::fmt;

use crate::error::{TransformError, TransformResult};
use duke_grid_core::CellRange;

/// A scalar value in [`GridData`]
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GridValue {
    /// Empty cell
    #[default]
    Empty,
    /// Text
    String(String),
    /// Number
    Number(f64),
    /// Boolean
    Boolean(bool),
}

impl GridValue {
    /// Create a string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        GridValue::String(s.into())
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, GridValue::Empty)
    }

    /// The text of a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            GridValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Map the text of a string value; other values pass through unchanged
    pub fn map_str<F>(&self, f: F) -> GridValue
    where
        F: FnOnce(&str) -> String,
    {
        match self {
            GridValue::String(s) => GridValue::String(f(s)),
            other => other.clone(),
        }
    }
}

impl fmt::Display for GridValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridValue::Empty => Ok(()),
            GridValue::String(s) => write!(f, "{}", s),
            GridValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            GridValue::Number(n) => write!(f, "{}", n),
            GridValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<&str> for GridValue {
    fn from(s: &str) -> Self {
        GridValue::string(s)
    }
}

impl From<String> for GridValue {
    fn from(s: String) -> Self {
        GridValue::String(s)
    }
}

impl From<f64> for GridValue {
    fn from(n: f64) -> Self {
        GridValue::Number(n)
    }
}

impl From<bool> for GridValue {
    fn from(b: bool) -> Self {
        GridValue::Boolean(b)
    }
}

/// A dense, row-major grid of values
pub type GridData = Vec<Vec<GridValue>>;

/// Check that a grid is non-empty and rectangular
///
/// The first row defines the column count. Returns `(rows, cols)`.
pub fn validate_grid(data: &[Vec<GridValue>]) -> TransformResult<(usize, usize)> {
    let first = data
        .first()
        .ok_or_else(|| TransformError::InvalidGrid("grid has no rows".into()))?;
    let cols = first.len();
    if cols == 0 {
        return Err(TransformError::InvalidGrid("grid has no columns".into()));
    }
    if let Some((i, row)) = data.iter().enumerate().find(|(_, row)| row.len() != cols) {
        return Err(TransformError::InvalidGrid(format!(
            "row {} has {} columns, expected {}",
            i,
            row.len(),
            cols
        )));
    }
    Ok((data.len(), cols))
}

/// An inclusive rectangle of grid indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridRect {
    /// First row
    pub start_row: usize,
    /// Last row (inclusive)
    pub end_row: usize,
    /// First column
    pub start_col: usize,
    /// Last column (inclusive)
    pub end_col: usize,
}

impl GridRect {
    /// Create a rectangle; corners may be given in any order
    pub fn new(start_row: usize, end_row: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            start_row: start_row.min(end_row),
            end_row: start_row.max(end_row),
            start_col: start_col.min(end_col),
            end_col: start_col.max(end_col),
        }
    }

    /// Rectangle covering a whole `rows` x `cols` grid
    pub fn full(rows: usize, cols: usize) -> Self {
        Self::new(0, rows.saturating_sub(1), 0, cols.saturating_sub(1))
    }

    /// Number of rows covered
    pub fn row_count(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    /// Number of columns covered
    pub fn col_count(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    /// Check if a cell lies in the rectangle
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.start_row..=self.end_row).contains(&row)
            && (self.start_col..=self.end_col).contains(&col)
    }

    /// Clip to a `rows` x `cols` grid; `None` if nothing overlaps
    pub fn clip(&self, rows: usize, cols: usize) -> Option<GridRect> {
        if rows == 0 || cols == 0 || self.start_row >= rows || self.start_col >= cols {
            return None;
        }
        Some(GridRect {
            start_row: self.start_row,
            end_row: self.end_row.min(rows - 1),
            start_col: self.start_col,
            end_col: self.end_col.min(cols - 1),
        })
    }
}

impl From<CellRange> for GridRect {
    fn from(range: CellRange) -> Self {
        let tl = range.top_left();
        let br = range.bottom_right();
        GridRect {
            start_row: tl.row as usize,
            end_row: br.row as usize,
            start_col: tl.col as usize,
            end_col: br.col as usize,
        }
    }
}

impl From<&CellRange> for GridRect {
    fn from(range: &CellRange) -> Self {
        GridRect::from(*range)
    }
}
