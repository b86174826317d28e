//! Grid settings

use std::time::Duration;

use crate::cell::{CellPosition, CellRange};

/// Default number of rows in a grid
pub const DEFAULT_ROWS: u32 = 100;

/// Default number of columns in a grid
pub const DEFAULT_COLS: u32 = 26;

/// Default column width in pixels
pub const DEFAULT_COLUMN_WIDTH: f64 = 96.0;

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f64 = 32.0;

/// Narrowest a column can be resized to
pub const MIN_COLUMN_WIDTH: f64 = 48.0;

/// Shortest a row can be resized to
pub const MIN_ROW_HEIGHT: f64 = 24.0;

/// Settings for a grid-editing session
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridSettings {
    /// Number of rows (default: 100)
    pub rows: u32,
    /// Number of columns (default: 26)
    pub cols: u32,
    /// Column width when none was set (default: 96)
    pub default_column_width: f64,
    /// Row height when none was set (default: 32)
    pub default_row_height: f64,
    /// Minimum column width (default: 48)
    pub min_column_width: f64,
    /// Minimum row height (default: 24)
    pub min_row_height: f64,
    /// Quiet period before a resized layout is persisted (default: 500ms)
    pub layout_save_delay: Duration,
    /// Quiet period before a draft edit is committed (default: 300ms)
    pub edit_commit_delay: Duration,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            min_column_width: MIN_COLUMN_WIDTH,
            min_row_height: MIN_ROW_HEIGHT,
            layout_save_delay: Duration::from_millis(500),
            edit_commit_delay: Duration::from_millis(300),
        }
    }
}

impl GridSettings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid size
    pub fn with_size(mut self, rows: u32, cols: u32) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// The navigable area described by these settings
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.rows, self.cols)
    }
}

/// The navigable size of a grid
///
/// The cell model itself is unbounded; bounds only constrain keyboard
/// navigation and whole-row/column selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridBounds {
    rows: u32,
    cols: u32,
}

impl GridBounds {
    /// Create bounds; zero sizes are raised to one
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Number of rows, at least 1
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns, at least 1
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Index of the last row
    pub fn last_row(&self) -> u32 {
        self.rows.saturating_sub(1)
    }

    /// Index of the last column
    pub fn last_col(&self) -> u32 {
        self.cols.saturating_sub(1)
    }

    /// The bottom-right cell
    pub fn last_cell(&self) -> CellPosition {
        CellPosition::new(self.last_row(), self.last_col())
    }

    /// Whether a position lies inside the grid
    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Clamp signed coordinates into the grid
    pub fn clamp(&self, row: i64, col: i64) -> CellPosition {
        CellPosition::new(
            row.clamp(0, i64::from(self.last_row())) as u32,
            col.clamp(0, i64::from(self.last_col())) as u32,
        )
    }

    /// Move `pos` by a signed offset, clamped into the grid
    pub fn offset(&self, pos: CellPosition, d_row: i64, d_col: i64) -> CellPosition {
        self.clamp(i64::from(pos.row) + d_row, i64::from(pos.col) + d_col)
    }

    /// The whole grid as a range
    pub fn full_range(&self) -> CellRange {
        CellRange::new(CellPosition::origin(), self.last_cell())
    }

    /// Clip a range to the grid, or `None` if it lies entirely outside
    pub fn clip(&self, range: &CellRange) -> Option<CellRange> {
        range.intersect(&self.full_range())
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}
