//! Row and column sizes

use std::collections::BTreeMap;

use crate::settings::GridSettings;

/// Per-index column widths and row heights
///
/// Only sizes the user changed are recorded; everything else falls back to
/// the defaults in [`GridSettings`]. This is the record persisted by the
/// layout-preference collaborator (`{"columns": {...}, "rows": {...}}`).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridSizes {
    /// Column index → width
    pub columns: BTreeMap<u32, f64>,
    /// Row index → height
    pub rows: BTreeMap<u32, f64>,
}

impl GridSizes {
    /// Create an empty size table
    pub fn new() -> Self {
        Self::default()
    }

    /// Width of a column, or the default if it was never resized
    pub fn column_width(&self, col: u32, settings: &GridSettings) -> f64 {
        self.columns
            .get(&col)
            .copied()
            .unwrap_or(settings.default_column_width)
    }

    /// Height of a row, or the default if it was never resized
    pub fn row_height(&self, row: u32, settings: &GridSettings) -> f64 {
        self.rows
            .get(&row)
            .copied()
            .unwrap_or(settings.default_row_height)
    }

    /// Set a column width, raised to the minimum if needed
    ///
    /// Returns the width actually stored.
    pub fn set_column_width(&mut self, col: u32, width: f64, settings: &GridSettings) -> f64 {
        let width = at_least(width, settings.min_column_width);
        self.columns.insert(col, width);
        width
    }

    /// Set a row height, raised to the minimum if needed
    ///
    /// Returns the height actually stored.
    pub fn set_row_height(&mut self, row: u32, height: f64, settings: &GridSettings) -> f64 {
        let height = at_least(height, settings.min_row_height);
        self.rows.insert(row, height);
        height
    }

    /// Forget a column's custom width
    pub fn reset_column(&mut self, col: u32) {
        self.columns.remove(&col);
    }

    /// Forget a row's custom height
    pub fn reset_row(&mut self, row: u32) {
        self.rows.remove(&row);
    }

    /// Drop entries that are not usable sizes (non-finite, or below minimum)
    ///
    /// Applied to layouts read back from storage.
    pub fn sanitize(&mut self, settings: &GridSettings) {
        self.columns
            .retain(|_, w| w.is_finite() && *w >= settings.min_column_width);
        self.rows
            .retain(|_, h| h.is_finite() && *h >= settings.min_row_height);
    }
}

fn at_least(size: f64, min: f64) -> f64 {
    if size.is_nan() {
        min
    } else {
        size.max(min)
    }
}
