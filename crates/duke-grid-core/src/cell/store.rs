//! Sparse copy-on-write cell storage
//!
//! Only cells that differ from the default are stored. Every mutation returns
//! a new [`CellStore`] snapshot; snapshots already handed out never change.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{CellData, CellPatch, CellPosition, CellRange};

/// Sparse mapping from cell position to cell data
///
/// Design decisions:
/// - Keyed by [`CellPosition`], whose ordering is row-major, so a rectangle
///   can be scanned with a single ordered range query instead of
///   materializing a dense matrix
/// - The map sits behind an `Arc`; cloning a store is O(1) and a mutation
///   only copies the map when another snapshot still shares it
/// - Cells equal to [`CellData::default`] are never stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellStore {
    cells: Arc<BTreeMap<CellPosition, CellData>>,
}

impl CellStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell's data, synthesizing the default for unset cells
    pub fn get(&self, pos: CellPosition) -> CellData {
        self.cell(pos).cloned().unwrap_or_default()
    }

    /// Get a stored cell, or `None` if it holds default content
    pub fn cell(&self, pos: CellPosition) -> Option<&CellData> {
        self.cells.get(&pos)
    }

    /// Merge `patch` over the current (or default) data at `pos`
    ///
    /// Returns the new snapshot; `self` is left untouched. No bounds checking
    /// is done here, callers constrain positions to their grid size.
    #[must_use = "set returns a new snapshot and leaves the original unchanged"]
    pub fn set(&self, pos: CellPosition, patch: CellPatch) -> CellStore {
        self.set_many(std::iter::once((pos, patch)))
    }

    /// Apply one patch per position in a single snapshot
    #[must_use = "set_many returns a new snapshot and leaves the original unchanged"]
    pub fn set_many<I>(&self, patches: I) -> CellStore
    where
        I: IntoIterator<Item = (CellPosition, CellPatch)>,
    {
        let mut next = self.clone();
        {
            let cells = Arc::make_mut(&mut next.cells);
            for (pos, patch) in patches {
                if patch.is_empty() {
                    continue;
                }
                let data = cells
                    .get(&pos)
                    .cloned()
                    .unwrap_or_default()
                    .merged(patch);
                write_cell(cells, pos, data);
            }
        }
        next
    }

    /// Apply a patch produced per cell to every position in `range`
    ///
    /// The range is normalized first, so corners may be given in any order.
    /// The producer sees each cell's current (or default) data.
    #[must_use = "set_range returns a new snapshot and leaves the original unchanged"]
    pub fn set_range<F>(&self, range: &CellRange, mut patch: F) -> CellStore
    where
        F: FnMut(CellPosition, &CellData) -> CellPatch,
    {
        let default = CellData::default();
        let patches: Vec<_> = range
            .cells()
            .map(|pos| {
                let current = self.cell(pos).unwrap_or(&default);
                (pos, patch(pos, current))
            })
            .collect();
        self.set_many(patches)
    }

    /// Reset a cell to default content
    #[must_use = "clear returns a new snapshot and leaves the original unchanged"]
    pub fn clear(&self, pos: CellPosition) -> CellStore {
        if !self.cells.contains_key(&pos) {
            return self.clone();
        }
        let mut next = self.clone();
        Arc::make_mut(&mut next.cells).remove(&pos);
        next
    }

    /// Number of stored (non-default) cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell holds non-default content
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over stored cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellPosition, &CellData)> + '_ {
        self.cells.iter().map(|(pos, data)| (*pos, data))
    }

    /// Iterate over the stored cells inside `range`, in row-major order
    ///
    /// Unset cells are skipped, so the cost depends on how many cells are
    /// stored in the covered rows, not on the size of the range.
    pub fn cells_in(&self, range: &CellRange) -> impl Iterator<Item = (CellPosition, &CellData)> + '_ {
        let top_left = range.top_left();
        let bottom_right = range.bottom_right();
        let (left, right) = (top_left.col, bottom_right.col);

        self.cells
            .range(top_left..=bottom_right)
            .filter(move |(pos, _)| pos.col >= left && pos.col <= right)
            .map(|(pos, data)| (*pos, data))
    }

    /// Iterate over cells holding a formula, in row-major order
    pub fn formula_cells(&self) -> impl Iterator<Item = (CellPosition, &str)> + '_ {
        self.iter()
            .filter_map(|(pos, data)| data.formula.as_deref().map(|f| (pos, f)))
    }

    /// Smallest range containing every stored cell
    pub fn used_bounds(&self) -> Option<CellRange> {
        let first = self.cells.keys().next()?;
        let last = self.cells.keys().next_back()?;
        let (min_col, max_col) = self
            .cells
            .keys()
            .fold((u32::MAX, 0), |(lo, hi), pos| (lo.min(pos.col), hi.max(pos.col)));
        Some(CellRange::from_indices(first.row, min_col, last.row, max_col))
    }

    /// Whether two stores are the same snapshot (not just equal content)
    pub fn same_snapshot(&self, other: &CellStore) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}

fn write_cell(cells: &mut BTreeMap<CellPosition, CellData>, pos: CellPosition, data: CellData) {
    if data.is_default() {
        cells.remove(&pos);
    } else {
        cells.insert(pos, data);
    }
}

impl FromIterator<(CellPosition, CellData)> for CellStore {
    fn from_iter<I: IntoIterator<Item = (CellPosition, CellData)>>(iter: I) -> Self {
        let mut cells = BTreeMap::new();
        for (pos, data) in iter {
            write_cell(&mut cells, pos, data);
        }
        Self {
            cells: Arc::new(cells),
        }
    }
}
