//! Multi-range selection model
//!
//! A selection is an ordered list of rectangular ranges plus the active cell
//! that anchors the next keyboard or shift gesture. Every transition takes the
//! current [`SelectionState`] and returns the next one; no gesture can leave
//! the state malformed.
//!
//! | gesture        | effect                                                      |
//! |----------------|-------------------------------------------------------------|
//! | click          | replace all ranges with the target, target becomes active   |
//! | shift+click    | move the *end* of the last range to the target              |
//! | ctrl/cmd+click | append the target as a new range, target becomes active     |
//!
//! Shift and ctrl gestures against a selection without ranges (or, for shift,
//! without an active cell) degrade to a plain click.

use crate::cell::{CellPosition, CellRange};
use crate::settings::GridBounds;

/// Cells moved by an arrow key
pub const ARROW_STEP: i64 = 1;

/// Cells moved by shift+arrow when extending a range
pub const SHIFT_ARROW_STEP: i64 = 5;

/// Rows moved by page up / page down
pub const PAGE_STEP: i64 = 10;

/// Modifier keys held during a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift held
    pub shift: bool,
    /// Ctrl (or Cmd on macOS) held
    pub ctrl: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };

    /// Shift only
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
    };

    /// Ctrl/Cmd only
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
    };

    /// Create a modifier set
    pub const fn new(shift: bool, ctrl: bool) -> Self {
        Self { shift, ctrl }
    }
}

/// Navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Start of row (with ctrl: first cell of the grid)
    Home,
    /// End of row (with ctrl: last cell of the grid)
    End,
    /// Ten rows up
    PageUp,
    /// Ten rows down
    PageDown,
}

/// The current selection
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionState {
    /// Selected ranges, oldest first
    pub ranges: Vec<CellRange>,
    /// Anchor for the next keyboard or shift gesture
    pub active_cell: Option<CellPosition>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::single(CellPosition::origin())
    }
}

impl SelectionState {
    /// The session-start selection: cell (0,0)
    pub fn new() -> Self {
        Self::default()
    }

    /// A one-cell selection with `pos` active
    pub fn single(pos: CellPosition) -> Self {
        Self {
            ranges: vec![CellRange::single(pos)],
            active_cell: Some(pos),
        }
    }

    /// A selection with no ranges and no active cell
    pub fn empty() -> Self {
        Self {
            ranges: Vec::new(),
            active_cell: None,
        }
    }

    /// Replace the selection with `range`, anchored at its start
    ///
    /// This is what typing `B2:C5` into the name box does.
    pub fn select_range(range: CellRange) -> Self {
        Self {
            ranges: vec![range],
            active_cell: Some(range.start),
        }
    }

    /// The most recently added range
    pub fn last_range(&self) -> Option<&CellRange> {
        self.ranges.last()
    }

    /// Whether `cell` lies inside any selected range
    pub fn is_cell_selected(&self, cell: CellPosition) -> bool {
        self.ranges.iter().any(|range| range.contains(cell))
    }

    /// Smallest range enclosing every selected range
    ///
    /// Disjoint selections collapse to one rectangle; bulk transforms run on
    /// this rather than on the exact selected cells.
    pub fn bounding_range(&self) -> Option<CellRange> {
        let (first, rest) = self.ranges.split_first()?;
        Some(rest.iter().fold(first.normalized(), |acc, r| acc.union(r)))
    }

    // =========================================================================
    // Pointer gestures
    // =========================================================================

    /// Click on a cell with the given modifiers
    pub fn click(&self, target: CellPosition, modifiers: Modifiers) -> Self {
        self.apply(CellRange::single(target), modifiers, |last| {
            CellRange::new(last.start, target)
        })
    }

    /// Click on a row header: like [`click`](Self::click) but spanning the row
    pub fn click_row_header(&self, row: u32, modifiers: Modifiers, bounds: GridBounds) -> Self {
        let target = CellRange::from_indices(row, 0, row, bounds.last_col());
        self.apply(target, modifiers, |last| {
            CellRange::from_indices(last.start.row, 0, row, bounds.last_col())
        })
    }

    /// Click on a column header: like [`click`](Self::click) but spanning the column
    pub fn click_column_header(&self, col: u32, modifiers: Modifiers, bounds: GridBounds) -> Self {
        let target = CellRange::from_indices(0, col, bounds.last_row(), col);
        self.apply(target, modifiers, |last| {
            CellRange::from_indices(0, last.start.col, bounds.last_row(), col)
        })
    }

    /// Shared click logic
    ///
    /// `extend` builds the replacement for the last range on shift gestures.
    fn apply<F>(&self, target: CellRange, modifiers: Modifiers, extend: F) -> Self
    where
        F: FnOnce(&CellRange) -> CellRange,
    {
        if modifiers.shift && self.active_cell.is_some() {
            if let Some((last, earlier)) = self.ranges.split_last() {
                let mut ranges = earlier.to_vec();
                ranges.push(extend(last));
                return Self {
                    ranges,
                    active_cell: self.active_cell,
                };
            }
        } else if modifiers.ctrl && !self.ranges.is_empty() {
            let mut ranges = self.ranges.clone();
            ranges.push(target);
            return Self {
                ranges,
                active_cell: Some(target.start),
            };
        }

        Self::select_range(target)
    }

    // =========================================================================
    // Keyboard navigation
    // =========================================================================

    /// Handle a navigation key
    ///
    /// Without shift the active cell moves and the selection collapses to it.
    /// With shift the end of the last range moves instead and the active cell
    /// stays put. Targets are clamped into `bounds`.
    pub fn navigate(&self, key: NavKey, modifiers: Modifiers, bounds: GridBounds) -> Self {
        if modifiers.shift && self.active_cell.is_some() {
            if let Some((last, earlier)) = self.ranges.split_last() {
                let end = nav_target(last.end, key, modifiers.ctrl, SHIFT_ARROW_STEP, bounds);
                let mut ranges = earlier.to_vec();
                ranges.push(CellRange::new(last.start, end));
                return Self {
                    ranges,
                    active_cell: self.active_cell,
                };
            }
        }

        let from = self.active_cell.unwrap_or_default();
        let target = nav_target(from, key, modifiers.ctrl, ARROW_STEP, bounds);
        Self::single(target)
    }
}

/// Where a navigation key lands when starting from `from`
fn nav_target(
    from: CellPosition,
    key: NavKey,
    ctrl: bool,
    arrow_step: i64,
    bounds: GridBounds,
) -> CellPosition {
    match key {
        NavKey::Up => bounds.offset(from, -arrow_step, 0),
        NavKey::Down => bounds.offset(from, arrow_step, 0),
        NavKey::Left => bounds.offset(from, 0, -arrow_step),
        NavKey::Right => bounds.offset(from, 0, arrow_step),
        NavKey::PageUp => bounds.offset(from, -PAGE_STEP, 0),
        NavKey::PageDown => bounds.offset(from, PAGE_STEP, 0),
        NavKey::Home if ctrl => CellPosition::origin(),
        NavKey::End if ctrl => bounds.last_cell(),
        NavKey::Home => bounds.clamp(i64::from(from.row), 0),
        NavKey::End => bounds.clamp(i64::from(from.row), i64::from(bounds.last_col())),
    }
}

/// Whether `cell` lies inside any range of `selection`
pub fn is_cell_selected(cell: CellPosition, selection: &SelectionState) -> bool {
    selection.is_cell_selected(cell)
}
