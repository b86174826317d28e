//! Editing session
//!
//! A [`Session`] owns the cell store and the selection for one grid and
//! wires UI gestures to them: edits are committed (and formulas evaluated),
//! selection gestures are applied, style toggles and bulk transforms run
//! over the selected cells.
//!
//! Every mutation replaces the store with a new snapshot, so a store obtained
//! from [`Session::snapshot`] never changes underneath its holder.
//!
//! # Example
//!
//! ```rust
//! use duke_grid::{CellPosition, GridSettings, Modifiers, Session, TransformOp};
//!
//! let mut session = Session::new(GridSettings::default());
//! session.commit_edit(CellPosition::new(0, 0), "10");
//! session.commit_edit(CellPosition::new(1, 0), "32");
//! session.commit_edit(CellPosition::new(2, 0), "=SUM(A1:A2)");
//! assert_eq!(session.get(CellPosition::new(2, 0)).value, "42");
//!
//! session.commit_edit(CellPosition::new(0, 1), "  mixed Case ");
//! session.click(CellPosition::new(0, 1), Modifiers::NONE);
//! session.apply_transform(&TransformOp::Trim).unwrap();
//! assert_eq!(session.get(CellPosition::new(0, 1)).value, "mixed Case");
//! ```

use std::time::Instant;

use duke_grid_core::{
    CellData, CellPatch, CellPosition, CellRange, CellStore, CellStyle, GridBounds, GridSettings,
    HorizontalAlign, Modifiers, NavKey, SelectionState,
};
use duke_grid_formula::{evaluate_display_at, evaluate_formula_at, format_number, is_formula};
use duke_grid_transform::{GridData, GridRect, GridValue, TransformOp, TransformResult};

use crate::debounce::Debouncer;

/// A pending free-text edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftEdit {
    /// Cell being edited
    pub position: CellPosition,
    /// Latest text typed
    pub text: String,
}

/// Statistics from a recalculation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecalcStats {
    /// Number of formula cells
    pub formula_count: usize,
    /// Number of cells whose displayed value changed
    pub cells_changed: usize,
    /// Number of formulas that evaluated to an error
    pub errors: usize,
}

/// One grid-editing session
#[derive(Debug)]
pub struct Session {
    settings: GridSettings,
    store: CellStore,
    selection: SelectionState,
    draft: Debouncer<DraftEdit>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GridSettings::default())
    }
}

impl Session {
    /// Start a session with an empty store and cell (0,0) selected
    pub fn new(settings: GridSettings) -> Self {
        Self::with_store(settings, CellStore::new())
    }

    /// Start a session over existing cells
    pub fn with_store(settings: GridSettings, store: CellStore) -> Self {
        let draft = Debouncer::new(settings.edit_commit_delay);
        Self {
            settings,
            store,
            selection: SelectionState::new(),
            draft,
        }
    }

    /// Session settings
    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Navigable area
    pub fn bounds(&self) -> GridBounds {
        self.settings.bounds()
    }

    /// Current store snapshot
    pub fn store(&self) -> &CellStore {
        &self.store
    }

    /// A handle to the current snapshot that later edits won't affect
    pub fn snapshot(&self) -> CellStore {
        self.store.clone()
    }

    /// Current selection
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The active cell
    pub fn active_cell(&self) -> Option<CellPosition> {
        self.selection.active_cell
    }

    /// Cell content, default if never set
    pub fn get(&self, pos: CellPosition) -> CellData {
        self.store.get(pos)
    }

    /// Text shown when a cell is edited: the formula if any, else the value
    pub fn display_text(&self, pos: CellPosition) -> String {
        self.store
            .cell(pos)
            .map(|data| data.input_text().to_string())
            .unwrap_or_default()
    }

    /// Whether a cell is highlighted
    pub fn is_cell_selected(&self, pos: CellPosition) -> bool {
        self.selection.is_cell_selected(pos)
    }

    // === Editing ===

    /// Commit text to a cell
    ///
    /// Text starting with `=` is stored as the formula and its result (or
    /// error code) as the value. Anything else is stored literally and drops
    /// any previous formula. A pending draft for the same cell is discarded;
    /// one for another cell is committed first. Returns the committed cell.
    pub fn commit_edit(&mut self, pos: CellPosition, text: &str) -> CellData {
        match self.draft.peek().map(|d| d.position) {
            Some(draft_pos) if draft_pos == pos => {
                self.draft.flush();
            }
            Some(_) => {
                self.flush_draft();
            }
            None => {}
        }
        let patch = if is_formula(text) {
            let value = evaluate_display_at(text, &self.store, pos);
            log::debug!("commit {}: {} -> {}", pos, text, value);
            CellPatch::new().value(value).formula(text)
        } else {
            log::debug!("commit {}: literal", pos);
            CellPatch::literal(text)
        };
        self.store = self.store.set(pos, patch);
        self.store.get(pos)
    }

    /// Commit text to the active cell (the formula bar)
    pub fn commit_active(&mut self, text: &str) -> Option<CellData> {
        self.flush_draft();
        let pos = self.selection.active_cell?;
        Some(self.commit_edit(pos, text))
    }

    /// Record in-progress typing; committed once the edit settles
    ///
    /// A draft for a different cell commits the previous draft first.
    pub fn draft_edit(&mut self, pos: CellPosition, text: &str, now: Instant) {
        if self.draft.peek().is_some_and(|d| d.position != pos) {
            self.flush_draft();
        }
        self.draft.schedule(
            DraftEdit {
                position: pos,
                text: text.to_string(),
            },
            now,
        );
    }

    /// The draft waiting to be committed
    pub fn pending_draft(&self) -> Option<&DraftEdit> {
        self.draft.peek()
    }

    /// Commit the draft if it has settled; returns the cell committed
    pub fn tick(&mut self, now: Instant) -> Option<CellPosition> {
        let draft = self.draft.take_due(now)?;
        self.commit_edit(draft.position, &draft.text);
        Some(draft.position)
    }

    /// Commit the draft now; returns the cell committed
    pub fn flush_draft(&mut self) -> Option<CellPosition> {
        let draft = self.draft.flush()?;
        self.commit_edit(draft.position, &draft.text);
        Some(draft.position)
    }

    /// Re-evaluate every formula cell once, in row-major order
    ///
    /// Later formulas see the refreshed values of earlier ones. A formula
    /// never reads its own cell, so running this twice changes nothing.
    pub fn recalculate(&mut self) -> RecalcStats {
        self.flush_draft();
        let formulas: Vec<(CellPosition, String)> = self
            .store
            .formula_cells()
            .map(|(pos, text)| (pos, text.to_string()))
            .collect();

        let mut stats = RecalcStats {
            formula_count: formulas.len(),
            ..Default::default()
        };
        for (pos, text) in formulas {
            let value = match evaluate_formula_at(&text, &self.store, pos) {
                Ok(n) => format_number(n),
                Err(e) => {
                    stats.errors += 1;
                    e.display_code()
                }
            };
            if self.store.get(pos).value != value {
                stats.cells_changed += 1;
                self.store = self.store.set(pos, CellPatch::new().value(value));
            }
        }
        log::debug!(
            "recalculated {} formulas, {} changed, {} errors",
            stats.formula_count,
            stats.cells_changed,
            stats.errors
        );
        stats
    }

    // === Selection ===

    /// Click a cell
    pub fn click(&mut self, target: CellPosition, modifiers: Modifiers) {
        self.flush_draft();
        let target = self.bounds().clamp(target.row.into(), target.col.into());
        self.selection = self.selection.click(target, modifiers);
    }

    /// Click a row header
    pub fn click_row_header(&mut self, row: u32, modifiers: Modifiers) {
        self.flush_draft();
        let row = row.min(self.bounds().last_row());
        self.selection = self
            .selection
            .click_row_header(row, modifiers, self.bounds());
    }

    /// Click a column header
    pub fn click_column_header(&mut self, col: u32, modifiers: Modifiers) {
        self.flush_draft();
        let col = col.min(self.bounds().last_col());
        self.selection = self
            .selection
            .click_column_header(col, modifiers, self.bounds());
    }

    /// Handle a navigation key
    pub fn navigate(&mut self, key: NavKey, modifiers: Modifiers) {
        self.flush_draft();
        self.selection = self.selection.navigate(key, modifiers, self.bounds());
    }

    /// Replace the selection with a range (name-box entry)
    pub fn select_range(&mut self, range: CellRange) {
        self.flush_draft();
        self.selection = SelectionState::select_range(range);
    }

    // === Styles ===

    /// Toggle bold on every selected cell
    ///
    /// The new state is the opposite of the active cell's.
    pub fn toggle_bold(&mut self) {
        self.flush_draft();
        let bold = !self.active_style().is_bold();
        self.update_styles(|style| style.bold(bold));
    }

    /// Toggle italic on every selected cell
    pub fn toggle_italic(&mut self) {
        self.flush_draft();
        let italic = !self.active_style().is_italic();
        self.update_styles(|style| style.italic(italic));
    }

    /// Toggle underline on every selected cell
    pub fn toggle_underline(&mut self) {
        self.flush_draft();
        let underline = !self.active_style().is_underline();
        self.update_styles(|style| style.underline(underline));
    }

    /// Align every selected cell
    pub fn set_alignment(&mut self, align: HorizontalAlign) {
        self.update_styles(|style| style.align(align));
    }

    fn active_style(&self) -> CellStyle {
        self.selection
            .active_cell
            .map(|pos| self.store.get(pos).styles)
            .unwrap_or_default()
    }

    fn update_styles<F>(&mut self, update: F)
    where
        F: Fn(CellStyle) -> CellStyle,
    {
        self.flush_draft();
        let bounds = self.bounds();
        let mut store = self.store.clone();
        for range in self.selection.ranges.iter().filter_map(|r| bounds.clip(r)) {
            store = store.set_range(&range, |_, data| {
                CellPatch::new().styles(update(data.styles.clone()))
            });
        }
        self.store = store;
    }

    // === Transforms ===

    /// Run a transform over the selection's bounding rectangle
    ///
    /// Cells whose value changes become literal text. Returns the number of
    /// cells changed. On error nothing is written.
    pub fn apply_transform(&mut self, op: &TransformOp) -> TransformResult<usize> {
        self.flush_draft();
        let Some(range) = self
            .selection
            .bounding_range()
            .and_then(|r| self.bounds().clip(&r))
        else {
            return Ok(0);
        };

        let origin = range.top_left();
        let before = self.project(&range);
        let rect = GridRect::full(before.len(), before.first().map_or(0, Vec::len));
        let after = op.apply(&before, rect)?;

        let mut patches = Vec::new();
        for (r, (old_row, new_row)) in before.iter().zip(&after).enumerate() {
            for (c, (old, new)) in old_row.iter().zip(new_row).enumerate() {
                if old != new {
                    // grid indices are bounded by the clipped range, which fits in u32
                    let pos = CellPosition::new(origin.row + r as u32, origin.col + c as u32);
                    patches.push((pos, CellPatch::literal(new.to_string())));
                }
            }
        }

        let changed = patches.len();
        self.store = self.store.set_many(patches);
        log::debug!("{} on {}: {} cells changed", op, range, changed);
        Ok(changed)
    }

    /// Cell values in a range as dense grid data
    pub fn project(&self, range: &CellRange) -> GridData {
        let tl = range.top_left();
        let br = range.bottom_right();
        (tl.row..=br.row)
            .map(|row| {
                (tl.col..=br.col)
                    .map(|col| match self.store.cell(CellPosition::new(row, col)) {
                        Some(data) if !data.value.is_empty() => GridValue::string(data.value.as_str()),
                        _ => GridValue::Empty,
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn pos(a1: &str) -> CellPosition {
        CellPosition::parse_a1(a1).unwrap()
    }

    #[test]
    fn test_commit_literal_and_formula() {
        let mut session = Session::default();
        session.commit_edit(pos("A1"), "10");
        session.commit_edit(pos("A2"), "20");
        let cell = session.commit_edit(pos("A3"), "=sum(A1:A2)");

        assert_eq!(cell.value, "30");
        assert_eq!(cell.formula.as_deref(), Some("=sum(A1:A2)"));
        assert_eq!(session.display_text(pos("A3")), "=sum(A1:A2)");
        assert_eq!(session.display_text(pos("A1")), "10");
        assert_eq!(session.display_text(pos("Z9")), "");

        let cell = session.commit_edit(pos("A3"), "plain");
        assert_eq!(cell.formula, None);
        assert_eq!(cell.value, "plain");
    }

    #[test]
    fn test_commit_error_code() {
        let mut session = Session::default();
        let cell = session.commit_edit(pos("B1"), "=MAX(ABC)");
        assert_eq!(cell.value, "#RANGE_ERROR");
        assert!(cell.is_formula());
    }

    #[test]
    fn test_snapshots_are_isolated() {
        let mut session = Session::default();
        session.commit_edit(pos("A1"), "old");
        let snapshot = session.snapshot();
        session.commit_edit(pos("A1"), "new");

        assert_eq!(snapshot.get(pos("A1")).value, "old");
        assert_eq!(session.get(pos("A1")).value, "new");
    }

    #[test]
    fn test_commit_active() {
        let mut session = Session::default();
        session.click(pos("C3"), Modifiers::NONE);
        session.commit_active("hi");
        assert_eq!(session.get(pos("C3")).value, "hi");

        session.selection = SelectionState::empty();
        assert_eq!(session.commit_active("nowhere"), None);
    }

    #[test]
    fn test_drafts_debounce_and_flush() {
        let start = Instant::now();
        let mut session = Session::default();

        session.draft_edit(pos("A1"), "1", start);
        session.draft_edit(pos("A1"), "12", start + Duration::from_millis(100));
        assert_eq!(session.tick(start + Duration::from_millis(200)), None);
        assert_eq!(session.get(pos("A1")).value, "");

        assert_eq!(session.tick(start + Duration::from_millis(400)), Some(pos("A1")));
        assert_eq!(session.get(pos("A1")).value, "12");

        // a gesture commits whatever is pending
        session.draft_edit(pos("B1"), "typed", start);
        session.navigate(NavKey::Down, Modifiers::NONE);
        assert_eq!(session.get(pos("B1")).value, "typed");
        assert!(session.pending_draft().is_none());
    }

    #[test]
    fn test_draft_for_other_cell_commits_previous() {
        let now = Instant::now();
        let mut session = Session::default();
        session.draft_edit(pos("A1"), "first", now);
        session.draft_edit(pos("A2"), "second", now);

        assert_eq!(session.get(pos("A1")).value, "first");
        assert_eq!(session.pending_draft().map(|d| d.position), Some(pos("A2")));
    }

    #[test]
    fn test_commit_discards_older_draft_for_same_cell() {
        let now = Instant::now();
        let mut session = Session::default();
        session.draft_edit(pos("A1"), "typed", now);
        session.commit_edit(pos("A1"), "final");
        assert!(session.pending_draft().is_none());

        assert_eq!(session.tick(now + Duration::from_secs(5)), None);
        assert_eq!(session.flush_draft(), None);
        assert_eq!(session.get(pos("A1")).value, "final");
    }

    #[test]
    fn test_commit_flushes_draft_for_other_cell() {
        let now = Instant::now();
        let mut session = Session::default();
        session.draft_edit(pos("A1"), "10", now);
        assert_eq!(session.commit_edit(pos("A2"), "=SUM(A1)").value, "10");
        assert!(session.pending_draft().is_none());
    }

    #[test]
    fn test_recalculate() {
        let mut session = Session::default();
        session.commit_edit(pos("A1"), "1");
        session.commit_edit(pos("B1"), "=SUM(A1:A3)");
        session.commit_edit(pos("B2"), "=SUM(B1)");
        session.commit_edit(pos("B3"), "=MIN(Z1:Z2)");
        session.commit_edit(pos("A2"), "5");

        assert_eq!(session.get(pos("B1")).value, "1");
        let stats = session.recalculate();
        assert_eq!(
            stats,
            RecalcStats {
                formula_count: 3,
                cells_changed: 2,
                errors: 1,
            }
        );
        assert_eq!(session.get(pos("B1")).value, "6");
        assert_eq!(session.get(pos("B2")).value, "6");
    }

    #[test]
    fn test_recalculate_is_stable_when_range_covers_own_cell() {
        let mut session = Session::default();
        session.commit_edit(pos("A1"), "1");
        assert_eq!(session.commit_edit(pos("A3"), "=SUM(A1:A3)").value, "1");
        assert_eq!(session.commit_edit(pos("B1"), "=COUNT(A1:B1)").value, "1");

        let first = session.recalculate();
        assert_eq!(first.cells_changed, 0);
        assert_eq!(session.get(pos("A3")).value, "1");

        let second = session.recalculate();
        assert_eq!(second, first);
        assert_eq!(session.get(pos("A3")).value, "1");
        assert_eq!(session.get(pos("B1")).value, "1");
    }

    #[test]
    fn test_click_clamps_to_bounds() {
        let mut session = Session::new(GridSettings::default().with_size(10, 5));
        session.click(CellPosition::new(50, 50), Modifiers::NONE);
        assert_eq!(session.active_cell(), Some(CellPosition::new(9, 4)));
    }

    #[test]
    fn test_toggle_commits_pending_draft() {
        let now = Instant::now();
        let mut session = Session::default();
        session.draft_edit(pos("A1"), "draft", now);
        session.toggle_italic();
        assert!(session.pending_draft().is_none());
        let cell = session.get(pos("A1"));
        assert_eq!(cell.value, "draft");
        assert!(cell.styles.is_italic());
    }

    #[test]
    fn test_toggle_bold_follows_active_cell() {
        let mut session = Session::default();
        session.click(pos("A1"), Modifiers::NONE);
        session.click(pos("B2"), Modifiers::SHIFT);
        session.set_alignment(HorizontalAlign::Center);

        session.toggle_bold();
        for a1 in ["A1", "A2", "B1", "B2"] {
            let styles = session.get(pos(a1)).styles;
            assert!(styles.is_bold(), "{a1}");
            assert_eq!(styles.align, HorizontalAlign::Center);
        }
        assert!(!session.get(pos("C1")).styles.is_bold());

        session.toggle_bold();
        assert!(!session.get(pos("B2")).styles.is_bold());
        assert_eq!(session.get(pos("B2")).styles.align, HorizontalAlign::Center);
    }

    #[test]
    fn test_toggle_over_disjoint_ranges() {
        let mut session = Session::default();
        session.click(pos("A1"), Modifiers::NONE);
        session.click(pos("C3"), Modifiers::CTRL);
        session.toggle_italic();
        session.toggle_underline();

        assert!(session.get(pos("A1")).styles.is_italic());
        assert!(session.get(pos("C3")).styles.is_underline());
        assert!(!session.get(pos("B2")).styles.is_italic());
    }

    #[test]
    fn test_header_styles_stay_in_bounds() {
        let mut session = Session::new(GridSettings::default().with_size(4, 3));
        session.click_row_header(1, Modifiers::NONE);
        session.toggle_bold();
        assert_eq!(session.store().len(), 3);
    }

    #[test]
    fn test_apply_transform_writes_changed_cells() {
        let mut session = Session::default();
        session.commit_edit(pos("A1"), "hello");
        session.commit_edit(pos("A2"), "10");
        session.commit_edit(pos("A3"), "=SUM(A2)");
        session.select_range(CellRange::parse_a1("A1:A4").unwrap());

        let changed = session.apply_transform(&TransformOp::Upper).unwrap();
        assert_eq!(changed, 1);
        assert_eq!(session.get(pos("A1")).value, "HELLO");
        assert!(session.get(pos("A3")).is_formula());
    }

    #[test]
    fn test_apply_transform_dedupes_rows() {
        let mut session = Session::default();
        for (a1, v) in [("A1", "a"), ("B1", "b"), ("A2", "a"), ("B2", "b"), ("A3", "c"), ("B3", "d")] {
            session.commit_edit(pos(a1), v);
        }
        session.select_range(CellRange::parse_a1("A1:B3").unwrap());
        session.apply_transform(&TransformOp::RemoveDuplicates).unwrap();

        assert_eq!(session.get(pos("A2")).value, "c");
        assert_eq!(session.get(pos("B2")).value, "d");
        assert_eq!(session.get(pos("A3")).value, "c");
    }

    #[test]
    fn test_apply_transform_error_leaves_store() {
        let mut session = Session::default();
        session.commit_edit(pos("A1"), "x");
        let before = session.snapshot();
        let err = session.apply_transform(&TransformOp::find_replace("", "y", true));
        assert!(err.is_err());
        assert!(session.store().same_snapshot(&before));
    }
}
