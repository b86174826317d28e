//! End-to-end editing session tests

use duke_grid::prelude::*;
use duke_grid::{suggestions, FilePreferenceStore, GRID_SIZES_KEY};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn pos(a1: &str) -> CellPosition {
    CellPosition::parse_a1(a1).unwrap()
}

#[test]
fn test_sample_sheet() {
    let mut session = Session::default();
    for (a1, v) in [("A1", "10"), ("A2", "20"), ("A3", "30"), ("B1", "5"), ("B2", "15"), ("B3", "25")] {
        session.commit_edit(pos(a1), v);
    }

    let cases = [
        ("C1", "=SUM(A1:A3)", "60"),
        ("C2", "=AVERAGE(A1:A3)", "20"),
        ("C3", "=MAX(A1:A3)", "30"),
        ("C4", "=MIN(B1:B3)", "5"),
        ("C5", "=COUNT(A1:B3)", "6"),
        ("D1", "=AVERAGE(X1:X5)", "#VALUE_ERROR"),
        ("D2", "=AVERAGE()", "#SYNTAX_ERROR"),
        ("D3", "=MAX(ABC)", "#RANGE_ERROR"),
    ];
    for (a1, formula, expected) in cases {
        assert_eq!(session.commit_edit(pos(a1), formula).value, expected, "{formula}");
    }
}

#[test]
fn test_selection_gestures() {
    let mut session = Session::default();
    assert_eq!(session.selection().ranges, vec![CellRange::single(CellPosition::origin())]);

    session.click(CellPosition::new(2, 3), Modifiers::SHIFT);
    assert_eq!(
        session.selection().ranges,
        vec![CellRange::new(CellPosition::new(0, 0), CellPosition::new(2, 3))]
    );
    for row in 0..3 {
        for col in 0..4 {
            assert!(session.is_cell_selected(CellPosition::new(row, col)));
        }
    }
    assert!(!session.is_cell_selected(CellPosition::new(3, 3)));

    session.click(CellPosition::new(0, 0), Modifiers::NONE);
    session.click(CellPosition::new(5, 5), Modifiers::CTRL);
    assert_eq!(session.selection().ranges.len(), 2);
    assert_eq!(session.active_cell(), Some(CellPosition::new(5, 5)));
}

#[test]
fn test_keyboard_navigation() {
    let mut session = Session::new(GridSettings::default().with_size(20, 5));
    session.navigate(NavKey::PageDown, Modifiers::NONE);
    assert_eq!(session.active_cell(), Some(CellPosition::new(10, 0)));

    session.navigate(NavKey::End, Modifiers::NONE);
    assert_eq!(session.active_cell(), Some(CellPosition::new(10, 4)));

    session.navigate(NavKey::Home, Modifiers::CTRL);
    assert_eq!(session.active_cell(), Some(CellPosition::origin()));

    session.navigate(NavKey::Up, Modifiers::NONE);
    assert_eq!(session.active_cell(), Some(CellPosition::origin()));
}

#[test]
fn test_transform_selection() {
    let mut session = Session::default();
    session.commit_edit(pos("A1"), "Hello World");
    session.commit_edit(pos("A2"), "say hello");
    session.select_range(CellRange::parse_a1("A1:A2").unwrap());

    let changed = session
        .apply_transform(&TransformOp::find_replace("hello", "X", false))
        .unwrap();
    assert_eq!(changed, 2);
    assert_eq!(session.get(pos("A1")).value, "X World");
    assert_eq!(session.get(pos("A2")).value, "say X");
}

#[test]
fn test_suggestions() {
    let names: Vec<&str> = suggestions("=a").iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["AVERAGE"]);
    assert!(suggestions("a").is_empty());
    assert_eq!(suggestions("=").len(), 5);
}

#[test]
fn test_layout_preferences_persist_to_disk() {
    let dir = tempdir().unwrap();
    let start = Instant::now();

    {
        let store = FilePreferenceStore::new(dir.path().join("prefs"));
        let mut prefs = LayoutPreferences::new(store, GridSettings::default());
        prefs.resize_column(1, 180.0, start);
        prefs.resize_row(4, 50.0, start + Duration::from_millis(10));
        assert!(prefs.is_dirty());
    }

    let store = FilePreferenceStore::new(dir.path().join("prefs"));
    assert!(store.path(GRID_SIZES_KEY).exists());
    let prefs = LayoutPreferences::new(store, GridSettings::default());
    assert_eq!(prefs.column_width(1), 180.0);
    assert_eq!(prefs.row_height(4), 50.0);
    assert_eq!(prefs.column_width(0), 96.0);
}

#[test]
fn test_csv_into_session() {
    let csv = "10,20\n30,40\n";
    let store = CsvReader::read_store(csv.as_bytes(), &Default::default()).unwrap();
    let mut session = Session::with_store(GridSettings::default(), store);
    assert_eq!(session.commit_edit(pos("C1"), "=SUM(A1:B2)").value, "100");
}
