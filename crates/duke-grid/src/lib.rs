//! # duke-grid
//!
//! A spreadsheet-style grid editing engine.
//!
//! duke-grid holds the model behind an interactive grid UI:
//!
//! - Sparse copy-on-write cell storage with per-cell styles
//! - Multi-range selection driven by clicks, header clicks and keyboard
//! - Aggregate formulas (`=SUM(A1:A10)`, AVERAGE, MAX, MIN, COUNT)
//! - Bulk data-quality transforms (trim, case, remove duplicates, find/replace)
//! - Column and row sizes persisted as layout preferences
//! - CSV import and export
//!
//! ## Example
//!
//! ```rust
//! use duke_grid::prelude::*;
//!
//! let mut session = Session::new(GridSettings::default());
//!
//! session.commit_edit(CellPosition::new(0, 0), "10");
//! session.commit_edit(CellPosition::new(1, 0), "20");
//! session.commit_edit(CellPosition::new(2, 0), "=AVERAGE(A1:A2)");
//! assert_eq!(session.get(CellPosition::new(2, 0)).value, "15");
//!
//! // Select A1:B2 and make it bold
//! session.click(CellPosition::new(0, 0), Modifiers::NONE);
//! session.click(CellPosition::new(1, 1), Modifiers::SHIFT);
//! session.toggle_bold();
//! assert!(session.get(CellPosition::new(1, 1)).styles.is_bold());
//! ```

pub mod debounce;
pub mod preferences;
pub mod prelude;
pub mod session;

pub use debounce::Debouncer;
pub use preferences::{
    FilePreferenceStore, LayoutPreferences, MemoryPreferenceStore, PreferenceError,
    PreferenceStore, GRID_SIZES_KEY,
};
pub use session::{DraftEdit, RecalcStats, Session};

// Re-export core types
pub use duke_grid_core::{
    column_to_letters, is_cell_selected, letters_to_column, CellData, CellKey, CellPatch,
    CellPosition, CellRange, CellStore, CellStyle, Error, GridBounds, GridSettings, GridSizes,
    HorizontalAlign, Modifiers, NavKey, Result, SelectionState,
};

// Re-export formula types
pub use duke_grid_formula::{
    evaluate, evaluate_display, evaluate_formula, parse_formula, suggestions, EvaluationContext,
    Formula, FormulaError, FormulaErrorKind, FormulaResult, FunctionDef,
};

// Re-export transform types
pub use duke_grid_transform::{
    GridData, GridRect, GridValue, TransformError, TransformOp, TransformResult,
};

// Re-export I/O types
pub use duke_grid_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
