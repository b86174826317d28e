//! Prelude module - common imports for duke-grid users
//!
//! ```rust
//! use duke_grid::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellData,
    CellPatch,
    CellPosition,
    CellRange,
    CellStore,
    CellStyle,
    HorizontalAlign,

    // Selection types
    Modifiers,
    NavKey,
    SelectionState,

    // Settings and layout
    GridSettings,
    GridSizes,
    LayoutPreferences,
    MemoryPreferenceStore,
    PreferenceStore,

    // Session
    Session,

    // Formulas
    FormulaError,

    // Transforms
    GridData,
    GridRect,
    GridValue,
    TransformOp,

    // I/O types
    CsvReader,
    CsvWriter,

    // Error types
    Error,
    Result,
};
