//! # duke-grid-core
//!
//! Core data structures for the duke-grid editing engine.
//!
//! This crate provides the in-memory model a grid UI reads from and calls
//! back into:
//! - [`CellStore`] - Sparse copy-on-write cell storage keyed by [`CellPosition`]
//! - [`CellKey`] - The `"{row}-{col}"` string key derived from a position
//! - [`CellRange`] - Rectangles described by two (unordered) corners
//! - [`SelectionState`] - Multi-range selection and its gesture transitions
//! - [`GridSizes`] and [`GridSettings`] - Layout lookups and configuration
//!
//! ## Example
//!
//! ```rust
//! use duke_grid_core::{CellPatch, CellPosition, CellStore, Modifiers, SelectionState};
//!
//! let store = CellStore::new();
//! let store = store.set(CellPosition::new(0, 0), CellPatch::literal("Hello"));
//! assert_eq!(store.get(CellPosition::new(0, 0)).value, "Hello");
//!
//! let selection = SelectionState::new().click(CellPosition::new(2, 3), Modifiers::SHIFT);
//! assert!(selection.is_cell_selected(CellPosition::new(1, 1)));
//! ```

pub mod cell;
pub mod error;
pub mod layout;
pub mod selection;
pub mod settings;

// Re-exports for convenience
pub use cell::{
    column_to_letters, letters_to_column, CellData, CellKey, CellPatch, CellPosition, CellRange,
    CellStore, CellStyle, HorizontalAlign,
};
pub use error::{Error, Result};
pub use layout::GridSizes;
pub use selection::{is_cell_selected, Modifiers, NavKey, SelectionState};
pub use settings::{GridBounds, GridSettings};
