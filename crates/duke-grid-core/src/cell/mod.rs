//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellPosition`] and [`CellKey`] - A cell's location and its store key
//! - [`CellRange`] - A rectangle of cells (e.g., "A1:B10")
//! - [`CellData`] - Complete cell data including value, formula and style
//! - [`CellStore`] - Sparse copy-on-write storage

mod data;
mod position;
mod range;
mod store;

pub use data::{CellData, CellPatch, CellStyle, HorizontalAlign};
pub use position::{column_to_letters, letters_to_column, CellKey, CellPosition, KEY_SEPARATOR};
pub use range::{CellRange, CellRangeIterator};
pub use store::CellStore;
