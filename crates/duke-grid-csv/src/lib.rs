//! # duke-grid-csv
//!
//! CSV reader and writer for duke-grid.
//!
//! CSV files load either as [`GridData`](duke_grid_transform::GridData), with
//! per-field type detection, or as a [`CellStore`](duke_grid_core::CellStore)
//! of literal text.

mod reader;
mod writer;
mod options;
mod error;

pub use reader::CsvReader;
pub use writer::CsvWriter;
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use error::{CsvError, CsvResult};
