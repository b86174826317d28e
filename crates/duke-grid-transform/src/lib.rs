//! # duke-grid-transform
//!
//! Bulk data-quality transforms for duke-grid.
//!
//! Transforms are pure functions over [`GridData`], a dense rectangular
//! array of [`GridValue`]s, scoped to one inclusive [`GridRect`]:
//! - trim, upper and lower apply to string cells only
//! - remove-duplicates collapses repeated rows to their first occurrence
//! - find-and-replace substitutes a literal string, optionally ignoring case
//!
//! Each entry point validates that the grid is non-empty and rectangular and
//! returns a new grid; the input is never modified.
//!
//! ## Example
//!
//! ```rust
//! use duke_grid_transform::{apply_find_and_replace, GridRect, GridValue};
//!
//! let grid = vec![vec![GridValue::string("Hello World")]];
//! let out = apply_find_and_replace(&grid, GridRect::new(0, 0, 0, 0), "hello", "X", false).unwrap();
//! assert_eq!(out[0][0], GridValue::string("X World"));
//! ```

pub mod error;
pub mod op;
pub mod transforms;
pub mod value;

pub use error::{TransformError, TransformResult};
pub use op::TransformOp;
pub use transforms::{
    apply_find_and_replace, apply_lower, apply_map, apply_remove_duplicates, apply_trim,
    apply_upper, find_and_replace, lower, remove_duplicates, trim, upper, Replacer,
};
pub use value::{validate_grid, GridData, GridRect, GridValue};
