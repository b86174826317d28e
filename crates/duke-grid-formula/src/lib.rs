//! # duke-grid-formula
//!
//! Formula parser and evaluator for duke-grid.
//!
//! Formulas are a single aggregate function over one rectangular range:
//! `=SUM(A1:A10)`, `=AVERAGE(B2:D4)`, `=MAX(C3)`. Supported functions are
//! SUM, AVERAGE, MAX, MIN and COUNT.
//!
//! Malformed input never panics. Every failure is a typed [`FormulaError`]
//! (syntax, range or value) that renders as a display code such as
//! `#RANGE_ERROR`.
//!
//! ## Example
//!
//! ```rust
//! use duke_grid_core::{CellPatch, CellPosition, CellStore};
//! use duke_grid_formula::evaluate_display;
//!
//! let store = CellStore::new()
//!     .set(CellPosition::new(0, 0), CellPatch::literal("10"))
//!     .set(CellPosition::new(1, 0), CellPatch::literal("20"));
//!
//! assert_eq!(evaluate_display("=AVERAGE(A1:A2)", &store), "15");
//! assert_eq!(evaluate_display("=AVERAGE(C1:C9)", &store), "#VALUE_ERROR");
//! ```

pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;

pub use error::{FormulaError, FormulaErrorKind, FormulaResult};
pub use evaluator::{
    evaluate, evaluate_display, evaluate_display_at, evaluate_formula, evaluate_formula_at,
    format_number, parse_number, EvaluationContext,
};
pub use functions::{registry, suggestions, FunctionDef, FunctionRegistry};
pub use parser::{
    is_formula, parse_cell_reference, parse_formula, parse_range_reference, Formula,
    FORMULA_PREFIX,
};
