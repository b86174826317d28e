//! Formula evaluator
//!
//! Resolves a parsed [`Formula`] against a [`CellStore`] snapshot. The range is
//! scanned directly in the sparse store; cells outside the populated area are
//! simply absent and contribute nothing.

use crate::error::{FormulaError, FormulaResult};
use crate::parser::{parse_formula, Formula};
use duke_grid_core::{CellPosition, CellRange, CellStore};

/// Context for formula evaluation
pub struct EvaluationContext<'a> {
    /// The snapshot cell values are read from
    pub store: &'a CellStore,
    /// The cell holding the formula, if any; never read as an input
    pub current: Option<CellPosition>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a new evaluation context
    pub fn new(store: &'a CellStore) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Create a context for the formula stored at `pos`
    pub fn for_cell(store: &'a CellStore, pos: CellPosition) -> Self {
        Self {
            store,
            current: Some(pos),
        }
    }

    /// Numeric values in a range, row by row
    ///
    /// A cell counts when its displayed text parses as a finite number.
    /// Empty and non-numeric cells are skipped rather than read as zero, as
    /// is the formula's own cell.
    pub fn numeric_values(&self, range: &CellRange) -> Vec<f64> {
        self.store
            .cells_in(range)
            .filter(|(pos, _)| Some(*pos) != self.current)
            .filter_map(|(_, data)| parse_number(&data.value))
            .collect()
    }
}

/// Parse displayed text as a finite number
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Evaluate a parsed formula
pub fn evaluate(formula: &Formula, ctx: &EvaluationContext) -> FormulaResult<f64> {
    let def = formula
        .definition()
        .ok_or_else(|| FormulaError::Syntax(format!("Unknown function: {}", formula.function)))?;
    let values = ctx.numeric_values(&formula.range);
    (def.implementation)(&values)
}

/// Parse and evaluate formula text against a store
///
/// # Example
/// ```rust
/// use duke_grid_core::{CellPatch, CellPosition, CellStore};
/// use duke_grid_formula::evaluate_formula;
///
/// let store = CellStore::new()
///     .set(CellPosition::new(0, 0), CellPatch::literal("10"))
///     .set(CellPosition::new(1, 0), CellPatch::literal("32"));
/// assert_eq!(evaluate_formula("=SUM(A1:A2)", &store).unwrap(), 42.0);
/// ```
pub fn evaluate_formula(text: &str, store: &CellStore) -> FormulaResult<f64> {
    let formula = parse_formula(text)?;
    evaluate(&formula, &EvaluationContext::new(store))
}

/// Evaluate formula text held by the cell at `pos`
///
/// The cell's own value is left out of any range that covers it, so
/// re-evaluating gives the same result every time.
pub fn evaluate_formula_at(text: &str, store: &CellStore, pos: CellPosition) -> FormulaResult<f64> {
    let formula = parse_formula(text)?;
    evaluate(&formula, &EvaluationContext::for_cell(store, pos))
}

/// Evaluate formula text to the string a cell displays
///
/// Successful results render as numbers (`60`, `2.5`); failures render as
/// their error code (`#VALUE_ERROR`). Never fails.
pub fn evaluate_display(text: &str, store: &CellStore) -> String {
    display_result(evaluate_formula(text, store))
}

/// [`evaluate_display`] for formula text held by the cell at `pos`
pub fn evaluate_display_at(text: &str, store: &CellStore, pos: CellPosition) -> String {
    display_result(evaluate_formula_at(text, store, pos))
}

fn display_result(result: FormulaResult<f64>) -> String {
    match result {
        Ok(n) => format_number(n),
        Err(e) => e.display_code(),
    }
}

/// Format a result for display: integers without a fractional part
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
