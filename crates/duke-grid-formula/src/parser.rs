//! Formula parser
//!
//! Grammar:
//!
//! ```text
//! formula   := "=" name "(" reference [ ":" reference ] ")"
//! name      := SUM | AVERAGE | MAX | MIN | COUNT      (case-insensitive)
//! reference := letters digits                         (A1, c7, AA10, ...)
//! ```
//!
//! A single reference is treated as a one-cell range. Anything the grammar
//! doesn't cover (operators, nested calls, comma-separated arguments) is
//! rejected.

use crate::error::{FormulaError, FormulaResult};
use crate::functions::{registry, FunctionDef};
use duke_grid_core::{CellPosition, CellRange};
use lazy_regex::regex_captures;

/// The formula sigil
pub const FORMULA_PREFIX: char = '=';

/// A parsed formula: one aggregate function over one range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formula {
    /// Function name (uppercase)
    pub function: &'static str,
    /// Range argument, corners as written
    pub range: CellRange,
}

impl Formula {
    /// The function definition this formula calls
    pub fn definition(&self) -> Option<&'static FunctionDef> {
        registry().get(self.function)
    }
}

/// Whether text should be treated as a formula
pub fn is_formula(text: &str) -> bool {
    text.starts_with(FORMULA_PREFIX)
}

/// Parse formula text
///
/// # Example
/// ```rust
/// use duke_grid_formula::parse_formula;
/// use duke_grid_core::CellRange;
///
/// let formula = parse_formula("=sum(a1:a3)").unwrap();
/// assert_eq!(formula.function, "SUM");
/// assert_eq!(formula.range, CellRange::from_indices(0, 0, 2, 0));
/// ```
///
/// Errors are classified as follows:
/// - [`FormulaError::Syntax`] - no leading `=`, not of the form `NAME(...)`,
///   unknown function, or an empty argument list
/// - [`FormulaError::Range`] - the argument is not one or two cell references
pub fn parse_formula(text: &str) -> FormulaResult<Formula> {
    let body = text
        .trim_start()
        .strip_prefix(FORMULA_PREFIX)
        .ok_or_else(|| FormulaError::Syntax("Formula must start with '='".into()))?;
    let body = body.trim().to_uppercase();

    let (_, name, argument) = regex_captures!(r"^([A-Z][A-Z0-9.]*)\((.*)\)$", &body)
        .ok_or_else(|| FormulaError::Syntax(format!("Expected FUNCTION(range), got '{}'", body)))?;

    let def = registry()
        .get(name)
        .ok_or_else(|| FormulaError::Syntax(format!("Unknown function: {}", name)))?;

    let argument = argument.trim();
    if argument.is_empty() {
        return Err(FormulaError::Syntax(format!(
            "{} requires a range argument",
            def.name
        )));
    }

    Ok(Formula {
        function: def.name,
        range: parse_range_reference(argument)?,
    })
}

/// Parse `A1:B2` or `A1` into a range
pub fn parse_range_reference(s: &str) -> FormulaResult<CellRange> {
    let mut parts = s.split(':');
    let start = parts.next().unwrap_or_default();
    let end = parts.next();
    if parts.next().is_some() {
        return Err(FormulaError::Range(format!("Invalid range: {}", s)));
    }

    let start = parse_cell_reference(start)?;
    let end = match end {
        Some(end) => parse_cell_reference(end)?,
        None => start,
    };
    Ok(CellRange::new(start, end))
}

/// Parse a single A1-style reference
pub fn parse_cell_reference(s: &str) -> FormulaResult<CellPosition> {
    CellPosition::parse_a1(s).map_err(|e| FormulaError::Range(e.to_string()))
}
