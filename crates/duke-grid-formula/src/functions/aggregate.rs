//! Aggregate functions
//!
//! Each function receives the numeric values found in its range, in row-major
//! order. Non-numeric and empty cells have already been skipped.

use crate::error::{FormulaError, FormulaResult};

/// SUM - 0 for an empty range
pub fn fn_sum(values: &[f64]) -> FormulaResult<f64> {
    Ok(values.iter().sum())
}

/// AVERAGE
pub fn fn_average(values: &[f64]) -> FormulaResult<f64> {
    if values.is_empty() {
        return Err(no_values("AVERAGE"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// MAX
pub fn fn_max(values: &[f64]) -> FormulaResult<f64> {
    values
        .iter()
        .copied()
        .reduce(f64::max)
        .ok_or_else(|| no_values("MAX"))
}

/// MIN
pub fn fn_min(values: &[f64]) -> FormulaResult<f64> {
    values
        .iter()
        .copied()
        .reduce(f64::min)
        .ok_or_else(|| no_values("MIN"))
}

/// COUNT - counts numeric cells; 0 is a valid result
pub fn fn_count(values: &[f64]) -> FormulaResult<f64> {
    Ok(values.len() as f64)
}

fn no_values(function: &str) -> FormulaError {
    FormulaError::Value(format!("{}: no numeric values in range", function))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum() {
        assert_eq!(fn_sum(&[10.0, 20.0, 30.0]).unwrap(), 60.0);
        assert_eq!(fn_sum(&[]).unwrap(), 0.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(fn_average(&[10.0, 20.0, 30.0]).unwrap(), 20.0);
        assert!(matches!(fn_average(&[]), Err(FormulaError::Value(_))));
    }

    #[test]
    fn test_min_max() {
        assert_eq!(fn_max(&[5.0, -2.0, 30.0]).unwrap(), 30.0);
        assert_eq!(fn_min(&[5.0, -2.0, 30.0]).unwrap(), -2.0);
        assert!(matches!(fn_max(&[]), Err(FormulaError::Value(_))));
        assert!(matches!(fn_min(&[]), Err(FormulaError::Value(_))));
    }

    #[test]
    fn test_count() {
        assert_eq!(fn_count(&[1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(fn_count(&[]).unwrap(), 0.0);
    }
}
