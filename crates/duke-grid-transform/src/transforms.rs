//! Range transforms
//!
//! Every `apply_*` entry point validates the grid, clips the rectangle to it
//! and returns a new grid. Cells outside the rectangle are never touched, and
//! a rectangle entirely outside the grid is a no-op.

use ahash::AHashSet;
use regex::{NoExpand, RegexBuilder};

use crate::error::{TransformError, TransformResult};
use crate::value::{validate_grid, GridData, GridRect, GridValue};

/// Trim surrounding whitespace from a string value
pub fn trim(value: &GridValue) -> GridValue {
    value.map_str(|s| s.trim().to_string())
}

/// Upper-case a string value
pub fn upper(value: &GridValue) -> GridValue {
    value.map_str(str::to_uppercase)
}

/// Lower-case a string value
pub fn lower(value: &GridValue) -> GridValue {
    value.map_str(str::to_lowercase)
}

/// Apply `f` to every cell of the clipped rectangle
pub fn apply_map<F>(data: &[Vec<GridValue>], rect: GridRect, mut f: F) -> TransformResult<GridData>
where
    F: FnMut(&GridValue) -> GridValue,
{
    let (rows, cols) = validate_grid(data)?;
    let mut out = data.to_vec();
    if let Some(rect) = rect.clip(rows, cols) {
        for row in &mut out[rect.start_row..=rect.end_row] {
            for cell in &mut row[rect.start_col..=rect.end_col] {
                *cell = f(cell);
            }
        }
    }
    Ok(out)
}

/// Trim every string cell in the rectangle
pub fn apply_trim(data: &[Vec<GridValue>], rect: GridRect) -> TransformResult<GridData> {
    apply_map(data, rect, trim)
}

/// Upper-case every string cell in the rectangle
pub fn apply_upper(data: &[Vec<GridValue>], rect: GridRect) -> TransformResult<GridData> {
    apply_map(data, rect, upper)
}

/// Lower-case every string cell in the rectangle
pub fn apply_lower(data: &[Vec<GridValue>], rect: GridRect) -> TransformResult<GridData> {
    apply_map(data, rect, lower)
}

/// Hashable form of a value
///
/// Numbers compare by value: `-0.0` equals `0.0` and all NaNs are one value.
#[derive(PartialEq, Eq, Hash)]
enum ValueKey<'a> {
    Empty,
    String(&'a str),
    Number(u64),
    Boolean(bool),
}

impl<'a> From<&'a GridValue> for ValueKey<'a> {
    fn from(value: &'a GridValue) -> Self {
        match value {
            GridValue::Empty => ValueKey::Empty,
            GridValue::String(s) => ValueKey::String(s),
            GridValue::Number(n) if n.is_nan() => ValueKey::Number(f64::NAN.to_bits()),
            GridValue::Number(n) if *n == 0.0 => ValueKey::Number(0f64.to_bits()),
            GridValue::Number(n) => ValueKey::Number(n.to_bits()),
            GridValue::Boolean(b) => ValueKey::Boolean(*b),
        }
    }
}

/// Drop rows that repeat an earlier row, keeping first-seen order
///
/// Rows are compared cell by cell, including type: `"1"` and `1` differ.
pub fn remove_duplicates(rows: &[Vec<GridValue>]) -> TransformResult<GridData> {
    validate_grid(rows)?;
    let mut seen: AHashSet<Vec<ValueKey<'_>>> = AHashSet::with_capacity(rows.len());
    let mut unique = Vec::with_capacity(rows.len());
    for row in rows {
        if seen.insert(row.iter().map(ValueKey::from).collect()) {
            unique.push(row.clone());
        }
    }
    Ok(unique)
}

/// Remove duplicate rows within the rectangle
///
/// Unique rows are written back from the rectangle's top-left. Rows freed up
/// at the bottom of the rectangle keep their previous contents.
pub fn apply_remove_duplicates(data: &[Vec<GridValue>], rect: GridRect) -> TransformResult<GridData> {
    let (rows, cols) = validate_grid(data)?;
    let mut out = data.to_vec();
    let Some(rect) = rect.clip(rows, cols) else {
        return Ok(out);
    };

    let selected: GridData = data[rect.start_row..=rect.end_row]
        .iter()
        .map(|row| row[rect.start_col..=rect.end_col].to_vec())
        .collect();

    for (offset, unique) in remove_duplicates(&selected)?.into_iter().enumerate() {
        let target = &mut out[rect.start_row + offset][rect.start_col..=rect.end_col];
        target.clone_from_slice(&unique);
    }
    Ok(out)
}

/// Literal find-and-replace over string values
#[derive(Debug, Clone)]
pub struct Replacer {
    find: String,
    replace: String,
    pattern: Option<regex::Regex>,
}

impl Replacer {
    /// Build a replacer
    ///
    /// `find` is always matched literally. When `case_sensitive` is false,
    /// letters match regardless of case.
    pub fn new(find: &str, replace: &str, case_sensitive: bool) -> TransformResult<Self> {
        if find.is_empty() {
            return Err(TransformError::EmptyFind);
        }
        let pattern = if case_sensitive {
            None
        } else {
            let pattern = RegexBuilder::new(&regex::escape(find))
                .case_insensitive(true)
                .build()?;
            Some(pattern)
        };
        Ok(Self {
            find: find.to_string(),
            replace: replace.to_string(),
            pattern,
        })
    }

    /// Replace every non-overlapping occurrence in `text`
    pub fn replace_str(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern
                .replace_all(text, NoExpand(&self.replace))
                .into_owned(),
            None => text.replace(&self.find, &self.replace),
        }
    }

    /// Replace within a string value; other values pass through unchanged
    pub fn replace_value(&self, value: &GridValue) -> GridValue {
        value.map_str(|s| self.replace_str(s))
    }
}

/// Find and replace over a whole grid of values
pub fn find_and_replace(
    data: &[Vec<GridValue>],
    find: &str,
    replace: &str,
    case_sensitive: bool,
) -> TransformResult<GridData> {
    validate_grid(data)?;
    let replacer = Replacer::new(find, replace, case_sensitive)?;
    Ok(data
        .iter()
        .map(|row| row.iter().map(|v| replacer.replace_value(v)).collect())
        .collect())
}

/// Find and replace within the rectangle
pub fn apply_find_and_replace(
    data: &[Vec<GridValue>],
    rect: GridRect,
    find: &str,
    replace: &str,
    case_sensitive: bool,
) -> TransformResult<GridData> {
    let replacer = Replacer::new(find, replace, case_sensitive)?;
    apply_map(data, rect, |v| replacer.replace_value(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(rows: &[&[&str]]) -> GridData {
        rows.iter()
            .map(|row| row.iter().map(|s| GridValue::string(*s)).collect())
            .collect()
    }

    #[test]
    fn test_text_transforms() {
        assert_eq!(trim(&"  a b  ".into()), GridValue::string("a b"));
        assert_eq!(upper(&"straße".into()), GridValue::string("STRASSE"));
        assert_eq!(lower(&"MiXeD".into()), GridValue::string("mixed"));
        assert_eq!(upper(&GridValue::Number(1.5)), GridValue::Number(1.5));
        assert_eq!(trim(&GridValue::Boolean(true)), GridValue::Boolean(true));
    }

    #[test]
    fn test_apply_upper_only_touches_rect() {
        let grid = strings(&[&["a", "b", "c"], &["d", "e", "f"]]);
        let out = apply_upper(&grid, GridRect::new(0, 1, 1, 1)).unwrap();
        assert_eq!(out, strings(&[&["a", "B", "c"], &["d", "E", "f"]]));
        // input untouched
        assert_eq!(grid, strings(&[&["a", "b", "c"], &["d", "e", "f"]]));
    }

    #[test]
    fn test_apply_trim_clips_to_grid() {
        let grid = strings(&[&[" a ", " b "]]);
        let out = apply_trim(&grid, GridRect::new(0, 50, 1, 50)).unwrap();
        assert_eq!(out, strings(&[&[" a ", "b"]]));

        let out = apply_trim(&grid, GridRect::new(5, 6, 0, 1)).unwrap();
        assert_eq!(out, grid);
    }

    #[test]
    fn test_invalid_grid_is_rejected() {
        let ragged = strings(&[&["a", "b"], &["c"]]);
        assert!(matches!(
            apply_lower(&ragged, GridRect::new(0, 0, 0, 0)),
            Err(TransformError::InvalidGrid(_))
        ));
        assert!(matches!(
            apply_remove_duplicates(&[], GridRect::new(0, 0, 0, 0)),
            Err(TransformError::InvalidGrid(_))
        ));
        assert!(matches!(
            remove_duplicates(&ragged),
            Err(TransformError::InvalidGrid(_))
        ));
        assert!(matches!(remove_duplicates(&[]), Err(TransformError::InvalidGrid(_))));
        assert!(matches!(
            find_and_replace(&ragged, "a", "x", true),
            Err(TransformError::InvalidGrid(_))
        ));
        assert!(matches!(
            find_and_replace(&[], "a", "x", true),
            Err(TransformError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_remove_duplicates() {
        let rows = strings(&[&["a", "b"], &["a", "b"], &["c", "d"]]);
        assert_eq!(remove_duplicates(&rows).unwrap(), strings(&[&["a", "b"], &["c", "d"]]));
    }

    #[test]
    fn test_remove_duplicates_compares_types() {
        let rows = vec![
            vec![GridValue::string("1")],
            vec![GridValue::Number(1.0)],
            vec![GridValue::Number(1.0)],
            vec![GridValue::Number(-0.0)],
            vec![GridValue::Number(0.0)],
            vec![GridValue::Empty],
            vec![GridValue::string("")],
        ];
        assert_eq!(
            remove_duplicates(&rows).unwrap(),
            vec![
                vec![GridValue::string("1")],
                vec![GridValue::Number(1.0)],
                vec![GridValue::Number(-0.0)],
                vec![GridValue::Empty],
                vec![GridValue::string("")],
            ]
        );
    }

    #[test]
    fn test_apply_remove_duplicates_writes_back_from_top_left() {
        let grid = strings(&[
            &["x", "a", "b"],
            &["x", "a", "b"],
            &["x", "c", "d"],
            &["y", "z", "z"],
        ]);
        let out = apply_remove_duplicates(&grid, GridRect::new(0, 2, 1, 2)).unwrap();
        assert_eq!(
            out,
            strings(&[
                &["x", "a", "b"],
                &["x", "c", "d"],
                &["x", "c", "d"],
                &["y", "z", "z"],
            ])
        );
    }

    #[test]
    fn test_find_and_replace_case_insensitive() {
        let grid = strings(&[&["Hello World"]]);
        let out = apply_find_and_replace(&grid, GridRect::new(0, 0, 0, 0), "hello", "X", false).unwrap();
        assert_eq!(out, strings(&[&["X World"]]));
    }

    #[test]
    fn test_find_and_replace_case_sensitive() {
        let grid = strings(&[&["Hello hello"]]);
        let out = find_and_replace(&grid, "hello", "X", true).unwrap();
        assert_eq!(out, strings(&[&["Hello X"]]));
    }

    #[test]
    fn test_find_is_literal() {
        let replacer = Replacer::new("a.c", "$1", false).unwrap();
        assert_eq!(replacer.replace_str("abc A.C a.c"), "abc $1 $1");

        let replacer = Replacer::new("(x)", "y", false).unwrap();
        assert_eq!(replacer.replace_str("(X)(x)"), "yy");
    }

    #[test]
    fn test_replace_all_non_overlapping() {
        let replacer = Replacer::new("aa", "b", true).unwrap();
        assert_eq!(replacer.replace_str("aaaaa"), "bba");
    }

    #[test]
    fn test_empty_find_is_rejected() {
        let grid = strings(&[&["a"]]);
        assert_eq!(
            find_and_replace(&grid, "", "x", true).unwrap_err(),
            TransformError::EmptyFind
        );
    }

    #[test]
    fn test_replace_skips_non_strings() {
        let grid = vec![vec![GridValue::Number(11.0), GridValue::string("11")]];
        let out = find_and_replace(&grid, "1", "2", true).unwrap();
        assert_eq!(out, vec![vec![GridValue::Number(11.0), GridValue::string("22")]]);
    }
}
