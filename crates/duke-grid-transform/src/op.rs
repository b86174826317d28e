//! Transform operations as values
//!
//! Lets a session or a command line pick a transform at runtime and apply it
//! through one entry point.

use std::fmt;

use crate::error::TransformResult;
use crate::transforms::{
    apply_find_and_replace, apply_lower, apply_remove_duplicates, apply_trim, apply_upper,
};
use crate::value::{GridData, GridRect, GridValue};

/// A bulk transform over a rectangle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOp {
    /// Trim whitespace
    Trim,
    /// Upper-case
    Upper,
    /// Lower-case
    Lower,
    /// Remove duplicate rows
    RemoveDuplicates,
    /// Literal find and replace
    FindReplace {
        find: String,
        replace: String,
        case_sensitive: bool,
    },
}

impl TransformOp {
    /// Create a find-and-replace operation
    pub fn find_replace<F: Into<String>, R: Into<String>>(
        find: F,
        replace: R,
        case_sensitive: bool,
    ) -> Self {
        TransformOp::FindReplace {
            find: find.into(),
            replace: replace.into(),
            case_sensitive,
        }
    }

    /// Short name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            TransformOp::Trim => "trim",
            TransformOp::Upper => "upper",
            TransformOp::Lower => "lower",
            TransformOp::RemoveDuplicates => "dedupe",
            TransformOp::FindReplace { .. } => "replace",
        }
    }

    /// Apply to a grid within a rectangle
    pub fn apply(&self, data: &[Vec<GridValue>], rect: GridRect) -> TransformResult<GridData> {
        match self {
            TransformOp::Trim => apply_trim(data, rect),
            TransformOp::Upper => apply_upper(data, rect),
            TransformOp::Lower => apply_lower(data, rect),
            TransformOp::RemoveDuplicates => apply_remove_duplicates(data, rect),
            TransformOp::FindReplace {
                find,
                replace,
                case_sensitive,
            } => apply_find_and_replace(data, rect, find, replace, *case_sensitive),
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
