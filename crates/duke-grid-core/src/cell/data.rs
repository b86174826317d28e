//! Cell content and styling

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HorizontalAlign {
    /// Left aligned
    #[default]
    Left,
    /// Center aligned
    Center,
    /// Right aligned
    Right,
}

/// Per-cell text styling
///
/// The flags are tri-state: `None` means the flag was never set, which renders
/// the same as `Some(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellStyle {
    /// Bold text
    pub bold: Option<bool>,
    /// Italic text
    pub italic: Option<bool>,
    /// Underlined text
    pub underline: Option<bool>,
    /// Horizontal alignment
    pub align: HorizontalAlign,
}

impl CellStyle {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Set italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// Set underline
    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    /// Set alignment
    pub fn align(mut self, align: HorizontalAlign) -> Self {
        self.align = align;
        self
    }

    /// Whether text renders bold
    pub fn is_bold(&self) -> bool {
        self.bold.unwrap_or(false)
    }

    /// Whether text renders italic
    pub fn is_italic(&self) -> bool {
        self.italic.unwrap_or(false)
    }

    /// Whether text renders underlined
    pub fn is_underline(&self) -> bool {
        self.underline.unwrap_or(false)
    }
}

/// Complete data for a single cell
///
/// When `formula` is set, `value` holds the last computed display string
/// (a number or an error code). Otherwise `value` is the literal text the
/// user entered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellData {
    /// Displayed text
    pub value: String,
    /// Original formula text, starting with `=`
    pub formula: Option<String>,
    /// Text styling
    pub styles: CellStyle,
}

impl CellData {
    /// Create a literal-text cell with default style
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Create a formula cell holding its computed display value
    pub fn with_formula<V: Into<String>, F: Into<String>>(value: V, formula: F) -> Self {
        Self {
            value: value.into(),
            formula: Some(formula.into()),
            styles: CellStyle::default(),
        }
    }

    /// Check if this cell is indistinguishable from an unset cell
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the cell holds a formula
    pub fn is_formula(&self) -> bool {
        self.formula.is_some()
    }

    /// Text shown while editing: the formula if there is one, else the value
    pub fn input_text(&self) -> &str {
        self.formula.as_deref().unwrap_or(&self.value)
    }

    /// Merge a patch over this cell, field by field
    pub fn apply(&mut self, patch: CellPatch) {
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(formula) = patch.formula {
            self.formula = formula;
        }
        if let Some(styles) = patch.styles {
            self.styles = styles;
        }
    }

    /// A copy with the patch merged over it
    pub fn merged(&self, patch: CellPatch) -> Self {
        let mut data = self.clone();
        data.apply(patch);
        data
    }
}

/// A partial update to [`CellData`]
///
/// Fields left as `None` keep their current value. `formula` is doubly
/// optional so that a patch can clear the formula (`Some(None)`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellPatch {
    /// Replacement value
    pub value: Option<String>,
    /// Replacement formula (`Some(None)` clears it)
    pub formula: Option<Option<String>>,
    /// Replacement styles
    pub styles: Option<CellStyle>,
}

impl CellPatch {
    /// An empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value
    pub fn value<S: Into<String>>(mut self, value: S) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the formula
    pub fn formula<S: Into<String>>(mut self, formula: S) -> Self {
        self.formula = Some(Some(formula.into()));
        self
    }

    /// Remove any formula
    pub fn clear_formula(mut self) -> Self {
        self.formula = Some(None);
        self
    }

    /// Set the styles
    pub fn styles(mut self, styles: CellStyle) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Patch that makes the cell hold literal text
    pub fn literal<S: Into<String>>(value: S) -> Self {
        Self::new().value(value).clear_formula()
    }

    /// Whether applying this patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.formula.is_none() && self.styles.is_none()
    }
}
