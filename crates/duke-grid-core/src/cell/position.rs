//! Cell positions and store keys

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between row and column in a [`CellKey`]
pub const KEY_SEPARATOR: char = '-';

/// A cell's location in the grid (0-based row and column)
///
/// The derived ordering is row-major, which is what [`CellStore`](super::CellStore)
/// relies on for range scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPosition {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u32,
}

impl CellPosition {
    /// Create a new position
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// The top-left cell
    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// The store key for this position
    pub fn key(&self) -> CellKey {
        CellKey::from(*self)
    }

    /// Parse an A1-style reference (`"B3"` is row 2, column 1)
    ///
    /// # Examples
    /// ```
    /// use duke_grid_core::CellPosition;
    ///
    /// let pos = CellPosition::parse_a1("B3").unwrap();
    /// assert_eq!(pos, CellPosition::new(2, 1));
    ///
    /// let pos = CellPosition::parse_a1("aa10").unwrap();
    /// assert_eq!(pos, CellPosition::new(9, 26));
    /// ```
    pub fn parse_a1(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let letters_end = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        if letters_end == 0 {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col = letters_to_column(&s[..letters_end])?;

        let row_str = &s[letters_end..];
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!("invalid row number in '{}'", s)));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("row number out of range in '{}'", s)))?;

        // Rows are 1-based in text
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self { row: row - 1, col })
    }

    /// Format as an A1-style reference
    pub fn to_a1(&self) -> String {
        let mut result = column_to_letters(self.col);
        result.push_str(&(u64::from(self.row) + 1).to_string());
        result
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

impl From<(u32, u32)> for CellPosition {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

/// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_to_letters(col: u32) -> String {
    let mut result = Vec::new();
    let mut n = u64::from(col) + 1; // 1-based for calculation

    while n > 0 {
        n -= 1;
        result.push((n % 26) as u8 + b'A');
        n /= 26;
    }

    result.reverse();
    String::from_utf8(result).unwrap_or_default()
}

/// Convert column letters to an index (A = 0, Z = 25, AA = 26, etc.)
///
/// Letters are case-insensitive. Fails if the letters are empty, contain a
/// non-letter, or overflow the index type.
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidAddress("empty column letters".into()));
    }

    let mut col: u64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);
        if col > u64::from(u32::MAX) + 1 {
            return Err(Error::InvalidAddress(format!(
                "column '{}' out of range",
                letters
            )));
        }
    }

    u32::try_from(col - 1)
        .map_err(|_| Error::InvalidAddress(format!("column '{}' out of range", letters)))
}

/// The string key a [`CellPosition`] is stored under: `"{row}-{col}"`
///
/// Key derivation is a bijection, so [`CellKey::position`] always recovers
/// the original position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct CellKey(String);

impl CellKey {
    /// Parse a key, validating its shape
    pub fn parse(s: &str) -> Result<Self> {
        let position = Self::split(s)?;
        Ok(Self::from(position))
    }

    /// The position this key was derived from
    pub fn position(&self) -> CellPosition {
        // Keys are only ever built from positions or validated by `parse`
        Self::split(&self.0).unwrap_or_default()
    }

    /// The key text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn split(s: &str) -> Result<CellPosition> {
        let (row, col) = s
            .split_once(KEY_SEPARATOR)
            .ok_or_else(|| Error::InvalidCellKey(s.to_string()))?;
        Ok(CellPosition {
            row: parse_key_part(row, s)?,
            col: parse_key_part(col, s)?,
        })
    }
}

/// Digits only: rejects signs, whitespace and leading zeros so that every
/// accepted key is the canonical one for its position.
fn parse_key_part(part: &str, key: &str) -> Result<u32> {
    let canonical = !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'));
    if !canonical {
        return Err(Error::InvalidCellKey(key.to_string()));
    }
    part.parse()
        .map_err(|_| Error::InvalidCellKey(key.to_string()))
}

impl From<CellPosition> for CellKey {
    fn from(pos: CellPosition) -> Self {
        CellKey(format!("{}{}{}", pos.row, KEY_SEPARATOR, pos.col))
    }
}

impl From<&CellKey> for CellPosition {
    fn from(key: &CellKey) -> Self {
        key.position()
    }
}

impl From<CellKey> for String {
    fn from(key: CellKey) -> Self {
        key.0
    }
}

impl TryFrom<String> for CellKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl FromStr for CellKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(1), "B");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(27), "AB");
        assert_eq!(column_to_letters(701), "ZZ");
        assert_eq!(column_to_letters(702), "AAA");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A").unwrap(), 0);
        assert_eq!(letters_to_column("Z").unwrap(), 25);
        assert_eq!(letters_to_column("AA").unwrap(), 26);
        assert_eq!(letters_to_column("AB").unwrap(), 27);
        assert_eq!(letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(letters_to_column("AAA").unwrap(), 702);

        // Case insensitive
        assert_eq!(letters_to_column("a").unwrap(), 0);
        assert_eq!(letters_to_column("aa").unwrap(), 26);

        assert!(letters_to_column("").is_err());
        assert!(letters_to_column("A1").is_err());
        assert!(letters_to_column("ZZZZZZZZZZ").is_err());
    }

    #[test]
    fn test_parse_a1() {
        assert_eq!(CellPosition::parse_a1("A1").unwrap(), CellPosition::new(0, 0));
        assert_eq!(CellPosition::parse_a1("C10").unwrap(), CellPosition::new(9, 2));
        assert_eq!(CellPosition::parse_a1(" x5 ").unwrap(), CellPosition::new(4, 23));

        assert!(CellPosition::parse_a1("").is_err());
        assert!(CellPosition::parse_a1("A").is_err());
        assert!(CellPosition::parse_a1("1").is_err());
        assert!(CellPosition::parse_a1("A0").is_err());
        assert!(CellPosition::parse_a1("A-1").is_err());
        assert!(CellPosition::parse_a1("A1B").is_err());
        assert!(CellPosition::parse_a1("A99999999999").is_err());
    }

    #[test]
    fn test_to_a1() {
        assert_eq!(CellPosition::new(0, 0).to_a1(), "A1");
        assert_eq!(CellPosition::new(99, 2).to_string(), "C100");
        assert_eq!(CellPosition::new(0, 26).to_a1(), "AA1");
    }

    #[test]
    fn test_cell_key_format() {
        assert_eq!(CellPosition::new(0, 0).key().as_str(), "0-0");
        assert_eq!(CellPosition::new(12, 3).key().to_string(), "12-3");
    }

    #[test]
    fn test_cell_key_no_collisions() {
        // "1-12" and "11-2" would collide without a separator
        assert_ne!(CellPosition::new(1, 12).key(), CellPosition::new(11, 2).key());
    }

    #[test]
    fn test_cell_key_parse_errors() {
        assert!(CellKey::parse("").is_err());
        assert!(CellKey::parse("3").is_err());
        assert!(CellKey::parse("3-").is_err());
        assert!(CellKey::parse("-3").is_err());
        assert!(CellKey::parse("1-2-3").is_err());
        assert!(CellKey::parse("01-2").is_err());
        assert!(CellKey::parse("+1-2").is_err());
        assert!(CellKey::parse("a-b").is_err());
        assert!(CellKey::parse("4294967296-0").is_err());
    }

    proptest! {
        #[test]
        fn cell_key_round_trips(row in any::<u32>(), col in any::<u32>()) {
            let pos = CellPosition::new(row, col);
            let key = CellKey::parse(pos.key().as_str()).unwrap();
            prop_assert_eq!(key.position(), pos);
        }

        #[test]
        fn a1_round_trips(row in 0u32..u32::MAX, col in any::<u32>()) {
            let pos = CellPosition::new(row, col);
            prop_assert_eq!(CellPosition::parse_a1(&pos.to_a1()).unwrap(), pos);
        }
    }
}
