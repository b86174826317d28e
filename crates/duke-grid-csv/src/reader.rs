//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use duke_grid_core::{CellPatch, CellPosition, CellStore};
use duke_grid_transform::{GridData, GridValue};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into grid data
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<GridData> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into grid data
    ///
    /// Short records are padded with empty cells so the result is
    /// rectangular.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<GridData> {
        let mut grid = GridData::new();
        let mut width = 0;

        for (row_idx, record) in Self::records(reader, options)?.into_iter().enumerate() {
            let is_header = options.has_header && row_idx == 0;
            let row: Vec<GridValue> = record
                .iter()
                .map(|field| {
                    if options.auto_detect_types && !is_header {
                        Self::detect_type(field)
                    } else if field.is_empty() {
                        GridValue::Empty
                    } else {
                        GridValue::string(field)
                    }
                })
                .collect();
            width = width.max(row.len());
            grid.push(row);
        }

        for row in &mut grid {
            row.resize(width, GridValue::Empty);
        }
        Ok(grid)
    }

    /// Read a CSV file into a cell store
    pub fn read_store_file<P: AsRef<Path>>(
        path: P,
        options: &CsvReadOptions,
    ) -> CsvResult<CellStore> {
        let file = File::open(path)?;
        Self::read_store(file, options)
    }

    /// Read CSV into a cell store
    ///
    /// Every non-empty field becomes a literal cell holding the field text
    /// as written. Type detection does not apply.
    pub fn read_store<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<CellStore> {
        let mut patches = Vec::new();
        for (row_idx, record) in Self::records(reader, options)?.iter().enumerate() {
            for (col_idx, field) in record.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                let pos = Self::position(row_idx, col_idx)?;
                patches.push((pos, CellPatch::literal(field)));
            }
        }
        Ok(CellStore::new().set_many(patches))
    }

    fn records<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Vec<csv::StringRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.records() {
            records.push(result?);
        }
        Ok(records)
    }

    fn position(row: usize, column: usize) -> CsvResult<CellPosition> {
        match (u32::try_from(row), u32::try_from(column)) {
            (Ok(r), Ok(c)) => Ok(CellPosition::new(r, c)),
            _ => Err(CsvError::Parse {
                row,
                column,
                message: "cell position out of range".into(),
            }),
        }
    }

    /// Detect the type of a field value
    ///
    /// Text fields keep their surrounding whitespace.
    fn detect_type(field: &str) -> GridValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return if field.is_empty() {
                GridValue::Empty
            } else {
                GridValue::string(field)
            };
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return GridValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return GridValue::Boolean(false);
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return GridValue::Number(n);
            }
        }

        GridValue::string(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_type() {
        assert_eq!(CsvReader::detect_type(""), GridValue::Empty);
        assert_eq!(CsvReader::detect_type("  "), GridValue::string("  "));
        assert_eq!(CsvReader::detect_type("42"), GridValue::Number(42.0));
        assert_eq!(CsvReader::detect_type(" -1.5 "), GridValue::Number(-1.5));
        assert_eq!(CsvReader::detect_type("TRUE"), GridValue::Boolean(true));
        assert_eq!(CsvReader::detect_type("false"), GridValue::Boolean(false));
        assert_eq!(CsvReader::detect_type(" text "), GridValue::string(" text "));
        assert_eq!(CsvReader::detect_type("inf"), GridValue::string("inf"));
    }

    #[test]
    fn test_read_pads_short_records() {
        let csv = "a,b,c\n1\n";
        let grid = CsvReader::read(csv.as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(
            grid,
            vec![
                vec![GridValue::string("a"), GridValue::string("b"), GridValue::string("c")],
                vec![GridValue::Number(1.0), GridValue::Empty, GridValue::Empty],
            ]
        );
    }

    #[test]
    fn test_header_stays_text() {
        let options = CsvReadOptions {
            has_header: true,
            ..Default::default()
        };
        let grid = CsvReader::read("1,true\n2,false\n".as_bytes(), &options).unwrap();
        assert_eq!(grid[0], vec![GridValue::string("1"), GridValue::string("true")]);
        assert_eq!(grid[1], vec![GridValue::Number(2.0), GridValue::Boolean(false)]);
    }

    #[test]
    fn test_read_store() {
        let store = CsvReader::read_store("10,,x\n,=SUM(A1:A1)\n".as_bytes(), &CsvReadOptions::default())
            .unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(CellPosition::new(0, 0)).value, "10");
        assert_eq!(store.get(CellPosition::new(0, 2)).value, "x");
        assert_eq!(store.get(CellPosition::new(1, 1)).value, "=SUM(A1:A1)");
        assert!(store.cell(CellPosition::new(0, 1)).is_none());
    }
}
