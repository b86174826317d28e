//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvWriteOptions;
use duke_grid_core::{CellPosition, CellStore};
use duke_grid_transform::GridValue;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write grid data to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        data: &[Vec<GridValue>],
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(data, file, options)
    }

    /// Write grid data to a writer
    pub fn write<W: Write>(
        data: &[Vec<GridValue>],
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let mut csv_writer = Self::builder(options).from_writer(writer);

        for row in data {
            csv_writer.write_record(row.iter().map(|value| value.to_string()))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write a cell store to a CSV file
    pub fn write_store_file<P: AsRef<Path>>(
        store: &CellStore,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_store(store, file, options)
    }

    /// Write a cell store to a writer
    ///
    /// Writes displayed values from A1 to the bottom-right populated cell.
    pub fn write_store<W: Write>(
        store: &CellStore,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let mut csv_writer = Self::builder(options).from_writer(writer);

        if let Some(used) = store.used_bounds() {
            let end = used.bottom_right();
            for row in 0..=end.row {
                let record: Vec<&str> = (0..=end.col)
                    .map(|col| {
                        store
                            .cell(CellPosition::new(row, col))
                            .map_or("", |data| data.value.as_str())
                    })
                    .collect();
                csv_writer.write_record(&record)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    fn builder(options: &CsvWriteOptions) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(options.line_terminator.to_csv());
        builder
    }
}
