//! CSV table sink
//!
//! The header row is the corner label followed by the column labels; each
//! further record is a row label followed by its cells. Cells are written
//! as the pre-formatted strings, so reading a file back reproduces the
//! table exactly.

use std::io::{Read, Write};
use std::path::Path;

use crate::table::{Table, TableRow};
use crate::{Error, Result};

/// Write a table as CSV.
///
/// # Errors
///
/// Returns `Error::Csv` on write failure.
pub fn write_table<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(table.header())?;
    for row in &table.rows {
        csv.write_record(std::iter::once(&row.label).chain(&row.cells))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write a table to `<dir>/<name>.csv`.
///
/// # Errors
///
/// Returns `Error::Csv` or `Error::Io` on failure.
pub fn write_table_file(table: &Table, dir: &Path) -> Result<std::path::PathBuf> {
    let path = dir.join(format!("{}.csv", table.name));
    let file = std::fs::File::create(&path)?;
    write_table(table, file)?;
    Ok(path)
}

/// Read a table written by [`write_table`].
///
/// The title is not stored in CSV and comes back empty.
///
/// # Errors
///
/// Returns `Error::Csv` on malformed input and `Error::Other` when the
/// header is missing.
pub fn read_table<R: Read>(name: impl Into<String>, reader: R) -> Result<Table> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(reader);

    let mut records = csv.records();
    let header = records
        .next()
        .ok_or_else(|| Error::Other("CSV table has no header row".to_string()))??;
    let mut header = header.iter().map(str::to_string);
    let corner = header.next().unwrap_or_default();
    let column_labels: Vec<String> = header.collect();

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let mut fields = record.iter().map(str::to_string);
        let label = fields.next().unwrap_or_default();
        rows.push(TableRow::new(label, fields.collect()));
    }

    Ok(Table {
        name: name.into(),
        title: String::new(),
        corner,
        column_labels,
        rows,
    })
}
