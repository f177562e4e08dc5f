//! CSV, JSON and spreadsheet files on disk.
//!
//! [`CsvStore`] is the runtime's [`PersistenceProvider`]. Cells are read
//! with [`Value::parse_cell`], so numbers come back as numbers and empty
//! cells as nulls; writing reverses that, nulls becoming empty cells.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use puma_engine::{ExportFormat, PersistenceProvider};
use puma_foundation::{Column, Error, ErrorKind, Result, Table, Value};
use rust_xlsxwriter::{Workbook, XlsxError};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use tracing::debug;

/// Reads and writes tables as files.
#[derive(Clone, Copy, Debug, Default)]
pub struct CsvStore;

impl CsvStore {
    /// Creates a new store.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PersistenceProvider for CsvStore {
    fn load(&self, path: &Path) -> Result<Table> {
        read_csv(path)
    }

    fn persist(&self, table: &Table, path: &Path) -> Result<()> {
        write_csv(table, path)
    }

    fn export(&self, table: &Table, path: &Path, format: ExportFormat) -> Result<()> {
        match format {
            ExportFormat::Csv => write_csv(table, path),
            ExportFormat::Json => write_json(table, path),
            ExportFormat::Excel => write_xlsx(table, path),
        }
    }
}

/// Reads a CSV file with a header row into a table.
///
/// A header with no data rows is a valid empty table.
///
/// # Errors
///
/// `NotFound` if the file is missing, `EmptyInput` if it has no header,
/// `MalformedInput` for ragged rows, duplicate headers or invalid UTF-8.
pub fn read_csv(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| io_error(path, &e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::new(ErrorKind::EmptyInput {
            path: path.display().to_string(),
        }));
    }
    if let Some(duplicate) = first_duplicate(&headers) {
        return Err(malformed(path, format!("duplicate column name '{duplicate}'")));
    }

    let mut cells: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        for (column, raw) in cells.iter_mut().zip(record.iter()) {
            column.push(Value::parse_cell(raw));
        }
    }
    debug!(path = %path.display(), rows = cells[0].len(), "read csv");

    Table::from_columns(
        headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::new(name, values))
            .collect(),
    )
}

/// Writes a table as CSV with a header row.
///
/// # Errors
///
/// `PermissionDenied` or `Io`.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| io_error(path, &e))?;
    let mut writer = csv::Writer::from_writer(file);
    writer
        .write_record(table.column_names())
        .map_err(|e| csv_error(path, e))?;
    for i in 0..table.row_count() {
        let row = table
            .row(i)
            .ok_or_else(|| Error::internal(format!("row {i} vanished while writing")))?;
        writer
            .write_record(row.iter().map(ToString::to_string))
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| io_error(path, &e))
}

/// Writes a table as a pretty-printed JSON array of row records.
///
/// Keys keep the column order; nulls stay `null`.
///
/// # Errors
///
/// `PermissionDenied` or `Io`.
pub fn write_json(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| io_error(path, &e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &Records(table))
        .map_err(|e| Error::new(ErrorKind::Io(e.to_string())))?;
    writeln!(writer).map_err(|e| io_error(path, &e))?;
    writer.flush().map_err(|e| io_error(path, &e))
}

/// Writes a table as a single-sheet workbook: a header row, then one row
/// per table row. Numbers stay numeric and nulls are left blank.
///
/// # Errors
///
/// `PermissionDenied`, or `Io` for anything else the writer reports,
/// including tables beyond the sheet's row or column limits.
pub fn write_xlsx(table: &Table, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, column) in table.columns().iter().enumerate() {
        let col = u16::try_from(col).map_err(|_| too_large(path, "columns"))?;
        sheet
            .write_string(0, col, column.name())
            .map_err(|e| xlsx_error(path, e))?;
        for (row, value) in column.values().iter().enumerate() {
            let row = u32::try_from(row + 1).map_err(|_| too_large(path, "rows"))?;
            match value {
                Value::Number(n) => sheet.write_number(row, col, *n),
                Value::Text(s) => sheet.write_string(row, col, s.as_str()),
                Value::Null => continue,
            }
            .map_err(|e| xlsx_error(path, e))?;
        }
    }
    workbook.save(path).map_err(|e| xlsx_error(path, e))?;
    debug!(path = %path.display(), rows = table.row_count(), "wrote xlsx");
    Ok(())
}

/// Serializes a table row by row, one map per row.
struct Records<'a>(&'a Table);

struct Record<'a> {
    table: &'a Table,
    row: usize,
}

impl Serialize for Records<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.row_count()))?;
        for row in 0..self.0.row_count() {
            seq.serialize_element(&Record {
                table: self.0,
                row,
            })?;
        }
        seq.end()
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.table.column_count()))?;
        for column in self.table.columns() {
            map.serialize_entry(column.name(), &column.get(self.row).unwrap_or(&Value::Null))?;
        }
        map.end()
    }
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    names
        .iter()
        .enumerate()
        .find(|(i, name)| names[..*i].contains(name))
        .map(|(_, name)| name.as_str())
}

fn malformed(path: &Path, message: impl Into<String>) -> Error {
    Error::new(ErrorKind::MalformedInput {
        path: path.display().to_string(),
        message: message.into(),
    })
}

fn io_error(path: &Path, err: &io::Error) -> Error {
    let path = path.display().to_string();
    match err.kind() {
        io::ErrorKind::NotFound => Error::new(ErrorKind::NotFound { path }),
        io::ErrorKind::PermissionDenied => Error::new(ErrorKind::PermissionDenied { path }),
        _ => Error::new(ErrorKind::Io(format!("{path}: {err}"))),
    }
}

fn xlsx_error(path: &Path, err: XlsxError) -> Error {
    match err {
        XlsxError::IoError(e) => io_error(path, &e),
        other => Error::new(ErrorKind::Io(format!("{}: {other}", path.display()))),
    }
}

fn too_large(path: &Path, what: &str) -> Error {
    Error::new(ErrorKind::Io(format!(
        "{}: too many {what} for a worksheet",
        path.display()
    )))
}

fn csv_error(path: &Path, err: csv::Error) -> Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => io_error(path, &e),
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos.map_or_else(String::new, |p| format!("line {}: ", p.line()));
            malformed(
                path,
                format!("{line}expected {expected_len} fields, found {len}"),
            )
        }
        csv::ErrorKind::Utf8 { err, .. } => malformed(path, format!("invalid UTF-8: {err}")),
        other => malformed(path, format!("{other:?}")),
    }
}
