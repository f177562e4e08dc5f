//! File operations: load, persist, export, describe and close.
//!
//! Reading and writing is delegated to a [`PersistenceProvider`]; this
//! module owns the path rules and what the session learns from each step.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use puma_foundation::{Error, ErrorKind, Result, Table};
use tracing::info;

use crate::outcome::{Payload, Success, TableSummary};
use crate::provider::{ExportFormat, PersistenceProvider};
use crate::session::Session;

/// A table read from disk, ready for the session to install.
#[derive(Debug)]
pub struct Loaded {
    /// The table.
    pub table: Table,
    /// Where it came from.
    pub source: PathBuf,
    /// What to report.
    pub success: Success,
}

/// Reads a CSV file.
///
/// # Errors
///
/// `UnsupportedFormat` for anything but `.csv`, otherwise whatever the
/// provider reports (`NotFound`, `EmptyInput`, `MalformedInput`).
pub fn load(path: &str, store: &dyn PersistenceProvider) -> Result<Loaded> {
    let source = PathBuf::from(path);
    require_csv(&source)?;
    let table = store.load(&source)?;
    info!(path, rows = table.row_count(), columns = table.column_count(), "loaded table");

    let summary = TableSummary::of(&table, Some(path.to_string()));
    let success = Success::with_payload(
        format!(
            "loaded {path}: {} rows, {} columns ({})",
            table.row_count(),
            table.column_count(),
            table.column_names().join(", ")
        ),
        Payload::Summary(summary),
    );
    Ok(Loaded {
        table,
        source,
        success,
    })
}

/// Writes the table back as CSV, to `path` or to where it was loaded from.
///
/// # Errors
///
/// `IllFormed` if there is neither a path nor a load source,
/// `UnsupportedFormat` for a non-CSV target, otherwise the provider's error.
pub fn persist(
    path: Option<&str>,
    session: &Session,
    store: &dyn PersistenceProvider,
) -> Result<Success> {
    let target = match (path, session.source()) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(source)) => source.to_path_buf(),
        (None, None) => {
            return Err(Error::new(ErrorKind::IllFormed(
                "the table has no load source; give Carnivora a path".to_string(),
            )));
        }
    };
    require_csv(&target)?;
    store.persist(session.table(), &target)?;
    info!(path = %target.display(), rows = session.table().row_count(), "saved table");
    Ok(Success::message(format!(
        "saved {} rows to {}",
        session.table().row_count(),
        target.display()
    )))
}

/// Writes the table in another format, appending its extension if missing.
///
/// # Errors
///
/// `UnsupportedFormat` for an unknown format, otherwise the provider's error.
pub fn export(
    path: &str,
    format: Option<&str>,
    table: &Table,
    store: &dyn PersistenceProvider,
) -> Result<Success> {
    let format = format.map_or(Ok(ExportFormat::Csv), ExportFormat::parse)?;
    let target = with_extension(path, format);
    store.export(table, &target, format)?;
    info!(path = %target.display(), %format, "exported table");
    Ok(Success::message(format!(
        "exported {} rows as {format} to {}",
        table.row_count(),
        target.display()
    )))
}

/// Reports the source, size and column types of the table.
#[must_use]
pub fn describe(session: &Session) -> Success {
    let source = session.source().map(|p| p.display().to_string());
    let summary = TableSummary::of(session.table(), source);
    let mut message = format!(
        "{}: {} rows, {} columns",
        summary.source.as_deref().unwrap_or("(no source)"),
        summary.rows,
        summary.columns.len()
    );
    for (name, kind) in &summary.columns {
        let _ = write!(message, "\n  {name}: {kind}");
    }
    Success::with_payload(message, Payload::Summary(summary))
}

/// Discards the table; a new load is needed before anything else runs.
pub fn close(session: &mut Session) -> Success {
    let source = session.source().map(|p| p.display().to_string());
    session.close();
    info!(?source, "closed table");
    Success::message(match source {
        Some(source) => format!("closed {source}"),
        None => "closed the table".to_string(),
    })
}

fn require_csv(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => Ok(()),
        other => Err(Error::new(ErrorKind::UnsupportedFormat {
            format: other.map_or_else(|| path.display().to_string(), |e| format!(".{e}")),
            supported: vec![".csv".to_string()],
        })),
    }
}

fn with_extension(path: &str, format: ExportFormat) -> PathBuf {
    let suffix = format!(".{}", format.extension());
    if path.to_ascii_lowercase().ends_with(&suffix) {
        PathBuf::from(path)
    } else {
        PathBuf::from(format!("{path}{suffix}"))
    }
}
