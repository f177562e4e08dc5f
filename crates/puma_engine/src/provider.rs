//! Collaborators the evaluator delegates to.
//!
//! File formats, terminal output and interactive confirmation live outside
//! the engine. The runtime crate supplies real implementations; the ones
//! here are inert stand-ins for embedding and tests.

use std::fmt;
use std::path::Path;

use puma_foundation::{Error, ErrorKind, Result, Table};

/// Output formats accepted by the export command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma separated values.
    Csv,
    /// A JSON array of row records.
    Json,
    /// A spreadsheet workbook.
    Excel,
}

impl ExportFormat {
    /// Names accepted on the command line, in the order they are listed to users.
    pub const NAMES: [&'static str; 4] = ["csv", "json", "excel", "xlsx"];

    /// Parses a format name, case-insensitively. `xlsx` means [`ExportFormat::Excel`].
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for any other name.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "excel" | "xlsx" => Ok(Self::Excel),
            _ => Err(Error::new(ErrorKind::UnsupportedFormat {
                format: name.to_string(),
                supported: Self::NAMES.iter().map(ToString::to_string).collect(),
            })),
        }
    }

    /// Returns the file extension for this format, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Excel => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Excel => write!(f, "excel"),
        }
    }
}

/// Reads and writes tables.
pub trait PersistenceProvider {
    /// Reads a table from a file.
    ///
    /// # Errors
    ///
    /// `NotFound`, `EmptyInput` or `MalformedInput`.
    fn load(&self, path: &Path) -> Result<Table>;

    /// Writes a table back in the load format.
    ///
    /// # Errors
    ///
    /// `PermissionDenied` or `Io`.
    fn persist(&self, table: &Table, path: &Path) -> Result<()>;

    /// Writes a table in another format.
    ///
    /// # Errors
    ///
    /// `PermissionDenied`, `MissingDependency` or `Io`.
    fn export(&self, table: &Table, path: &Path, format: ExportFormat) -> Result<()>;
}

/// Shows artifacts and banners to the user.
pub trait DisplayProvider {
    /// Shows a named artifact.
    ///
    /// # Errors
    ///
    /// `ArtifactNotFound` if there is no such artifact; callers fall back to
    /// a built-in banner.
    fn show(&self, artifact: &str) -> Result<()>;

    /// Shows built-in text.
    fn print(&self, text: &str);
}

/// Asks the user to approve a risky request.
pub trait Confirm {
    /// Returns true if the user approves.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Persistence stand-in that has no file access.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPersistence;

impl NoPersistence {
    fn unavailable() -> Error {
        Error::new(ErrorKind::MissingDependency {
            feature: "file access".to_string(),
            dependency: "a persistence provider".to_string(),
        })
    }
}

impl PersistenceProvider for NoPersistence {
    fn load(&self, _path: &Path) -> Result<Table> {
        Err(Self::unavailable())
    }

    fn persist(&self, _table: &Table, _path: &Path) -> Result<()> {
        Err(Self::unavailable())
    }

    fn export(&self, _table: &Table, _path: &Path, _format: ExportFormat) -> Result<()> {
        Err(Self::unavailable())
    }
}

/// Display stand-in that shows nothing and knows no artifacts.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDisplay;

impl DisplayProvider for NoDisplay {
    fn show(&self, artifact: &str) -> Result<()> {
        Err(Error::new(ErrorKind::ArtifactNotFound {
            artifact: artifact.to_string(),
        }))
    }

    fn print(&self, _text: &str) {}
}

/// Confirmation that always approves.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Confirmation that always declines.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}
