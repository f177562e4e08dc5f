//! Error types for the PUMA system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every failure path in the interpreter ends up as an [`Error`] whose
//! [`ErrorKind`] is machine-distinguishable and whose display is readable.

use std::fmt;

use thiserror::Error;

use crate::types::ColumnType;

/// The main error type for PUMA operations.
#[derive(Clone, Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame onto this error's context, creating the context if needed.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Records the statement text this error came from.
    #[must_use]
    pub fn in_statement(mut self, statement: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_statement(statement));
        self
    }

    /// Creates an error pointing at a character offset.
    #[must_use]
    pub fn at(kind: ErrorKind, position: usize) -> Self {
        Self::new(kind).with_context(ErrorContext::new().with_position(position))
    }

    /// Creates a column not found error listing the columns that do exist.
    #[must_use]
    pub fn column_not_found(column: impl Into<String>, available: Vec<String>) -> Self {
        Self::new(ErrorKind::ColumnNotFound {
            column: column.into(),
            available,
        })
    }

    /// Creates a non-numeric column error.
    #[must_use]
    pub fn non_numeric(column: impl Into<String>, actual: ColumnType) -> Self {
        Self::new(ErrorKind::NonNumericColumn {
            column: column.into(),
            actual,
        })
    }

    /// Creates a "no table loaded" error for the named command.
    #[must_use]
    pub fn no_table_loaded(command: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoTableLoaded {
            command: command.into(),
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Returns the offending identifier (column, path, command, token), if any.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.kind.identifier()
    }
}

/// Broad taxonomy buckets used when reporting errors at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Unrecognized input character.
    Lexical,
    /// Token sequence does not form a statement.
    Syntax,
    /// Well-formed statement that cannot apply to the current table.
    Semantic,
    /// Failure reported by an external collaborator (files, display).
    Runtime,
    /// Broken internal invariant.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lexical => "lexical error",
            Self::Syntax => "syntax error",
            Self::Semantic => "semantic error",
            Self::Runtime => "runtime error",
            Self::Internal => "internal error",
        };
        f.write_str(name)
    }
}

/// Class of the character that stopped the lexer, used to pick a hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexicalHint {
    /// `[`, `]`, `{` or `}`.
    Bracket,
    /// One of `!@#$%^&*+=<>?/\|~` or a backtick.
    Symbol,
    /// A single quote.
    SingleQuote,
    /// A double quote that is never closed.
    UnterminatedString,
    /// Anything else.
    Other,
}

impl LexicalHint {
    /// Classifies an offending character.
    #[must_use]
    pub fn classify(c: char) -> Self {
        match c {
            '[' | ']' | '{' | '}' => Self::Bracket,
            '!' | '@' | '#' | '$' | '%' | '^' | '&' | '*' | '+' | '=' | '<' | '>' | '?' | '/'
            | '\\' | '|' | '~' | '`' => Self::Symbol,
            '\'' => Self::SingleQuote,
            '"' => Self::UnterminatedString,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for LexicalHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hint = match self {
            Self::Bracket => "use parentheses () instead of brackets or braces",
            Self::Symbol => "special characters are not part of any command; check the syntax",
            Self::SingleQuote => "single quotes are not allowed; use double quotes \" \"",
            Self::UnterminatedString => "close the string with a double quote",
            Self::Other => "check that the command is spelled correctly",
        };
        f.write_str(hint)
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Clone, Debug, Error)]
pub enum ErrorKind {
    /// The lexer met a character no token pattern accepts.
    #[error("unexpected character '{found}' at position {position} (near \"{context}\"): {hint}")]
    Lexical {
        /// Character offset of the offending character.
        position: usize,
        /// The offending character.
        found: char,
        /// A window of the input around the offending character.
        context: String,
        /// Hint chosen from the character's class.
        hint: LexicalHint,
    },

    /// The parser met a token the grammar does not allow here.
    #[error("unexpected token '{found}' at position {position}, expected one of: {}", .expected.join(", "))]
    UnexpectedToken {
        /// Lexeme of the offending token.
        found: String,
        /// Character offset of the offending token.
        position: usize,
        /// Tokens the grammar accepts at this point.
        expected: Vec<String>,
    },

    /// The statement ended while the grammar still required more tokens.
    #[error("unexpected end of input, expected one of: {}", .expected.join(", "))]
    UnexpectedEnd {
        /// Tokens the grammar accepts at this point.
        expected: Vec<String>,
    },

    /// Input the grammar rejects for a reason other than a single bad token.
    #[error("ill-formed input: {0}")]
    IllFormed(String),

    /// A named column does not exist.
    #[error("column not found: {column} (available: {})", .available.join(", "))]
    ColumnNotFound {
        /// The missing column.
        column: String,
        /// Columns present in the table.
        available: Vec<String>,
    },

    /// A numeric operation was applied to a non-numeric column.
    #[error("column {column} is not numeric (it is {actual})")]
    NonNumericColumn {
        /// The offending column.
        column: String,
        /// Its actual logical type.
        actual: ColumnType,
    },

    /// The operation needs at least one row.
    #[error("the table has no rows")]
    EmptyTable,

    /// Removing the column would leave the table without columns.
    #[error("cannot drop {column}: it is the only column in the table")]
    SingleColumnDeletionRejected {
        /// The column that was to be removed.
        column: String,
    },

    /// A command that needs data ran before any table was loaded.
    #[error("{command} needs a loaded table; load one first with Sol \"file.csv\"")]
    NoTableLoaded {
        /// The command that was rejected.
        command: String,
    },

    /// A repetition count outside the accepted range.
    #[error("invalid iteration count {0}: it must be greater than zero")]
    InvalidIterationCount(i64),

    /// A file does not exist.
    #[error("file not found: {path}")]
    NotFound {
        /// The path that was looked up.
        path: String,
    },

    /// A file exists but contains no data.
    #[error("file is empty: {path}")]
    EmptyInput {
        /// The empty file.
        path: String,
    },

    /// A file could not be parsed.
    #[error("malformed input in {path}: {message}")]
    MalformedInput {
        /// The file being read.
        path: String,
        /// What went wrong.
        message: String,
    },

    /// A file format or extension that is not handled.
    #[error("unsupported format '{format}' (supported: {})", .supported.join(", "))]
    UnsupportedFormat {
        /// The requested format or extension.
        format: String,
        /// Formats that are handled.
        supported: Vec<String>,
    },

    /// Writing was refused by the operating system.
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// The path that could not be written.
        path: String,
    },

    /// An optional capability is not linked into this build.
    #[error("{feature} requires {dependency}, which is not available")]
    MissingDependency {
        /// The capability that was requested.
        feature: String,
        /// What would be needed to provide it.
        dependency: String,
    },

    /// A display artifact could not be found.
    #[error("artifact not found: {artifact}")]
    ArtifactNotFound {
        /// The artifact identifier.
        artifact: String,
    },

    /// Any other I/O failure.
    #[error("i/o error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Returns the taxonomy bucket of this kind.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Lexical { .. } => ErrorCategory::Lexical,
            Self::UnexpectedToken { .. } | Self::UnexpectedEnd { .. } | Self::IllFormed(_) => {
                ErrorCategory::Syntax
            }
            Self::ColumnNotFound { .. }
            | Self::NonNumericColumn { .. }
            | Self::EmptyTable
            | Self::SingleColumnDeletionRejected { .. }
            | Self::NoTableLoaded { .. }
            | Self::InvalidIterationCount(_) => ErrorCategory::Semantic,
            Self::NotFound { .. }
            | Self::EmptyInput { .. }
            | Self::MalformedInput { .. }
            | Self::UnsupportedFormat { .. }
            | Self::PermissionDenied { .. }
            | Self::MissingDependency { .. }
            | Self::ArtifactNotFound { .. }
            | Self::Io(_) => ErrorCategory::Runtime,
            Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Returns the offending identifier carried by this kind, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::UnexpectedToken { found, .. } => Some(found),
            Self::ColumnNotFound { column, .. }
            | Self::NonNumericColumn { column, .. }
            | Self::SingleColumnDeletionRejected { column } => Some(column),
            Self::NoTableLoaded { command } => Some(command),
            Self::NotFound { path }
            | Self::EmptyInput { path }
            | Self::MalformedInput { path, .. }
            | Self::PermissionDenied { path } => Some(path),
            Self::UnsupportedFormat { format, .. } => Some(format),
            Self::ArtifactNotFound { artifact } => Some(artifact),
            _ => None,
        }
    }

    /// Returns a short stable name for this kind, used in machine-readable reports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lexical { .. } => "LexicalError",
            Self::UnexpectedToken { .. } => "UnexpectedToken",
            Self::UnexpectedEnd { .. } => "UnexpectedEnd",
            Self::IllFormed(_) => "IllFormed",
            Self::ColumnNotFound { .. } => "ColumnNotFound",
            Self::NonNumericColumn { .. } => "NonNumericColumn",
            Self::EmptyTable => "EmptyTable",
            Self::SingleColumnDeletionRejected { .. } => "SingleColumnDeletionRejected",
            Self::NoTableLoaded { .. } => "NoTableLoaded",
            Self::InvalidIterationCount(_) => "InvalidIterationCount",
            Self::NotFound { .. } => "NotFound",
            Self::EmptyInput { .. } => "EmptyInput",
            Self::MalformedInput { .. } => "MalformedInput",
            Self::UnsupportedFormat { .. } => "UnsupportedFormat",
            Self::PermissionDenied { .. } => "PermissionDenied",
            Self::MissingDependency { .. } => "MissingDependency",
            Self::ArtifactNotFound { .. } => "ArtifactNotFound",
            Self::Io(_) => "Io",
            Self::Internal(_) => "Internal",
        }
    }
}

/// Context about where an error occurred.
#[derive(Clone, Debug, Default)]
pub struct ErrorContext {
    /// The statement being evaluated.
    pub statement: Option<String>,
    /// Character offset inside the statement.
    pub position: Option<usize>,
    /// Composite commands the failure happened inside, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the statement text.
    #[must_use]
    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    /// Sets the character offset.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(statement) = &self.statement {
            writeln!(f, "  {statement}")?;
            if let Some(position) = self.position {
                writeln!(f, "  {}^", " ".repeat(position))?;
            }
        }
        for frame in &self.stack {
            writeln!(f, "  in {frame}")?;
        }
        Ok(())
    }
}
