//! Command tree for the PUMA command language.
//!
//! One [`Command`] per statement. Composite commands wrap [`Action`]s, and
//! an action is always one of the four transform commands, so the tree is
//! at most one level deep.

use std::fmt;

use crate::token::Keyword;

/// A transform command, usable alone or inside a composite.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// `Maceta a b`: add two numeric columns into a derived column.
    Sum {
        /// Left operand column.
        left: String,
        /// Right operand column.
        right: String,
    },
    /// `Hipnoseta c`: square a random sample of a numeric column.
    Square {
        /// Source column.
        column: String,
    },
    /// `Petacereza c`: keep the N largest rows by a numeric column.
    TopN {
        /// Ranking column.
        column: String,
    },
    /// `Jalapeño c`: remove a column.
    Drop {
        /// Column to remove.
        column: String,
    },
}

impl Action {
    /// Returns the keyword that introduces this action.
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        match self {
            Self::Sum { .. } => Keyword::Sum,
            Self::Square { .. } => Keyword::Square,
            Self::TopN { .. } => Keyword::TopN,
            Self::Drop { .. } => Keyword::Drop,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum { left, right } => write!(f, "{} {left} {right}", self.keyword()),
            Self::Square { column } | Self::TopN { column } | Self::Drop { column } => {
                write!(f, "{} {column}", self.keyword())
            }
        }
    }
}

/// A parsed statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// `Zerebros`
    Terminate,
    /// `Sol "path"`
    Load {
        /// Source file.
        path: String,
    },
    /// `Carnivora "path"?`
    Persist {
        /// Target file; the load source when absent.
        path: Option<String>,
    },
    /// `Papapum "path" "format"?`
    Export {
        /// Target file.
        path: String,
        /// Output format; csv when absent.
        format: Option<String>,
    },
    /// `Magnetoseta`
    Describe,
    /// `melonpulta_gelida`
    Close,
    /// A bare transform command.
    Transform(Action),
    /// `Football ( action )`
    TimedRepeat(Action),
    /// `Zombidito ( action action )`
    Pair(Action, Action),
    /// `Zombistein ( action )`
    FixedRepeat(Action),
    /// `Ingeniero a b c`
    Capture([String; 3]),
    /// `Rosa n`
    Chaos(i64),
}

impl Command {
    /// Returns the keyword that introduces this command.
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        match self {
            Self::Terminate => Keyword::End,
            Self::Load { .. } => Keyword::Load,
            Self::Persist { .. } => Keyword::Save,
            Self::Export { .. } => Keyword::Export,
            Self::Describe => Keyword::Describe,
            Self::Close => Keyword::Close,
            Self::Transform(action) => action.keyword(),
            Self::TimedRepeat(_) => Keyword::Timed,
            Self::Pair(..) => Keyword::Pair,
            Self::FixedRepeat(_) => Keyword::Loop3,
            Self::Capture(_) => Keyword::Capture,
            Self::Chaos(_) => Keyword::Chaos,
        }
    }

    /// Returns true for commands that are legal before any table is loaded.
    #[must_use]
    pub const fn allowed_before_load(&self) -> bool {
        matches!(self, Self::Load { .. } | Self::Terminate)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.keyword();
        match self {
            Self::Terminate | Self::Describe | Self::Close => write!(f, "{keyword}"),
            Self::Load { path } => write!(f, "{keyword} \"{path}\""),
            Self::Persist { path: None } => write!(f, "{keyword}"),
            Self::Persist { path: Some(path) } => write!(f, "{keyword} \"{path}\""),
            Self::Export { path, format } => {
                write!(f, "{keyword} \"{path}\"")?;
                if let Some(format) = format {
                    write!(f, " \"{format}\"")?;
                }
                Ok(())
            }
            Self::Transform(action) => write!(f, "{action}"),
            Self::TimedRepeat(action) | Self::FixedRepeat(action) => {
                write!(f, "{keyword} ({action})")
            }
            Self::Pair(first, second) => write!(f, "{keyword} ({first} {second})"),
            Self::Capture([a, b, c]) => write!(f, "{keyword} {a} {b} {c}"),
            Self::Chaos(n) => write!(f, "{keyword} {n}"),
        }
    }
}
