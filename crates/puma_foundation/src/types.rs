//! Logical column types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Logical type of a column, derived from the values it holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColumnType {
    /// Every non-null value is a number, and there is at least one.
    Numeric,
    /// At least one value is text.
    Text,
    /// No non-null values to decide from.
    Unresolved,
}

impl ColumnType {
    /// Infers the logical type of a sequence of values.
    ///
    /// Text wins over numbers, so a numeric column that received a text
    /// marker widens to [`ColumnType::Text`].
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut seen_number = false;
        for value in values {
            match value {
                Value::Text(_) => return Self::Text,
                Value::Number(_) => seen_number = true,
                Value::Null => {}
            }
        }
        if seen_number {
            Self::Numeric
        } else {
            Self::Unresolved
        }
    }

    /// Returns true for [`ColumnType::Numeric`].
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Text => write!(f, "text"),
            Self::Unresolved => write!(f, "unresolved"),
        }
    }
}
