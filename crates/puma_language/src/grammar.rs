//! The PUMA grammar as data.
//!
//! Every statement starts with a keyword, and each keyword owns exactly one
//! production: a fixed sequence of [`Symbol`]s that must follow it. The
//! parser walks these tables instead of hard-coding one function per
//! command, so expected-token sets in diagnostics always come from here.
//!
//! ```text
//! statement    := terminate | load | persist | export | describe | close
//!               | colsum | colsquare | topn | coldrop
//!               | timed_repeat | capture3 | paired | fixed_repeat | chaos
//! action       := colsum | colsquare | topn | coldrop
//! ```

use crate::token::Keyword;

/// Grammar name of the end-of-input marker in expected sets.
pub const END_OF_INPUT: &str = "$END";

/// One element of a production body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// A bare column name.
    Column,
    /// A quoted string.
    String,
    /// A quoted string that may be left out.
    OptionalString,
    /// A decimal integer.
    Number,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// One of the transform productions.
    Action,
}

impl Symbol {
    /// Returns the grammar names this symbol can start with.
    #[must_use]
    pub fn first_set(self) -> Vec<String> {
        match self {
            Self::Column => vec!["COLUMN".to_string()],
            Self::String | Self::OptionalString => vec!["STRING".to_string()],
            Self::Number => vec!["NUMBER".to_string()],
            Self::LParen => vec!["\"(\"".to_string()],
            Self::RParen => vec!["\")\"".to_string()],
            Self::Action => action_starts(),
        }
    }
}

/// A keyword and the symbols that must follow it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Production {
    /// Rule name, as in the grammar listing.
    pub name: &'static str,
    /// The keyword that selects this production.
    pub keyword: Keyword,
    /// Symbols after the keyword.
    pub body: &'static [Symbol],
}

/// Every statement production, in grammar order.
pub const STATEMENTS: &[Production] = &[
    Production {
        name: "terminate",
        keyword: Keyword::End,
        body: &[],
    },
    Production {
        name: "load",
        keyword: Keyword::Load,
        body: &[Symbol::String],
    },
    Production {
        name: "persist",
        keyword: Keyword::Save,
        body: &[Symbol::OptionalString],
    },
    Production {
        name: "export",
        keyword: Keyword::Export,
        body: &[Symbol::String, Symbol::OptionalString],
    },
    Production {
        name: "describe",
        keyword: Keyword::Describe,
        body: &[],
    },
    Production {
        name: "close",
        keyword: Keyword::Close,
        body: &[],
    },
    Production {
        name: "colsum",
        keyword: Keyword::Sum,
        body: &[Symbol::Column, Symbol::Column],
    },
    Production {
        name: "colsquare",
        keyword: Keyword::Square,
        body: &[Symbol::Column],
    },
    Production {
        name: "topn",
        keyword: Keyword::TopN,
        body: &[Symbol::Column],
    },
    Production {
        name: "coldrop",
        keyword: Keyword::Drop,
        body: &[Symbol::Column],
    },
    Production {
        name: "timed_repeat",
        keyword: Keyword::Timed,
        body: &[Symbol::LParen, Symbol::Action, Symbol::RParen],
    },
    Production {
        name: "capture3",
        keyword: Keyword::Capture,
        body: &[Symbol::Column, Symbol::Column, Symbol::Column],
    },
    Production {
        name: "paired",
        keyword: Keyword::Pair,
        body: &[Symbol::LParen, Symbol::Action, Symbol::Action, Symbol::RParen],
    },
    Production {
        name: "fixed_repeat",
        keyword: Keyword::Loop3,
        body: &[Symbol::LParen, Symbol::Action, Symbol::RParen],
    },
    Production {
        name: "chaos",
        keyword: Keyword::Chaos,
        body: &[Symbol::Number],
    },
];

/// Keywords whose productions may appear as a composite's inner action.
pub const ACTIONS: [Keyword; 4] = [Keyword::Sum, Keyword::Square, Keyword::TopN, Keyword::Drop];

/// Looks up the production a keyword selects.
#[must_use]
pub fn production(keyword: Keyword) -> Option<&'static Production> {
    STATEMENTS.iter().find(|p| p.keyword == keyword)
}

/// Returns true if the keyword starts an action production.
#[must_use]
pub fn is_action(keyword: Keyword) -> bool {
    ACTIONS.contains(&keyword)
}

/// Grammar names of every token a statement can start with.
#[must_use]
pub fn statement_starts() -> Vec<String> {
    STATEMENTS
        .iter()
        .map(|p| format!("\"{}\"", p.keyword.lexeme()))
        .collect()
}

/// Grammar names of every token an action can start with.
#[must_use]
pub fn action_starts() -> Vec<String> {
    ACTIONS
        .iter()
        .map(|k| format!("\"{}\"", k.lexeme()))
        .collect()
}
